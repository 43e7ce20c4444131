//! Asynchronous wrapped functions.
//!
//! [`wrap_async`] is the counterpart of [`wrap`](crate::wrap) for bodies that return
//! a future. The returned [`Guarded`] future resolves exactly once to the body's
//! result, or to a thrown error if the body panics, either while building the future
//! or while it is being polled.
//!
//! # Feature Flag
//!
//! Requires the `async` feature:
//!
//! ```toml
//! [dependencies]
//! enwrap = { version = "0.3", features = ["async"] }
//! ```
//!
//! # Examples
//!
//! ```
//! use enwrap::async_ext::wrap_async;
//! use enwrap::ErrorCallback;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let add = wrap_async(|_: ErrorCallback, (a, b): (i32, i32)| async move { Ok(a + b) });
//! assert_eq!(add.call((1, 2)).await.unwrap(), 3);
//!
//! let boom = wrap_async(|_: ErrorCallback, ()| async move {
//!     if true {
//!         panic!("boom");
//!     }
//!     Ok(())
//! });
//! let failure = boom.call(()).await.unwrap_err();
//! assert!(failure.was_thrown());
//! # }
//! ```

mod guarded;
mod wrapped;

pub use guarded::Guarded;
pub use wrapped::{wrap_async, WrappedAsync};
