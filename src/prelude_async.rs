//! Async prelude - all async utilities in one import.
//!
//! Re-exports everything from the sync [`prelude`](crate::prelude) plus
//! [`wrap_async`](crate::async_ext::wrap_async) and
//! [`Guarded`](crate::async_ext::Guarded).
//!
//! ```
//! use enwrap::prelude_async::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let double = wrap_async(|_: ErrorCallback, n: u32| async move { Ok(n * 2) });
//! assert_eq!(double.call(21).await.unwrap(), 42);
//! # }
//! ```

// Re-export everything from sync prelude
pub use crate::prelude::*;

pub use crate::async_ext::{wrap_async, Guarded};
