//! Wrap functions so that every outcome comes back as a value.
//!
//! A wrapped function returns `Result<T, TaggedError<K>>`. The error side is either
//! one of the failures the function declared up front (the set `K`, built with
//! [`declare_errors!`]) or the catch-all for anything it did not declare: a panic,
//! or a foreign error propagated with `?`. Each error carries a non-empty message,
//! optional structured extra data and an [`Origin`] with the source location and a
//! trimmed backtrace.
//!
//! Each submodule re-exports its public surface from here, so consumers can depend
//! on `enwrap::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Success and panics
//!
//! ```
//! use enwrap::{wrap, ErrorCallback};
//!
//! let add = wrap(|_: ErrorCallback, (a, b): (i32, i32)| Ok(a + b));
//! assert_eq!(add.call((1, 2)).unwrap(), 3);
//!
//! let boom = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic!("boom") });
//! let failure = boom.call(()).unwrap_err();
//! assert_eq!(failure.message(), "boom");
//! assert!(failure.was_thrown());
//! ```
//!
//! ## Declared errors with extra data
//!
//! ```
//! use enwrap::{declare_errors, extra, wrap, ErrorCallback};
//!
//! declare_errors! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum Validate {
//!         Bad => "bad",
//!     }
//! }
//!
//! let check = wrap(|err: ErrorCallback<Validate>, x: i32| {
//!     if x < 0 {
//!         return err.fail_with(Validate::Bad, extra!({ "field": "x" }));
//!     }
//!     Ok(x)
//! });
//!
//! assert_eq!(check.call(4).unwrap(), 4);
//!
//! let failure = check.call(-1).unwrap_err();
//! assert_eq!(failure.message(), "bad");
//! assert!(!failure.was_thrown());
//! assert_eq!(failure.extra_data().and_then(|d| d.get("field")?.as_str()), Some("x"));
//! ```
//!
//! ## Reporting
//!
//! ```
//! use enwrap::{wrap, ErrorCallback};
//!
//! let fail = wrap(|_: ErrorCallback, ()| -> Result<(), _> { panic!("disk full") });
//! let failure = fail.call(()).unwrap_err();
//!
//! let report = failure.report();
//! assert_eq!(report.message, "disk full");
//! assert!(report.extra_data.is_none());
//! assert!(report.error_object.was_thrown());
//! ```

/// Asynchronous wrapped functions (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;
/// Normalization of panics and foreign errors
pub mod convert;
/// Macros for declaring error sets and extra data
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Async prelude - all async utilities in one import (requires `async` feature)
#[cfg(feature = "async")]
pub mod prelude_async;
/// Splitting errors for error-reporting services
pub mod report;
/// Backtrace parsing
pub mod stack;
/// Declared error sets and result shapes
pub mod traits;
/// TaggedError, Origin and their parts
pub mod types;
/// The wrapping combinator
pub mod wrap;

pub use convert::{normalize, Thrown};
pub use report::Report;
pub use traits::*;
pub use types::{
    BacktraceMode, EmptyMessage, ErrorKind, ExtraData, Message, Origin, SourceLocation,
    TaggedError, TaggedResult, Undeclared,
};
pub use wrap::{wrap, ErrorCallback, WrapConfig, Wrapped};
