//! Error types produced by wrapped functions.
//!
//! - [`TaggedError`] is the failure half of every wrapped result.
//! - [`Origin`] is the native error object inside it: location, trimmed backtrace,
//!   source error.
//! - [`Message`] and [`ExtraData`] are the two pieces a caller usually matches on.
//!
//! # Examples
//!
//! ```
//! use enwrap::{extra, wrap, ErrorCallback, TaggedResult};
//!
//! let parse = wrap(|_: ErrorCallback, text: &str| Ok(text.parse::<u16>()?));
//!
//! let outcome: TaggedResult<u16> = parse.call("70000");
//! let failure = outcome.unwrap_err();
//! assert!(failure.was_thrown());
//! assert_eq!(failure.message(), "number too large to fit in target type");
//! assert!(failure.origin().thrown_source().is_some());
//!
//! assert_eq!(extra!({ "id": 1 }).len(), 1);
//! ```

pub mod extra_data;
pub mod message;
pub mod origin;
pub mod tagged_error;

pub use extra_data::ExtraData;
pub use message::{EmptyMessage, Message};
pub use origin::{BacktraceMode, Origin, SharedError, SourceLocation};
pub use tagged_error::{ErrorKind, TaggedError, Undeclared};

/// Result alias for the outcome of a wrapped call.
///
/// # Type Parameters
///
/// * `T` - The success value type
/// * `K` - The declared error set
pub type TaggedResult<T, K = Undeclared> = Result<T, TaggedError<K>>;
