//! The result shape of a wrapped function, and helpers for composing them.
//!
//! Every wrapped function produces `Result<Success, TaggedError<Declared>>` (or a
//! future of it). [`WrappedFn`] exposes those pieces as associated types so other
//! declarations can be written in terms of them:
//!
//! - [`SuccessOf`] is the success shape;
//! - [`ErrorsOf`] is only the failure part: every declared tag plus the catch-all;
//! - [`ResultOf`] is the whole union.
//!
//! # Composing wrapped functions
//!
//! An outer function that forwards an inner function's failures declares a set that
//! embeds the inner one, then widens the inner error on the way out. Message, extra
//! data, thrown flag and origin pass through untouched.
//!
//! ```
//! use enwrap::{declare_errors, wrap, ErrorCallback, ErrorTag, ErrorsOf, OutcomeExt, TaggedError, WrappedFn};
//!
//! declare_errors! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum FetchError {
//!         Timeout { after_ms: u64 } => "timeout",
//!     }
//! }
//!
//! declare_errors! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum LoadError {
//!         Fetch(FetchError),
//!         Empty => "empty",
//!     }
//! }
//!
//! let fetch = wrap(|err: ErrorCallback<FetchError>, ()| {
//!     err.fail::<String>(FetchError::Timeout { after_ms: 30 })
//! });
//!
//! let load = wrap(|err: ErrorCallback<LoadError>, ()| {
//!     let body = fetch.call(()).widen::<LoadError>()?;
//!     if body.is_empty() {
//!         return err.fail(LoadError::Empty);
//!     }
//!     Ok(body)
//! });
//!
//! let failure = load.call(()).unwrap_err();
//! assert_eq!(failure.message(), "timeout");
//! assert_eq!(failure.extra_data().and_then(|data| data.get("after_ms")?.as_u64()), Some(30));
//! assert_eq!(failure.declared(), Some(&LoadError::Fetch(FetchError::Timeout { after_ms: 30 })));
//!
//! // Only the failure part of any synchronous wrapped function.
//! fn failure_of<W, T, K>(function: &W) -> Option<ErrorsOf<W>>
//! where
//!     W: WrappedFn<(), Declared = K, Output = Result<T, TaggedError<K>>>,
//!     K: ErrorTag,
//! {
//!     function.invoke(()).err()
//! }
//!
//! assert_eq!(failure_of(&fetch).unwrap().message(), "timeout");
//! ```

use crate::traits::ErrorTag;
use crate::types::TaggedError;

/// A wrapped function, seen through its result shape.
///
/// Implemented by [`Wrapped`](crate::Wrapped) and, with the `async` feature,
/// [`WrappedAsync`](crate::async_ext::WrappedAsync).
pub trait WrappedFn<A> {
    /// The value returned on success.
    type Success;
    /// The declared error set.
    type Declared: ErrorTag;
    /// What a call returns: the result itself, or a future resolving to it.
    type Output;

    /// Calls the wrapped function.
    fn invoke(&self, args: A) -> Self::Output;
}

/// The failure part of a wrapped function's result.
pub type ErrorsOf<W, A = ()> = TaggedError<<W as WrappedFn<A>>::Declared>;

/// The success part of a wrapped function's result.
pub type SuccessOf<W, A = ()> = <W as WrappedFn<A>>::Success;

/// The complete result of a wrapped function, once awaited.
pub type ResultOf<W, A = ()> = Result<SuccessOf<W, A>, ErrorsOf<W, A>>;

/// Composition helpers for results of wrapped functions.
pub trait OutcomeExt<T, K> {
    /// Re-tags the error with a wider declared set (see [`TaggedError::widen`]).
    fn widen<K2>(self) -> Result<T, TaggedError<K2>>
    where
        K2: From<K>;

    /// The error, if any, discarding the success value.
    fn errors(self) -> Option<TaggedError<K>>;

    /// Returns `true` for a failure that was built through the error callback.
    fn is_declared_err(&self) -> bool;

    /// Returns `true` for a failure that came from a panic or a foreign error.
    fn is_thrown_err(&self) -> bool;
}

impl<T, K> OutcomeExt<T, K> for Result<T, TaggedError<K>> {
    #[inline]
    fn widen<K2>(self) -> Result<T, TaggedError<K2>>
    where
        K2: From<K>,
    {
        self.map_err(TaggedError::widen)
    }

    #[inline]
    fn errors(self) -> Option<TaggedError<K>> {
        self.err()
    }

    #[inline]
    fn is_declared_err(&self) -> bool {
        matches!(self, Err(error) if !error.was_thrown())
    }

    #[inline]
    fn is_thrown_err(&self) -> bool {
        matches!(self, Err(error) if error.was_thrown())
    }
}
