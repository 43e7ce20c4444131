//! The wrapping combinator and the error callback it injects.
//!
//! [`wrap`] turns a body `Fn(ErrorCallback<K>, A) -> Result<T, TaggedError<K>>` into a
//! [`Wrapped`] function of `A` alone. Calling it runs the body with a fresh
//! [`ErrorCallback`] and returns every outcome:
//!
//! - `Ok(T)` when the body succeeds, unchanged;
//! - the body's own `Err`, built through the callback (`was_thrown() == false`) or
//!   from a foreign error propagated with `?` (`was_thrown() == true`);
//! - a thrown error when the body panics. The panic never escapes `call`.
//!
//! A caught panic is located at its `panic!` site. It still reaches the panic hook
//! that was installed before the first wrapped call, which prints it to stderr by
//! default; [`WrapConfig::quiet_panics()`] turns that off per function.
//!
//! Several positional arguments are passed as a tuple.
//!
//! # Examples
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
//! Only tags from the declared set can be raised:
//!
//! ```rust,compile_fail
//! use enwrap::{declare_errors, wrap, ErrorCallback};
//!
//! declare_errors! {
//!     pub enum Lookup {
//!         NotFound => "not-found",
//!     }
//! }
//!
//! let find = wrap(|err: ErrorCallback<Lookup>, ()| err.fail::<u32>(Lookup::Other));
//! ```

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe, Location};

use crate::convert::normalize;
use crate::traits::{ErrorTag, WrappedFn};
use crate::types::{BacktraceMode, ExtraData, TaggedError, Undeclared};

pub(crate) mod scope;

/// Settings shared by a wrapped function and the errors it produces.
///
/// The config applies to errors built through the callback, to panics, and to
/// foreign errors propagated with `?` while the body runs.
///
/// # Examples
///
/// ```
/// use enwrap::{wrap, BacktraceMode, ErrorCallback, WrapConfig};
///
/// let config = WrapConfig::new().backtrace(BacktraceMode::Off);
/// let parse = wrap(|_: ErrorCallback, text: &str| Ok(text.parse::<i64>()?)).with_config(config);
///
/// let failure = parse.call("x").unwrap_err();
/// assert!(failure.was_thrown());
/// assert!(failure.origin().stack().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WrapConfig {
    pub backtrace: BacktraceMode,
    /// Record the active `tracing` span in each error's origin. Has no effect
    /// without the `tracing` feature.
    pub capture_span: bool,
    /// Skip the previously installed panic hook for panics caught by this function,
    /// so nothing is printed to stderr. Off by default.
    pub quiet_panics: bool,
}

impl WrapConfig {
    #[inline]
    pub const fn new() -> Self {
        Self { backtrace: BacktraceMode::Env, capture_span: true, quiet_panics: false }
    }

    #[inline]
    pub const fn backtrace(mut self, mode: BacktraceMode) -> Self {
        self.backtrace = mode;
        self
    }

    #[inline]
    pub const fn capture_span(mut self, enabled: bool) -> Self {
        self.capture_span = enabled;
        self
    }

    #[inline]
    pub const fn quiet_panics(mut self, enabled: bool) -> Self {
        self.quiet_panics = enabled;
        self
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds declared errors inside a wrapped body.
///
/// Each wrapped call receives its own callback as the body's first argument. The
/// source location recorded in the error is the line that called the callback.
pub struct ErrorCallback<K = Undeclared> {
    config: WrapConfig,
    _tag: PhantomData<fn() -> K>,
}

impl<K> ErrorCallback<K> {
    #[inline]
    pub(crate) fn new(config: WrapConfig) -> Self {
        Self { config, _tag: PhantomData }
    }

    #[inline]
    pub fn config(&self) -> &WrapConfig {
        &self.config
    }
}

impl<K: ErrorTag> ErrorCallback<K> {
    /// Builds a declared error for `tag`.
    #[track_caller]
    pub fn err(&self, tag: K) -> TaggedError<K> {
        TaggedError::from_tag(tag, None, self.config, Location::caller().into())
    }

    /// Builds a declared error for `tag` with extra data attached.
    #[track_caller]
    pub fn err_with(&self, tag: K, extra: ExtraData) -> TaggedError<K> {
        TaggedError::from_tag(tag, Some(extra), self.config, Location::caller().into())
    }

    /// Shorthand for `Err(self.err(tag))`.
    #[track_caller]
    pub fn fail<T>(&self, tag: K) -> Result<T, TaggedError<K>> {
        Err(self.err(tag))
    }

    /// Shorthand for `Err(self.err_with(tag, extra))`.
    #[track_caller]
    pub fn fail_with<T>(&self, tag: K, extra: ExtraData) -> Result<T, TaggedError<K>> {
        Err(self.err_with(tag, extra))
    }
}

impl<K> Clone for ErrorCallback<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ErrorCallback<K> {}

impl<K> Debug for ErrorCallback<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCallback").field("config", &self.config).finish()
    }
}

/// A function whose outcomes are all returned as `Result<T, TaggedError<K>>`.
///
/// Created by [`wrap`].
pub struct Wrapped<F, K = Undeclared, A = ()> {
    body: F,
    config: WrapConfig,
    _signature: PhantomData<fn(A) -> K>,
}

/// Wraps `body` so that panics and errors are returned instead of propagated.
pub fn wrap<K, A, T, F>(body: F) -> Wrapped<F, K, A>
where
    F: Fn(ErrorCallback<K>, A) -> Result<T, TaggedError<K>>,
    K: ErrorTag,
{
    Wrapped { body, config: WrapConfig::default(), _signature: PhantomData }
}

impl<F, K, A> Wrapped<F, K, A> {
    /// Replaces the configuration used for errors from this function.
    #[inline]
    pub fn with_config(mut self, config: WrapConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    /// Consumes the wrapper, returning the body.
    #[inline]
    pub fn into_inner(self) -> F {
        self.body
    }

    /// Runs the body with `args`.
    ///
    /// A panic in the body is reported at its panic site. If the process panic hook
    /// was replaced after the first wrapped call, the location of this call is used
    /// instead.
    #[track_caller]
    pub fn call<T>(&self, args: A) -> Result<T, TaggedError<K>>
    where
        F: Fn(ErrorCallback<K>, A) -> Result<T, TaggedError<K>>,
        K: ErrorTag,
    {
        let location = Location::caller();
        let callback = ErrorCallback::new(self.config);
        let guard = scope::enter(self.config);

        match panic::catch_unwind(AssertUnwindSafe(|| (self.body)(callback, args))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                Err(scope::thrown_at(&guard, normalize(payload), self.config, location))
            },
        }
    }
}

impl<F, K, A, T> WrappedFn<A> for Wrapped<F, K, A>
where
    F: Fn(ErrorCallback<K>, A) -> Result<T, TaggedError<K>>,
    K: ErrorTag,
{
    type Success = T;
    type Declared = K;
    type Output = Result<T, TaggedError<K>>;

    #[track_caller]
    fn invoke(&self, args: A) -> Self::Output {
        self.call(args)
    }
}

impl<F: Clone, K, A> Clone for Wrapped<F, K, A> {
    fn clone(&self) -> Self {
        Self { body: self.body.clone(), config: self.config, _signature: PhantomData }
    }
}

impl<F, K, A> Debug for Wrapped<F, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("body", &std::any::type_name::<F>())
            .field("config", &self.config)
            .finish()
    }
}
