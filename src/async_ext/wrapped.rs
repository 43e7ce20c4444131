use core::future::Future;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe, Location};

use crate::async_ext::Guarded;
use crate::convert::normalize;
use crate::traits::{ErrorTag, WrappedFn};
use crate::types::{TaggedError, Undeclared};
use crate::wrap::{scope, ErrorCallback, WrapConfig};

/// An asynchronous function whose outcomes are all resolved as
/// `Result<T, TaggedError<K>>`.
///
/// Created by [`wrap_async`].
pub struct WrappedAsync<F, K = Undeclared, A = ()> {
    body: F,
    config: WrapConfig,
    _signature: PhantomData<fn(A) -> K>,
}

/// Wraps an asynchronous `body` so that panics and errors are resolved instead of
/// propagated.
///
/// # Examples
///
/// ```
/// use enwrap::async_ext::wrap_async;
/// use enwrap::{declare_errors, ErrorCallback};
///
/// declare_errors! {
///     #[derive(Debug)]
///     pub enum Lookup {
///         NotFound { id: u32 } => "not-found",
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let find = wrap_async(|err: ErrorCallback<Lookup>, id: u32| async move {
///     if id == 0 {
///         return err.fail(Lookup::NotFound { id });
///     }
///     Ok(format!("user-{id}"))
/// });
///
/// assert_eq!(find.call(7).await.unwrap(), "user-7");
///
/// let failure = find.call(0).await.unwrap_err();
/// assert_eq!(failure.message(), "not-found");
/// assert!(!failure.was_thrown());
/// # }
/// ```
pub fn wrap_async<K, A, T, Fut, F>(body: F) -> WrappedAsync<F, K, A>
where
    F: Fn(ErrorCallback<K>, A) -> Fut,
    Fut: Future<Output = Result<T, TaggedError<K>>>,
    K: ErrorTag,
{
    WrappedAsync { body, config: WrapConfig::default(), _signature: PhantomData }
}

impl<F, K, A> WrappedAsync<F, K, A> {
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

    /// Starts the body with `args`.
    ///
    /// A panic while building the future is not raised here; the returned future
    /// resolves to it as a thrown error on first poll. While the body runs, and each
    /// time the future is polled, `?` on foreign errors follows this function's
    /// config.
    #[track_caller]
    pub fn call<T, Fut>(&self, args: A) -> Guarded<Fut, K>
    where
        F: Fn(ErrorCallback<K>, A) -> Fut,
        Fut: Future<Output = Result<T, TaggedError<K>>>,
        K: ErrorTag,
    {
        let location = Location::caller();
        let callback = ErrorCallback::new(self.config);
        let guard = scope::enter(self.config);

        match panic::catch_unwind(AssertUnwindSafe(|| (self.body)(callback, args))) {
            Ok(future) => Guarded::new(future, self.config, location),
            Err(payload) => {
                let error = scope::thrown_at(&guard, normalize(payload), self.config, location);
                Guarded::failed(error, self.config, location)
            },
        }
    }
}

impl<F, K, A, T, Fut> WrappedFn<A> for WrappedAsync<F, K, A>
where
    F: Fn(ErrorCallback<K>, A) -> Fut,
    Fut: Future<Output = Result<T, TaggedError<K>>>,
    K: ErrorTag,
{
    type Success = T;
    type Declared = K;
    type Output = Guarded<Fut, K>;

    #[track_caller]
    fn invoke(&self, args: A) -> Self::Output {
        self.call(args)
    }
}

impl<F: Clone, K, A> Clone for WrappedAsync<F, K, A> {
    fn clone(&self) -> Self {
        Self { body: self.body.clone(), config: self.config, _signature: PhantomData }
    }
}

impl<F, K, A> Debug for WrappedAsync<F, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedAsync")
            .field("body", &std::any::type_name::<F>())
            .field("config", &self.config)
            .finish()
    }
}
