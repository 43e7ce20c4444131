//! Future wrapper that turns panics into thrown errors.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::panic::{self, AssertUnwindSafe, Location};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

use crate::convert::normalize;
use crate::types::TaggedError;
use crate::wrap::{scope, WrapConfig};

pin_project! {
    /// The future returned by [`WrappedAsync::call`](super::WrappedAsync::call).
    ///
    /// Resolves to the wrapped body's result. A panic raised while the inner future is
    /// polled is caught and resolved as a thrown [`TaggedError`]; the inner future is
    /// dropped at that point and never polled again.
    ///
    /// # Cancel Safety
    ///
    /// `Guarded` is cancel-safe if the inner future is cancel-safe.
    #[must_use = "futures do nothing unless polled"]
    pub struct Guarded<Fut, K> {
        #[pin]
        future: Option<Fut>,
        early: Option<TaggedError<K>>,
        config: WrapConfig,
        location: &'static Location<'static>,
    }
}

impl<Fut, K> Guarded<Fut, K> {
    pub(crate) fn new(
        future: Fut,
        config: WrapConfig,
        location: &'static Location<'static>,
    ) -> Self {
        Self { future: Some(future), early: None, config, location }
    }

    /// A future that resolves immediately to `error`.
    pub(crate) fn failed(
        error: TaggedError<K>,
        config: WrapConfig,
        location: &'static Location<'static>,
    ) -> Self {
        Self { future: None, early: Some(error), config, location }
    }
}

impl<Fut, T, K> Future for Guarded<Fut, K>
where
    Fut: Future<Output = Result<T, TaggedError<K>>>,
{
    type Output = Result<T, TaggedError<K>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if let Some(error) = this.early.take() {
            return Poll::Ready(Err(error));
        }

        let future = this
            .future
            .as_mut()
            .as_pin_mut()
            .expect("Guarded polled after completion; this is a bug");

        let guard = scope::enter(*this.config);
        match panic::catch_unwind(AssertUnwindSafe(|| future.poll(cx))) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(outcome)) => {
                this.future.set(None);
                Poll::Ready(outcome)
            },
            Err(payload) => {
                this.future.set(None);
                let config = *this.config;
                let error = scope::thrown_at(&guard, normalize(payload), config, *this.location);
                Poll::Ready(Err(error))
            },
        }
    }
}

impl<Fut, T, K> FusedFuture for Guarded<Fut, K>
where
    Fut: Future<Output = Result<T, TaggedError<K>>>,
{
    fn is_terminated(&self) -> bool {
        self.future.is_none() && self.early.is_none()
    }
}
