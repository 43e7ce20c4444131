use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use enwrap::prelude_async::*;
use futures_core::future::FusedFuture;

fn noop_waker() -> Waker {
    fn noop(_: *const ()) {}
    fn clone(p: *const ()) -> RawWaker {
        RawWaker::new(p, &VTABLE)
    }
    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);

    // SAFETY: every vtable function is a no-op that never dereferences the pointer.
    unsafe { Waker::from_raw(RawWaker::new(core::ptr::null(), &VTABLE)) }
}

struct PendingOnce {
    polled: bool,
}

impl Future for PendingOnce {
    type Output = Result<u8, TaggedError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.polled {
            return Poll::Ready(Ok(7));
        }
        self.polled = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[test]
fn guarded_is_send_when_its_parts_are() {
    fn assert_send<T: Send>(_: &T) {}

    let double = wrap_async(|_: ErrorCallback, n: u32| async move { Ok(n * 2) });
    assert_send(&double.call(1));
}

#[test]
fn pending_is_forwarded_until_ready() {
    let wrapped = wrap_async(|_: ErrorCallback, ()| PendingOnce { polled: false });
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);

    let mut future = Box::pin(wrapped.call(()));
    assert!(!future.is_terminated());
    assert!(future.as_mut().poll(&mut cx).is_pending());
    assert!(!future.is_terminated());

    match future.as_mut().poll(&mut cx) {
        Poll::Ready(Ok(value)) => assert_eq!(value, 7),
        other => panic!("expected Ready(Ok(7)), got {:?}", other.is_ready()),
    }
    assert!(future.is_terminated());
}

#[test]
fn early_failure_terminates_after_one_poll() {
    let early = wrap_async(|_: ErrorCallback, ()| -> PendingOnce { panic!("before") });
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);

    let mut future = Box::pin(early.call(()));
    assert!(!future.is_terminated());

    match future.as_mut().poll(&mut cx) {
        Poll::Ready(Err(failure)) => assert_eq!(failure.message(), "before"),
        _ => panic!("expected an immediate thrown error"),
    }
    assert!(future.is_terminated());
}

#[test]
#[should_panic(expected = "polled after completion")]
fn polling_after_completion_panics() {
    let ready = wrap_async(|_: ErrorCallback, ()| async { Ok(()) });
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);

    let mut future = Box::pin(ready.call(()));
    assert!(future.as_mut().poll(&mut cx).is_ready());
    let _ = future.as_mut().poll(&mut cx);
}
