//! Per-thread state of the wrapped calls currently running.
//!
//! While a wrapped body runs (or a [`Guarded`](crate::async_ext::Guarded) future is
//! polled), its [`WrapConfig`] is pushed onto a thread-local stack. Two things read
//! it:
//!
//! - `?` on a foreign error inside the body, which builds its thrown error with the
//!   active config instead of the default one;
//! - the panic hook installed on first use, which records the panic site (and a
//!   backtrace, if the config asks for one) so the thrown error points into the body
//!   rather than at the `call`.
//!
//! The hook chains to the hook that was installed before it. It is skipped for the
//! active call when [`WrapConfig::quiet_panics()`] is set. Replacing the process hook
//! later with [`std::panic::set_hook`] disables panic-site recording; thrown errors
//! then fall back to the location of the `call`.

use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::panic::{self, Location, PanicHookInfo};
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::convert::Thrown;
use crate::types::origin::SourceLocation;
use crate::types::TaggedError;
use crate::wrap::WrapConfig;

/// Where a caught panic was raised.
pub(crate) struct PanicSite {
    pub location: Option<SourceLocation>,
    pub backtrace: Backtrace,
}

struct Scope {
    config: WrapConfig,
    panic: Option<PanicSite>,
}

thread_local! {
    static SCOPES: RefCell<SmallVec<[Scope; 4]>> = RefCell::new(SmallVec::new());
}

static HOOK: OnceLock<()> = OnceLock::new();

fn install_hook() {
    HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !record(info) {
                previous(info);
            }
        }));
    });
}

/// Records the panic in the innermost scope. Returns `true` when the previous hook
/// must not run.
fn record(info: &PanicHookInfo<'_>) -> bool {
    let Some(config) = current_config() else {
        return false;
    };

    // Captured here, outside the thread-local accessors, so the trace starts at the
    // panic machinery.
    let site = PanicSite {
        location: info.location().map(SourceLocation::from_panic),
        backtrace: config.backtrace.capture(),
    };
    let _ = SCOPES.try_with(|scopes| {
        if let Ok(mut scopes) = scopes.try_borrow_mut() {
            if let Some(scope) = scopes.last_mut() {
                scope.panic = Some(site);
            }
        }
    });

    config.quiet_panics
}

/// Marks a wrapped call as running on this thread until dropped.
pub(crate) struct ScopeGuard {
    // Scopes live on one thread's stack.
    _local: PhantomData<*const ()>,
}

pub(crate) fn enter(config: WrapConfig) -> ScopeGuard {
    install_hook();
    SCOPES.with(|scopes| scopes.borrow_mut().push(Scope { config, panic: None }));
    ScopeGuard { _local: PhantomData }
}

impl ScopeGuard {
    /// Takes the panic recorded while this scope was innermost.
    pub(crate) fn take_panic(&self) -> Option<PanicSite> {
        SCOPES.with(|scopes| scopes.borrow_mut().last_mut().and_then(|scope| scope.panic.take()))
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let _ = SCOPES.try_with(|scopes| scopes.borrow_mut().pop());
    }
}

/// Config of the innermost running wrapped call on this thread.
pub(crate) fn current_config() -> Option<WrapConfig> {
    SCOPES
        .try_with(|scopes| scopes.try_borrow().ok().and_then(|s| s.last().map(|s| s.config)))
        .ok()
        .flatten()
}

/// Builds the thrown error for a panic caught under `guard`, at the recorded panic
/// site when there is one and at `fallback` otherwise.
pub(crate) fn thrown_at<K>(
    guard: &ScopeGuard,
    thrown: Thrown,
    config: WrapConfig,
    fallback: &'static Location<'static>,
) -> TaggedError<K> {
    match guard.take_panic() {
        Some(PanicSite { location: Some(location), backtrace }) => {
            TaggedError::thrown(thrown, config, location, Some(backtrace))
        },
        Some(PanicSite { location: None, backtrace }) => {
            TaggedError::thrown(thrown, config, fallback.into(), Some(backtrace))
        },
        None => TaggedError::thrown(thrown, config, fallback.into(), None),
    }
}
