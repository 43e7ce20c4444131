//! Declared error sets.
//!
//! A wrapped function names the failures it may produce with a type implementing
//! [`ErrorTag`]; the error callback only accepts values of that type. The usual way
//! to get one is [`declare_errors!`](crate::declare_errors), which also checks the
//! messages at compile time.
//!
//! A free-form string cannot act as a declared set, because a message that is not
//! fixed in the source cannot be matched on by callers:
//!
//! ```rust,compile_fail
//! use enwrap::{wrap, ErrorCallback};
//!
//! let lookup = wrap(|err: ErrorCallback<String>, id: u32| err.fail::<u32>(format!("missing {id}")));
//! ```

use crate::types::ExtraData;

/// A closed set of error tags, each with a fixed, non-empty message.
///
/// # Implementing by hand
///
/// ```
/// use enwrap::{ErrorTag, ExtraData};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Auth {
///     Expired,
///     Denied { user: u64 },
/// }
///
/// impl ErrorTag for Auth {
///     fn message(&self) -> &'static str {
///         match self {
///             Auth::Expired => "expired",
///             Auth::Denied { .. } => "denied",
///         }
///     }
///
///     fn extra_data(&self) -> Option<ExtraData> {
///         match self {
///             Auth::Expired => None,
///             Auth::Denied { user } => Some([("user", *user)].into_iter().collect()),
///         }
///     }
/// }
///
/// assert_eq!(Auth::Denied { user: 7 }.message(), "denied");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a declared error set",
    label = "free-form messages cannot be told apart by callers",
    note = "declare the permitted errors with `enwrap::declare_errors!` or implement `ErrorTag`",
    note = "use `enwrap::Undeclared` when the function declares no errors"
)]
pub trait ErrorTag {
    /// Every message the set can produce, including those of embedded sets.
    ///
    /// [`declare_errors!`](crate::declare_errors) fills this in and rejects sets whose
    /// messages collide. Hand-written impls leave it empty unless they list their
    /// messages, in which case sets embedding them are checked against the list.
    const MESSAGES: &'static [&'static str] = &[];

    /// The message identifying this tag. Must not be empty.
    fn message(&self) -> &'static str;

    /// Structured data carried by the tag itself.
    fn extra_data(&self) -> Option<ExtraData> {
        None
    }
}
