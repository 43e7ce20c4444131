//! Handing tagged errors to an error-reporting service.
//!
//! [`TaggedError::report`] splits an error into the three things monitoring tools
//! expect: the error object, its structured extra data and a message. [`Report`]
//! serializes to JSON for services that take a payload, and with the `tracing`
//! feature [`Report::emit`] records it as a single `tracing` event.
//!
//! # Examples
//!
//! ```
//! use enwrap::{declare_errors, extra, wrap, ErrorCallback};
//!
//! declare_errors! {
//!     #[derive(Debug)]
//!     pub enum Checkout {
//!         Declined => "declined",
//!     }
//! }
//!
//! let pay = wrap(|err: ErrorCallback<Checkout>, ()| {
//!     err.fail_with::<()>(Checkout::Declined, extra!({ "user_id": 123 }))
//! });
//!
//! let failure = pay.call(()).unwrap_err();
//! let report = failure.report();
//!
//! assert_eq!(report.message, "declined");
//! assert_eq!(report.extra_data.and_then(|d| d.get("user_id")?.as_i64()), Some(123));
//! assert!(!report.error_object.was_thrown());
//!
//! let json = serde_json::to_value(&report).unwrap();
//! assert_eq!(json["message"], "declined");
//! ```

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::types::{ExtraData, Origin, TaggedError};

/// A tagged error, split for an external error-reporting collaborator.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// The native error object, with source location and trimmed stack.
    pub error_object: &'a Origin,
    /// Extra data, present only when the error was built with some.
    pub extra_data: Option<&'a ExtraData>,
    pub message: &'a str,
}

impl<K> TaggedError<K> {
    /// Splits the error for forwarding to an error-reporting service.
    pub fn report(&self) -> Report<'_> {
        Report {
            error_object: self.origin(),
            extra_data: self.extra_data(),
            message: self.message().as_str(),
        }
    }
}

impl Report<'_> {
    /// Records the report as one `tracing` event at `ERROR` level.
    #[cfg(feature = "tracing")]
    pub fn emit(&self) {
        let location = self.error_object.location();
        tracing::error!(
            error.message = self.message,
            error.was_thrown = self.error_object.was_thrown(),
            error.location = %location,
            error.extra_data = self.extra_data.map(tracing::field::display),
            error.span = self.error_object.span(),
            "{}",
            self.message
        );
    }
}

impl Serialize for Report<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let origin = self.error_object;
        let location = origin.location();

        let mut state = serializer.serialize_struct("Report", 5)?;
        state.serialize_field("message", self.message)?;
        state.serialize_field("was_thrown", &origin.was_thrown())?;
        state.serialize_field(
            "location",
            &format_args!("{}:{}:{}", location.file(), location.line(), location.column()),
        )?;
        state.serialize_field("extra_data", &self.extra_data)?;
        state.serialize_field("stack", &origin.stack())?;
        state.end()
    }
}
