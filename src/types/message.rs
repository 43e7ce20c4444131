//! Non-empty error messages.
//!
//! Every [`TaggedError`](crate::TaggedError) is discriminated by its message, so the
//! message can never be the empty string. [`Message`] carries that invariant.
//!
//! # Examples
//!
//! ```
//! use enwrap::Message;
//!
//! let msg = Message::new("not-found").unwrap();
//! assert_eq!(msg, "not-found");
//!
//! assert!(Message::new("").is_err());
//! assert_eq!(Message::padded(""), "e");
//! ```

use std::borrow::{Borrow, Cow};
use std::fmt::{self, Display};
use std::ops::Deref;

/// A string that is guaranteed to contain at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Message(Cow<'static, str>);

impl Message {
    /// Creates a message, rejecting the empty string.
    #[inline]
    pub fn new<S>(text: S) -> Result<Self, EmptyMessage>
    where
        S: Into<Cow<'static, str>>,
    {
        let text = text.into();
        if text.is_empty() {
            return Err(EmptyMessage);
        }
        Ok(Self(text))
    }

    /// Creates a message, padding the empty string to `"e"`.
    ///
    /// This is the normalization applied to thrown values: a panic with `""` as its
    /// payload surfaces as an error whose message is `"e"`.
    #[inline]
    pub fn padded<S>(text: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        let text = text.into();
        if text.is_empty() {
            return Self(Cow::Borrowed(PAD));
        }
        Self(text)
    }

    /// Returns the message text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the message, returning the inner text.
    #[inline]
    pub fn into_inner(self) -> Cow<'static, str> {
        self.0
    }
}

const PAD: &str = "e";

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Message {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Message {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Message {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Message {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Message {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Message> for &str {
    fn eq(&self, other: &Message) -> bool {
        *self == other.as_str()
    }
}

impl TryFrom<String> for Message {
    type Error = EmptyMessage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&'static str> for Message {
    type Error = EmptyMessage;

    fn try_from(value: &'static str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl serde::Serialize for Message {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// Returned when an empty string is used where a [`Message`] is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyMessage;

impl Display for EmptyMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error message must not be empty")
    }
}

impl std::error::Error for EmptyMessage {}
