//! The failure half of every wrapped call.
//!
//! A [`TaggedError`] is discriminated by an [`ErrorKind`] fixed at construction:
//! either one of the tags the function declared ([`ErrorKind::Declared`]) or the
//! catch-all for panics and `?`-propagated foreign errors ([`ErrorKind::Thrown`]).
//!
//! # Examples
//!
//! ```
//! use enwrap::{declare_errors, wrap, ErrorCallback, ErrorKind};
//!
//! declare_errors! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum LoadError {
//!         Missing => "missing",
//!     }
//! }
//!
//! let load = wrap(|err: ErrorCallback<LoadError>, ()| err.fail::<u8>(LoadError::Missing));
//! let failure = load.call(()).unwrap_err();
//!
//! assert_eq!(failure.message(), "missing");
//! assert_eq!(failure.kind(), &ErrorKind::Declared(LoadError::Missing));
//! assert!(!failure.was_thrown());
//! ```

use std::backtrace::Backtrace;
use std::fmt::{self, Debug, Display};
use std::panic::Location;

use crate::convert::Thrown;
use crate::traits::ErrorTag;
use crate::types::origin::{OriginParts, SourceLocation};
use crate::types::{ExtraData, Message, Origin};
use crate::wrap::{scope, WrapConfig};

/// Which failure an error represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind<K> {
    /// Constructed through the error callback with a declared tag.
    Declared(K),
    /// A panic or a foreign error surfaced from the wrapped body.
    Thrown,
}

impl<K> ErrorKind<K> {
    #[inline]
    pub fn is_thrown(&self) -> bool {
        matches!(self, Self::Thrown)
    }

    #[inline]
    pub fn declared(&self) -> Option<&K> {
        match self {
            Self::Declared(tag) => Some(tag),
            Self::Thrown => None,
        }
    }

    #[inline]
    pub fn map<K2, F>(self, f: F) -> ErrorKind<K2>
    where
        F: FnOnce(K) -> K2,
    {
        match self {
            Self::Declared(tag) => ErrorKind::Declared(f(tag)),
            Self::Thrown => ErrorKind::Thrown,
        }
    }
}

/// The empty declared error set: only thrown failures are possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Undeclared {}

impl ErrorTag for Undeclared {
    fn message(&self) -> &'static str {
        match *self {}
    }
}

/// A failure outcome: message, declared-or-thrown kind, optional extra data and origin.
#[must_use]
pub struct TaggedError<K = Undeclared> {
    kind: ErrorKind<K>,
    extra_data: Option<ExtraData>,
    origin: Box<Origin>,
}

impl<K: ErrorTag> TaggedError<K> {
    /// Builds a declared error. Extra data carried by the tag comes first, entries in
    /// `extra` override it.
    pub(crate) fn from_tag(
        tag: K,
        extra: Option<ExtraData>,
        config: WrapConfig,
        location: SourceLocation,
    ) -> Self {
        let extra_data = match (tag.extra_data(), extra) {
            (Some(own), Some(extra)) => Some(own.merged(&extra)),
            (own, extra) => own.or(extra),
        };
        let origin = Origin::capture(OriginParts {
            message: Message::padded(tag.message()),
            location,
            extra_data: extra_data.clone().unwrap_or_default(),
            was_thrown: false,
            source: None,
            backtrace: config.backtrace,
            captured: None,
            capture_span: config.capture_span,
        });

        Self { kind: ErrorKind::Declared(tag), extra_data, origin: Box::new(origin) }
    }
}

impl<K> TaggedError<K> {
    /// Builds the catch-all error for a thrown value. `captured` replaces the
    /// backtrace that `config` would capture here.
    pub(crate) fn thrown(
        thrown: Thrown,
        config: WrapConfig,
        location: SourceLocation,
        captured: Option<Backtrace>,
    ) -> Self {
        let (message, source) = thrown.into_parts();
        let origin = Origin::capture(OriginParts {
            message,
            location,
            extra_data: ExtraData::new(),
            was_thrown: true,
            source,
            backtrace: config.backtrace,
            captured,
            capture_span: config.capture_span,
        });

        Self { kind: ErrorKind::Thrown, extra_data: None, origin: Box::new(origin) }
    }

    /// The discriminating message.
    #[inline]
    pub fn message(&self) -> &Message {
        self.origin.message()
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind<K> {
        &self.kind
    }

    /// The declared tag, or `None` for thrown failures.
    #[inline]
    pub fn declared(&self) -> Option<&K> {
        self.kind.declared()
    }

    /// `false` for errors built through the error callback, `true` otherwise.
    #[inline]
    pub fn was_thrown(&self) -> bool {
        self.kind.is_thrown()
    }

    /// Extra data, present only when the construction supplied some.
    #[inline]
    pub fn extra_data(&self) -> Option<&ExtraData> {
        self.extra_data.as_ref()
    }

    #[inline]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    #[inline]
    pub fn into_origin(self) -> Origin {
        *self.origin
    }

    /// Splits the error into its kind and origin.
    #[inline]
    pub fn into_parts(self) -> (ErrorKind<K>, Origin) {
        (self.kind, *self.origin)
    }

    /// Re-tags the error with a wider declared set, keeping message, extra data,
    /// origin and thrown flag untouched.
    #[inline]
    pub fn widen<K2>(self) -> TaggedError<K2>
    where
        K2: From<K>,
    {
        self.map_kind(K2::from)
    }

    /// Maps the declared tag, keeping everything else untouched.
    pub fn map_kind<K2, F>(self, f: F) -> TaggedError<K2>
    where
        F: FnOnce(K) -> K2,
    {
        TaggedError { kind: self.kind.map(f), extra_data: self.extra_data, origin: self.origin }
    }

    /// Builds a thrown error from an arbitrary value at the caller's location.
    ///
    /// Inside a running wrapped call the error follows that call's [`WrapConfig`],
    /// elsewhere the default one.
    #[track_caller]
    pub fn from_thrown(thrown: Thrown) -> Self {
        let config = scope::current_config().unwrap_or_default();
        Self::thrown(thrown, config, Location::caller().into(), None)
    }
}

impl<K: Clone> Clone for TaggedError<K> {
    fn clone(&self) -> Self {
        Self { kind: self.kind.clone(), extra_data: self.extra_data.clone(), origin: self.origin.clone() }
    }
}

impl<K> Display for TaggedError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self.message(), f)?;
        if f.alternate() {
            write!(f, " (at {})", self.origin.location())?;
            if let Some(extra) = &self.extra_data {
                write!(f, " {extra}")?;
            }
        }
        Ok(())
    }
}

impl<K: Debug> Debug for TaggedError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedError")
            .field("message", &self.message().as_str())
            .field("kind", &self.kind)
            .field("extra_data", &self.extra_data)
            .field("origin", &self.origin)
            .finish()
    }
}

/// `?` on any standard error inside a wrapped body turns it into a thrown failure.
impl<K, E> From<E> for TaggedError<K>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn from(error: E) -> Self {
        Self::from_thrown(Thrown::from_error(error))
    }
}

impl<K> From<TaggedError<K>> for Origin {
    #[inline]
    fn from(error: TaggedError<K>) -> Self {
        error.into_origin()
    }
}
