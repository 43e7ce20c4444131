//! The native error object behind every tagged error.
//!
//! An [`Origin`] records where a failure came from: the source location of the
//! construction (the panic site for panics, the `?` for propagated errors), an
//! optional captured backtrace with the crate's own frames trimmed away, the attached
//! extra data and the original error when one was thrown.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::panic::Location;
use std::sync::Arc;

use crate::stack::{self, ParsedStack};
use crate::types::{ExtraData, Message};

/// Source error kept by thrown failures.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// When errors capture a backtrace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BacktraceMode {
    /// Capture only when `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE` enables it.
    #[default]
    Env,
    /// Always capture, ignoring the environment.
    Force,
    /// Never capture.
    Off,
}

impl BacktraceMode {
    pub(crate) fn capture(self) -> Backtrace {
        match self {
            Self::Env => Backtrace::capture(),
            Self::Force => Backtrace::force_capture(),
            Self::Off => Backtrace::disabled(),
        }
    }
}

/// A position in the source code.
///
/// Unlike [`Location`], this can own its file name, so it can also describe panic
/// sites reported to a panic hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    file: Cow<'static, str>,
    line: u32,
    column: u32,
}

impl SourceLocation {
    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    pub(crate) fn from_panic(location: &Location<'_>) -> Self {
        Self {
            file: Cow::Owned(location.file().to_owned()),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl From<&'static Location<'static>> for SourceLocation {
    #[inline]
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The error object carried by a [`TaggedError`](crate::TaggedError).
#[derive(Clone)]
pub struct Origin {
    message: Message,
    location: SourceLocation,
    backtrace: Arc<Backtrace>,
    stack: Option<String>,
    extra_data: ExtraData,
    was_thrown: bool,
    source: Option<SharedError>,
    span: Option<&'static str>,
}

/// Everything needed to build an [`Origin`].
pub(crate) struct OriginParts {
    pub message: Message,
    pub location: SourceLocation,
    pub extra_data: ExtraData,
    pub was_thrown: bool,
    pub source: Option<SharedError>,
    pub backtrace: BacktraceMode,
    /// Taken instead of capturing a new backtrace, e.g. one recorded at a panic site.
    pub captured: Option<Backtrace>,
    pub capture_span: bool,
}

impl Origin {
    pub(crate) fn capture(parts: OriginParts) -> Self {
        let backtrace = parts.captured.unwrap_or_else(|| parts.backtrace.capture());
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => {
                let rendered = backtrace.to_string();
                stack::parse(Some(&rendered), true).map(ParsedStack::into_edited_stack)
            },
            _ => None,
        };

        Self {
            message: parts.message,
            location: parts.location,
            backtrace: Arc::new(backtrace),
            stack,
            extra_data: parts.extra_data,
            was_thrown: parts.was_thrown,
            source: parts.source,
            span: if parts.capture_span { current_span() } else { None },
        }
    }

    #[inline]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Where the error was constructed, where the body panicked, or where `?` was
    /// applied to a foreign error.
    #[inline]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The captured backtrace, untrimmed. Disabled unless [`BacktraceMode`] allowed it.
    #[inline]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// The captured trace without the capture machinery and this crate's frames.
    #[inline]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Re-parses the trimmed trace to find its first frame.
    pub fn parsed_stack(&self) -> Option<ParsedStack> {
        stack::parse(self.stack(), false)
    }

    /// Extra data; empty when none was supplied.
    #[inline]
    pub fn extra_data(&self) -> &ExtraData {
        &self.extra_data
    }

    #[inline]
    pub fn was_thrown(&self) -> bool {
        self.was_thrown
    }

    /// The thrown error this origin was normalized from, if any.
    #[inline]
    pub fn thrown_source(&self) -> Option<&SharedError> {
        self.source.as_ref()
    }

    /// Name of the `tracing` span that was active at construction.
    #[inline]
    pub fn span(&self) -> Option<&'static str> {
        self.span
    }
}

#[cfg(feature = "tracing")]
fn current_span() -> Option<&'static str> {
    tracing::Span::current().metadata().map(|meta| meta.name())
}

#[cfg(not(feature = "tracing"))]
fn current_span() -> Option<&'static str> {
    None
}

impl Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.message, f)
    }
}

impl Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Origin")
            .field("message", &self.message.as_str())
            .field("location", &format_args!("{}", self.location))
            .field("was_thrown", &self.was_thrown)
            .field("extra_data", &self.extra_data)
            .field("source", &self.source)
            .field("span", &self.span)
            .field("stack", &self.stack)
            .finish()
    }
}

impl Error for Origin {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|err| err as &(dyn Error + 'static))
    }
}
