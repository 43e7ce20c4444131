//! Reading the interesting frame out of a rendered backtrace.
//!
//! Errors capture a [`std::backtrace::Backtrace`] when they are constructed. The
//! first frames of that trace belong to the capture machinery and to this crate, not
//! to the function that actually failed. [`parse`] removes those frames and reports
//! where the remaining trace starts.
//!
//! The input is the standard rendering of a backtrace:
//!
//! ```text
//!    0: enwrap::wrap::ErrorCallback<K>::err
//!              at ./src/wrap/mod.rs:88:9
//!    1: my_app::load_user
//!              at ./src/main.rs:14:20
//! ```
//!
//! # Examples
//!
//! ```
//! use enwrap::stack;
//!
//! let trace = "   0: enwrap::wrap::ErrorCallback<K>::err\n             at ./src/wrap/mod.rs:88:9\n   1: my_app::load_user\n             at ./src/main.rs:14:20";
//!
//! let parsed = stack::parse(Some(trace), true).unwrap();
//! assert_eq!(parsed.symbol(), "my_app::load_user");
//! assert_eq!(parsed.line_number(), Some(14));
//!
//! assert!(stack::parse(None, true).is_none());
//! ```

use smallvec::SmallVec;

/// Symbol prefixes of frames that are never user code.
const INTERNAL_PREFIXES: &[&str] = &[
    "std::backtrace",
    "std::backtrace_rs",
    "<std::backtrace",
    // Panic machinery, present when the trace was captured from the panic hook.
    "std::panicking",
    "<std::panicking",
    "std::panic::",
    "core::panicking",
    "std::sys::backtrace",
    "std::sys_common::backtrace",
    "rust_begin_unwind",
    "__rustc::",
    "<alloc::boxed::Box<F,A> as core::ops::function::Fn",
    "enwrap::",
    "<enwrap::",
];

/// Inline storage for the frames of a typical trace.
type FrameVec<'a> = SmallVec<[Frame<'a>; 8]>;

/// Where a frame's code lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLocation {
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
}

/// Result of [`parse`]: the trace without internal frames, plus its first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStack {
    edited_stack: String,
    symbol: String,
    location: Option<FrameLocation>,
}

impl ParsedStack {
    /// The trace text with internal frames removed.
    #[inline]
    pub fn edited_stack(&self) -> &str {
        &self.edited_stack
    }

    /// Symbol name of the first remaining frame.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Source location of the first remaining frame, if debug info was available.
    #[inline]
    pub fn location(&self) -> Option<&FrameLocation> {
        self.location.as_ref()
    }

    /// Line number of the first remaining frame.
    #[inline]
    pub fn line_number(&self) -> Option<u32> {
        self.location.as_ref().map(|loc| loc.line)
    }

    /// Consumes the result, returning the edited trace text.
    #[inline]
    pub fn into_edited_stack(self) -> String {
        self.edited_stack
    }
}

#[derive(Debug, Clone)]
struct Frame<'a> {
    symbol: &'a str,
    lines: SmallVec<[&'a str; 2]>,
}

impl Frame<'_> {
    fn is_internal(&self) -> bool {
        INTERNAL_PREFIXES.iter().any(|prefix| self.symbol.starts_with(prefix))
    }

    fn location(&self) -> Option<FrameLocation> {
        self.lines.iter().skip(1).find_map(|line| parse_location(line))
    }
}

/// Parses a rendered backtrace.
///
/// When `pop_internal` is set, leading frames that belong to the backtrace machinery
/// or to this crate are dropped so the first frame is the caller's. Returns `None`
/// when there is no stack or no frame is left.
pub fn parse(stack: Option<&str>, pop_internal: bool) -> Option<ParsedStack> {
    let frames = split_frames(stack?);

    let skip = if pop_internal {
        frames.iter().take_while(|frame| frame.is_internal()).count()
    } else {
        0
    };

    let first = frames.get(skip)?;
    let edited_stack = frames[skip..]
        .iter()
        .flat_map(|frame| frame.lines.iter().copied())
        .collect::<Vec<_>>()
        .join("\n");

    Some(ParsedStack {
        edited_stack,
        symbol: first.symbol.to_owned(),
        location: first.location(),
    })
}

fn split_frames(stack: &str) -> FrameVec<'_> {
    let mut frames = FrameVec::new();

    for line in stack.lines() {
        if let Some(symbol) = frame_header(line) {
            frames.push(Frame { symbol, lines: smallvec::smallvec![line] });
        } else if let Some(frame) = frames.last_mut() {
            if !line.trim().is_empty() {
                frame.lines.push(line);
            }
        }
    }

    frames
}

/// Recognizes `   12: symbol::path` and returns the symbol.
fn frame_header(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let (index, symbol) = trimmed.split_once(": ")?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(symbol.trim())
}

/// Recognizes `at path/to/file.rs:12:5`.
fn parse_location(line: &str) -> Option<FrameLocation> {
    let rest = line.trim_start().strip_prefix("at ")?.trim_end();

    // Split from the right so drive letters such as `C:\` stay in the path.
    let mut parts = rest.rsplitn(3, ':');
    let last = parts.next()?;
    let middle = parts.next()?;
    match parts.next() {
        Some(file) => match (middle.parse::<u32>(), last.parse::<u32>()) {
            (Ok(line), Ok(column)) => {
                Some(FrameLocation { file: file.to_owned(), line, column: Some(column) })
            },
            _ => last.parse::<u32>().ok().map(|line| FrameLocation {
                file: format!("{file}:{middle}"),
                line,
                column: None,
            }),
        },
        None => last
            .parse::<u32>()
            .ok()
            .map(|line| FrameLocation { file: middle.to_owned(), line, column: None }),
    }
}
