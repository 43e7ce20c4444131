//! Normalization of thrown values.
//!
//! A wrapped body can fail in ways it did not declare: it can panic with any payload,
//! or propagate a foreign error with `?`. [`normalize`] and the [`Thrown`]
//! constructors turn all of them into one canonical shape with a non-empty message.
//!
//! | thrown value | message |
//! |---|---|
//! | `Thrown` (via `panic_any`) | unchanged |
//! | `Box<dyn Error + Send + Sync>` / any `Error` | its `Display` |
//! | `String`, `&str`, numbers, `bool`, `char` | its `Display` |
//! | `serde_json::Value` | the string itself, or compact JSON |
//! | `()` | `"()"` |
//! | anything else | `"Box<dyn Any>"` |
//!
//! An empty rendering is padded to `"e"`.
//!
//! # Examples
//!
//! ```
//! use enwrap::convert::normalize;
//!
//! let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
//! assert_eq!(normalize(payload).message(), "boom");
//!
//! let payload = std::panic::catch_unwind(|| std::panic::panic_any(42_u8)).unwrap_err();
//! assert_eq!(normalize(payload).message(), "42");
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

use serde_json::Value;

use crate::types::origin::SharedError;
use crate::types::Message;

/// Message used for panic payloads of a type this crate cannot inspect.
pub const OPAQUE_PAYLOAD: &str = "Box<dyn Any>";

/// A thrown value in canonical form.
#[derive(Debug, Clone)]
pub struct Thrown {
    message: Message,
    source: Option<SharedError>,
}

impl Thrown {
    /// Normalizes a standard error, keeping it as the source.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self { message: Message::padded(error.to_string()), source: Some(Arc::new(error)) }
    }

    /// Normalizes a boxed error, keeping it as the source.
    pub fn from_boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self { message: Message::padded(error.to_string()), source: Some(Arc::from(error)) }
    }

    /// Normalizes any displayable value.
    pub fn from_display<T>(value: T) -> Self
    where
        T: Display,
    {
        Self { message: Message::padded(value.to_string()), source: None }
    }

    /// Normalizes a JSON value. Strings are used as they are, everything else is
    /// rendered as compact JSON with object keys in sorted order.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(text) => Self::from_display(text),
            other => Self::from_display(other),
        }
    }

    #[inline]
    pub fn message(&self) -> &Message {
        &self.message
    }

    #[inline]
    pub fn source(&self) -> Option<&SharedError> {
        self.source.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Message, Option<SharedError>) {
        (self.message, self.source)
    }
}

/// Normalizes a panic payload as returned by [`std::panic::catch_unwind`].
pub fn normalize(payload: Box<dyn Any + Send>) -> Thrown {
    let payload = match payload.downcast::<Thrown>() {
        Ok(thrown) => return *thrown,
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<Box<dyn Error + Send + Sync>>() {
        Ok(error) => return Thrown::from_boxed(*error),
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<Value>() {
        Ok(value) => return Thrown::from_json(&value),
        Err(payload) => payload,
    };
    if payload.is::<()>() {
        return Thrown::from_display("()");
    }

    downcast_display::<String>(payload)
        .or_else(downcast_display::<&'static str>)
        .or_else(downcast_display::<bool>)
        .or_else(downcast_display::<char>)
        .or_else(downcast_display::<i32>)
        .or_else(downcast_display::<i64>)
        .or_else(downcast_display::<u32>)
        .or_else(downcast_display::<u64>)
        .or_else(downcast_display::<usize>)
        .or_else(downcast_display::<isize>)
        .or_else(downcast_display::<f64>)
        .or_else(downcast_display::<f32>)
        .or_else(downcast_display::<i8>)
        .or_else(downcast_display::<i16>)
        .or_else(downcast_display::<i128>)
        .or_else(downcast_display::<u8>)
        .or_else(downcast_display::<u16>)
        .or_else(downcast_display::<u128>)
        .unwrap_or_else(|_| Thrown::from_display(OPAQUE_PAYLOAD))
}

fn downcast_display<T>(payload: Box<dyn Any + Send>) -> Result<Thrown, Box<dyn Any + Send>>
where
    T: Any + Display,
{
    payload.downcast::<T>().map(|value| Thrown::from_display(&*value))
}
