//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use enwrap::prelude::*;
//!
//! declare_errors! {
//!     #[derive(Debug)]
//!     pub enum ConfigError {
//!         Missing { key: String } => "missing-key",
//!     }
//! }
//!
//! let get = wrap(|err: ErrorCallback<ConfigError>, key: &str| match key {
//!     "port" => Ok(8080),
//!     other => err.fail(ConfigError::Missing { key: other.to_owned() }),
//! });
//!
//! let outcome: TaggedResult<u16, ConfigError> = get.call("host");
//! assert!(outcome.is_declared_err());
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`declare_errors!`], [`extra!`]
//! - **Functions**: [`wrap`]
//! - **Types**: [`ErrorCallback`], [`TaggedError`], [`ExtraData`], [`Undeclared`], [`WrapConfig`]
//! - **Traits**: [`ErrorTag`], [`OutcomeExt`], [`WrappedFn`]
//! - **Type Alias**: [`TaggedResult`]

// Macros
pub use crate::{declare_errors, extra};

// Core types
pub use crate::types::{ExtraData, TaggedError, TaggedResult, Undeclared};
pub use crate::wrap::{wrap, ErrorCallback, WrapConfig};

// Traits
pub use crate::traits::{ErrorTag, OutcomeExt, WrappedFn};
