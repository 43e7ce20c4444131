//! Traits connecting declared error sets and wrapped functions.
//!
//! - [`ErrorTag`]: a closed set of errors, each with a fixed message
//! - [`WrappedFn`]: the result shape of a wrapped function, with the [`ErrorsOf`],
//!   [`SuccessOf`] and [`ResultOf`] aliases derived from it
//! - [`OutcomeExt`]: composition helpers on wrapped results

pub mod error_tag;
pub mod shape;

pub use error_tag::ErrorTag;
pub use shape::{ErrorsOf, OutcomeExt, ResultOf, SuccessOf, WrappedFn};
