//! Helpers for ESCI product-classification experiments: resource loaders,
//! per-epoch metric charts and console evaluation summaries.

pub mod chart;
pub mod data;
pub mod error;
pub mod report;

pub use error::{DecodeErrorKind, LoadError, PreconditionError};
