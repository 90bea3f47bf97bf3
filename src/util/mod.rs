//! Utility types used throughout the library.
//!
//! - [`ScalarType`] - Enum of scalar storage types
//! - [`Error`] / [`Result`] - Error handling

mod error;
mod scalar;

pub use error::*;
pub use scalar::*;
