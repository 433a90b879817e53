//! Property provider errors.

use pe_core::PeError;
use thiserror::Error;

/// Result type for property lookups.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Errors that can occur during property lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// Non-physical values (negative pressure, gamma <= 1, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of the range the provider can answer.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Mixture name not present in the catalog.
    #[error("Unknown mixture: {name}")]
    UnknownMixture { name: String },

    /// Material name not present in the material library.
    #[error("Unknown material: {name}")]
    UnknownMaterial { name: String },
}

impl From<PeError> for PropertyError {
    fn from(err: PeError) -> Self {
        match err {
            PeError::NonFinite { what, .. } => PropertyError::NonPhysical { what },
            PeError::InvalidArg { what } => PropertyError::InvalidArg { what },
        }
    }
}
