//! Error types for component operations.

use pe_core::error::PeError;
use pe_properties::PropertyError;
use pe_solver::SolverError;
use thiserror::Error;

/// Errors that can occur during component calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Property error: {0}")]
    Properties(#[from] PropertyError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<PeError> for ComponentError {
    fn from(e: PeError) -> Self {
        match e {
            PeError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            PeError::InvalidArg { what } => ComponentError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::NonPhysical { what: "gamma" };
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn solver_error_converts() {
        let err: ComponentError = SolverError::InvalidConfig { what: "tol" }.into();
        assert!(matches!(err, ComponentError::Solver(_)));
    }

    #[test]
    fn non_finite_core_error_is_non_physical() {
        let err: ComponentError = PeError::NonFinite {
            what: "mass flow",
            value: f64::NAN,
        }
        .into();
        assert_eq!(err, ComponentError::NonPhysical { what: "mass flow" });
    }
}
