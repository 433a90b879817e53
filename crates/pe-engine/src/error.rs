//! Error types for engine calculations.

use pe_components::ComponentError;
use pe_properties::PropertyError;
use pe_solver::SolverError;
use thiserror::Error;

/// Errors that abort an engine recompute.
///
/// A failed recompute never touches the previously published results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(
        "Turbine power balance failed at O/F {of_ratio}, {chamber_pressure_mpa} MPa \
         (turbine flow bracket [{bracket_lo}, {bracket_hi}] kg/s): {source}"
    )]
    CycleSolve {
        of_ratio: f64,
        chamber_pressure_mpa: f64,
        bracket_lo: f64,
        bracket_hi: f64,
        #[source]
        source: SolverError,
    },

    #[error("Unknown structural material: {name}")]
    UnknownMaterial { name: String },

    #[error("Property provider error: {0}")]
    Properties(PropertyError),

    #[error("Component error: {0}")]
    Component(ComponentError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<PropertyError> for EngineError {
    fn from(e: PropertyError) -> Self {
        match e {
            PropertyError::UnknownMaterial { name } => EngineError::UnknownMaterial { name },
            other => EngineError::Properties(other),
        }
    }
}

impl From<ComponentError> for EngineError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::Properties(err) => err.into(),
            other => EngineError::Component(other),
        }
    }
}

impl EngineError {
    /// True for failures caused by the configuration rather than numerics.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownMaterial { .. }
                | EngineError::InvalidArg { .. }
                | EngineError::CycleSolve {
                    source: SolverError::InvalidBracket { .. },
                    ..
                }
        )
    }
}
