//! Error types for solver operations.

use thiserror::Error;

/// Errors that can occur while solving a scalar equation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid bracket: f({lo})={f_lo} and f({hi})={f_hi} share sign")]
    InvalidBracket {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error(
        "Non-convergence after {iterations} iterations: best estimate {best} (residual {residual})"
    )]
    NonConvergence {
        best: f64,
        residual: f64,
        iterations: usize,
    },

    #[error("Non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("Invalid solver config: {what}")]
    InvalidConfig { what: &'static str },
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_error_names_endpoints() {
        let err = SolverError::InvalidBracket {
            lo: 0.0,
            hi: 2.5,
            f_lo: 1.0,
            f_hi: 3.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("2.5"));
        assert!(msg.contains("share sign"));
    }
}
