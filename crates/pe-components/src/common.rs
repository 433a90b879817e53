//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use pe_core::numeric::{ensure_finite, ensure_positive};

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    Ok(ensure_positive(value, what)?)
}

/// Ensure gamma is a valid ratio of specific heats.
pub fn check_gamma(gamma: f64) -> ComponentResult<f64> {
    let gamma = check_finite(gamma, "gamma")?;
    if gamma <= 1.0 {
        return Err(ComponentError::InvalidArg {
            what: "gamma must be greater than 1",
        });
    }
    Ok(gamma)
}
