//! Bracketed scalar root finding for the engine models.
//!
//! The residual is a plain function of the unknown and an immutable parameter
//! struct, so callers never share scratch state with the solver.

pub mod brent;
pub mod error;

pub use brent::{BrentConfig, BrentSolution, brent_solve};
pub use error::{SolverError, SolverResult};
