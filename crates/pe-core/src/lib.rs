//! pe-core: stable foundation for procengine.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (Real + finite/positive checks + clamping)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PeError, PeResult};
pub use numeric::*;
pub use units::*;
