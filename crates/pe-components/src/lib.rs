//! pe-components: component models for liquid rocket engine performance.
//!
//! Provides:
//! - Isentropic nozzle flow relations (area ratio, Mach number, station ratios)
//! - Main combustion chamber with choked throat flow
//! - Frozen-flow nozzle expansion with vacuum and sea-level performance
//! - Empirical chamber and nozzle sizing
//! - Pump and turbine power relations for turbopump cycles
//!
//! Every model is a deterministic function of its inputs and of the property
//! providers it is handed.
//!
//! # Example
//!
//! ```no_run
//! use pe_components::{CombustionChamber, NozzleExpansion};
//! use pe_core::units::{k, m, mpa};
//! use pe_properties::FixedGasModel;
//!
//! let model = FixedGasModel::new(1.2, 22.0, k(3500.0));
//! let chamber = CombustionChamber {
//!     of_ratio: 2.3,
//!     chamber_pressure: mpa(10.0),
//!     area_ratio: 30.0,
//!     throat_diameter: m(0.1),
//! }
//! .evaluate(&model)
//! .unwrap();
//!
//! let perf = NozzleExpansion {
//!     area_ratio: 30.0,
//!     exit_area: chamber.exit_area,
//!     mass_flow: chamber.flow.total,
//!     min_throttle: 1.0,
//! }
//! .evaluate(&chamber.gas)
//! .unwrap();
//! println!("Vacuum Isp: {} s", perf.isp_vacuum.value);
//! ```

pub mod chamber;
pub mod common;
pub mod error;
pub mod expansion;
pub mod geometry;
pub mod nozzle;
pub mod pump;
pub mod turbine;

// Re-exports
pub use chamber::{ChamberFlow, ChamberSolution, CombustionChamber, choked_mass_flow};
pub use error::{ComponentError, ComponentResult};
pub use expansion::{ExitState, NozzleExpansion, NozzlePerformance, expand_to_exit};
pub use geometry::{GeometrySizing, SizingParameters, chamber_area, size_engine};
pub use nozzle::{
    area_ratio_from_mach, isentropic_pressure_ratio, isentropic_temperature_ratio,
    mach_from_area_ratio,
};
pub use pump::Pump;
pub use turbine::Turbine;
