//! pe-properties: property providers for the engine model.
//!
//! Provides:
//! - Combustion gas state representation
//! - `PropellantModel` trait for combustion-gas property lookups
//! - Mixture definitions, admissible limits and a built-in catalog
//! - An analytical frozen-chemistry surrogate and a fixed-state provider
//! - `MaterialLibrary` trait plus a table of structural materials
//!
//! # Architecture
//!
//! The engine crates only see the two traits. Anything able to answer
//! "what gas comes out of this mixture at this O/F and pressure" can drive the
//! calculators: the surrogate shipped here, a tabulated equilibrium code, or a
//! test double.
//!
//! # Example
//!
//! ```no_run
//! use pe_properties::{MixtureCatalog, PropellantModel};
//! use pe_core::units::mpa;
//!
//! let catalog = MixtureCatalog::builtin();
//! let model = catalog.model("Kerosene_Lox").unwrap();
//! let gas = model.state_at_ratio_and_pressure(2.3, mpa(10.0)).unwrap();
//! println!("Chamber temperature: {} K", gas.chamber_temperature.value);
//! ```

pub mod catalog;
pub mod error;
pub mod fixed;
pub mod gas_state;
pub mod material;
pub mod mixture;
pub mod model;
pub mod surrogate;

// Re-exports for ergonomics
pub use catalog::MixtureCatalog;
pub use error::{PropertyError, PropertyResult};
pub use fixed::FixedGasModel;
pub use gas_state::CombustionGasState;
pub use material::{MaterialLibrary, StandardMaterials, StructuralMaterial};
pub use mixture::{CombustionFit, GasGeneratorRichness, MixtureDef, MixtureLimits};
pub use model::{PropellantModel, SharedPropellant};
pub use surrogate::SurrogateMixtureModel;
