//! Vehicle-part driver around an [`EngineCalculator`].
//!
//! The host owns the persisted design fields and pushes them into the
//! calculator whenever the part reports a change.

use crate::calculator::{EngineCalculator, Recompute};
use crate::error::EngineResult;
use pe_core::units::{m, mpa};
use pe_properties::{MixtureCatalog, SharedPropellant};
use serde::{Deserialize, Serialize};

/// Design fields the host persists between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedEngineFields {
    pub mixture: String,
    pub chamber_pressure_mpa: f64,
    pub area_ratio: f64,
    /// Nozzle exit diameter
    pub nozzle_diameter_m: f64,
}

impl Default for PersistedEngineFields {
    fn default() -> Self {
        Self {
            mixture: "Kerosene_Lox".to_string(),
            chamber_pressure_mpa: 5.0,
            area_ratio: 7.0,
            nozzle_diameter_m: 1.0,
        }
    }
}

impl PersistedEngineFields {
    /// Throat diameter implied by the nozzle exit diameter and area ratio.
    pub fn throat_diameter_m(&self) -> f64 {
        self.nozzle_diameter_m / self.area_ratio.sqrt()
    }
}

#[derive(Debug)]
pub struct ProceduralEngine {
    pub fields: PersistedEngineFields,
    mixture: SharedPropellant,
    of_ratio: f64,
    calculator: EngineCalculator,
}

impl ProceduralEngine {
    /// Engine with the default persisted fields for `mixture`.
    pub fn new(catalog: &MixtureCatalog, mixture: &str) -> EngineResult<Self> {
        let fields = PersistedEngineFields {
            mixture: mixture.to_string(),
            ..PersistedEngineFields::default()
        };
        Self::from_fields(catalog, fields)
    }

    /// Restore an engine from persisted fields and run the first recompute.
    pub fn from_fields(catalog: &MixtureCatalog, fields: PersistedEngineFields) -> EngineResult<Self> {
        let mixture = catalog.model(&fields.mixture)?;
        let of_ratio = mixture.nominal_of_ratio();
        let mut engine = Self {
            fields,
            mixture,
            of_ratio,
            calculator: EngineCalculator::gas_generator(),
        };
        engine.check_changes()?;
        Ok(engine)
    }

    pub fn calculator(&self) -> &EngineCalculator {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut EngineCalculator {
        &mut self.calculator
    }

    pub fn mixture(&self) -> &SharedPropellant {
        &self.mixture
    }

    pub fn of_ratio(&self) -> f64 {
        self.of_ratio
    }

    /// Swap the propellant combination; the O/F resets to the mixture's nominal.
    pub fn set_mixture(&mut self, catalog: &MixtureCatalog, name: &str) -> EngineResult<bool> {
        let mixture = catalog.model(name)?;
        self.fields.mixture = name.to_string();
        self.of_ratio = mixture.nominal_of_ratio();
        self.mixture = mixture;
        self.check_changes()
    }

    /// Push the current fields into the calculator.
    ///
    /// Returns whether anything was recomputed.
    pub fn check_changes(&mut self) -> EngineResult<bool> {
        let outcome = self.calculator.set_engine_properties(
            self.mixture.clone(),
            self.of_ratio,
            mpa(self.fields.chamber_pressure_mpa),
            self.fields.area_ratio,
            m(self.fields.throat_diameter_m()),
        )?;
        Ok(matches!(outcome, Recompute::Updated { .. }))
    }

    /// Per-tick hook.
    pub fn fixed_update(&mut self) {}
}
