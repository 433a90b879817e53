//! Provider with fixed gas properties, independent of O/F ratio.
//!
//! Useful for hand calculations and for tests that need predictable numbers.

use crate::error::PropertyResult;
use crate::gas_state::CombustionGasState;
use crate::mixture::{GasGeneratorRichness, MixtureLimits};
use crate::model::PropellantModel;
use crate::model::validation::{validate_of_ratio, validate_pressure, validate_temperature};
use pe_core::units::{Density, Pressure, Temperature, k, kg_per_m3, mpa};

/// Gas generator products of a [`FixedGasModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeneratorGas {
    pub gamma: f64,
    pub molar_mass: f64,
    pub of_ratio: f64,
}

#[derive(Debug, Clone)]
pub struct FixedGasModel {
    pub name: String,
    pub gamma: f64,
    /// [kg/kmol]
    pub molar_mass: f64,
    pub chamber_temperature: Temperature,
    pub frozen_area_ratio: f64,
    pub frozen_mach: f64,
    pub limits: MixtureLimits,
    pub nominal_of: f64,
    pub fuel_rich_gas: FixedGeneratorGas,
    pub oxidizer_rich_gas: FixedGeneratorGas,
    pub oxidizer_density: Density,
    pub fuel_density: Density,
}

impl FixedGasModel {
    /// Kerosene/LOX-like constants.
    pub fn new(gamma: f64, molar_mass: f64, chamber_temperature: Temperature) -> Self {
        Self {
            name: "Fixed".to_string(),
            gamma,
            molar_mass,
            chamber_temperature,
            frozen_area_ratio: 1.6,
            frozen_mach: 1.8,
            limits: MixtureLimits {
                of_lean: 0.1,
                of_rich: 20.0,
                chamber_pressure_low: mpa(0.1),
                chamber_pressure_high: mpa(100.0),
                frozen_area_ratio: 1.6,
            },
            nominal_of: 2.3,
            fuel_rich_gas: FixedGeneratorGas {
                gamma: 1.25,
                molar_mass: 16.0,
                of_ratio: 0.4,
            },
            oxidizer_rich_gas: FixedGeneratorGas {
                gamma: 1.3,
                molar_mass: 30.0,
                of_ratio: 50.0,
            },
            oxidizer_density: kg_per_m3(1141.0),
            fuel_density: kg_per_m3(820.0),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_limits(mut self, limits: MixtureLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for FixedGasModel {
    fn default() -> Self {
        Self::new(1.22, 22.0, k(3600.0))
    }
}

impl PropellantModel for FixedGasModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn limits(&self) -> MixtureLimits {
        self.limits
    }

    fn nominal_of_ratio(&self) -> f64 {
        self.nominal_of
    }

    fn state_at_ratio_and_pressure(
        &self,
        of_ratio: f64,
        chamber_pressure: Pressure,
    ) -> PropertyResult<CombustionGasState> {
        validate_of_ratio(of_ratio)?;
        validate_pressure(chamber_pressure)?;
        CombustionGasState::from_chamber(
            self.gamma,
            self.molar_mass,
            self.chamber_temperature,
            chamber_pressure,
            self.frozen_area_ratio,
            self.frozen_mach,
            of_ratio,
        )
    }

    fn state_at_pressure_and_temperature(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        richness: GasGeneratorRichness,
    ) -> PropertyResult<CombustionGasState> {
        validate_pressure(pressure)?;
        validate_temperature(temperature)?;
        let gas = match richness {
            GasGeneratorRichness::FuelRich => self.fuel_rich_gas,
            GasGeneratorRichness::OxidizerRich => self.oxidizer_rich_gas,
        };
        CombustionGasState::from_chamber(
            gas.gamma,
            gas.molar_mass,
            temperature,
            pressure,
            self.frozen_area_ratio,
            self.frozen_mach,
            gas.of_ratio,
        )
    }

    fn oxidizer_density(&self) -> Density {
        self.oxidizer_density
    }

    fn fuel_density(&self) -> Density {
        self.fuel_density
    }
}
