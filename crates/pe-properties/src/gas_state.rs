//! Combustion gas state definitions.

use crate::error::{PropertyError, PropertyResult};
use pe_core::constants::R_UNIVERSAL;
use pe_core::units::{Pressure, Temperature, k, pa};

/// Thermochemical state of the combustion gas for one (O/F, pressure) sample.
///
/// Carries the chamber stagnation state and the "frozen" station in the
/// nozzle, downstream of which the composition is assumed fixed. Molar mass is in
/// kg/kmol (numerically equal to g/mol).
#[derive(Debug, Clone, PartialEq)]
pub struct CombustionGasState {
    /// Ratio of specific heats
    pub gamma: f64,
    /// Molar mass [kg/kmol]
    pub molar_mass: f64,
    pub chamber_temperature: Temperature,
    pub chamber_pressure: Pressure,
    /// Static temperature at the frozen-flow station
    pub nozzle_temperature: Temperature,
    /// Static pressure at the frozen-flow station
    pub nozzle_pressure: Pressure,
    /// Area ratio of the frozen-flow station as reported by the provider
    pub frozen_area_ratio: f64,
    /// Mach number at the frozen-flow station
    pub nozzle_mach: f64,
    /// O/F ratio of this gas sample
    pub of_ratio: f64,
}

impl CombustionGasState {
    /// Build a state from chamber conditions, expanding isentropically to the
    /// frozen station at `nozzle_mach`.
    ///
    /// ```text
    /// T_n = T_c / (1 + (γ-1)/2 · M²)
    /// p_n = p_c · (T_n/T_c)^(γ/(γ-1))
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_chamber(
        gamma: f64,
        molar_mass: f64,
        chamber_temperature: Temperature,
        chamber_pressure: Pressure,
        frozen_area_ratio: f64,
        nozzle_mach: f64,
        of_ratio: f64,
    ) -> PropertyResult<Self> {
        let t_ratio = 1.0 / (1.0 + 0.5 * (gamma - 1.0) * nozzle_mach * nozzle_mach);
        let p_ratio = t_ratio.powf(gamma / (gamma - 1.0));

        let state = Self {
            gamma,
            molar_mass,
            chamber_temperature,
            chamber_pressure,
            nozzle_temperature: k(chamber_temperature.value * t_ratio),
            nozzle_pressure: pa(chamber_pressure.value * p_ratio),
            frozen_area_ratio,
            nozzle_mach,
            of_ratio,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check every field for physical plausibility.
    pub fn validate(&self) -> PropertyResult<()> {
        if !self.gamma.is_finite() || self.gamma <= 1.0 {
            return Err(PropertyError::NonPhysical {
                what: "gamma must be > 1 and finite",
            });
        }
        if !self.molar_mass.is_finite() || self.molar_mass <= 0.0 {
            return Err(PropertyError::NonPhysical {
                what: "molar mass must be positive and finite",
            });
        }
        for (value, what) in [
            (
                self.chamber_temperature.value,
                "chamber temperature must be positive and finite",
            ),
            (
                self.chamber_pressure.value,
                "chamber pressure must be positive and finite",
            ),
            (
                self.nozzle_temperature.value,
                "nozzle temperature must be positive and finite",
            ),
            (
                self.nozzle_pressure.value,
                "nozzle pressure must be positive and finite",
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PropertyError::NonPhysical { what });
            }
        }
        if !self.frozen_area_ratio.is_finite() || self.frozen_area_ratio < 1.0 {
            return Err(PropertyError::NonPhysical {
                what: "frozen area ratio must be >= 1",
            });
        }
        if !self.nozzle_mach.is_finite() || self.nozzle_mach <= 0.0 {
            return Err(PropertyError::NonPhysical {
                what: "nozzle Mach number must be positive",
            });
        }
        if !self.of_ratio.is_finite() || self.of_ratio < 0.0 {
            return Err(PropertyError::NonPhysical {
                what: "O/F ratio must be non-negative",
            });
        }
        Ok(())
    }

    /// Specific gas constant R/Mw [J/(kg·K)].
    pub fn specific_gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molar_mass
    }

    /// Specific heat at constant pressure [J/(kg·K)], ideal gas.
    pub fn cp(&self) -> f64 {
        self.gamma / (self.gamma - 1.0) * self.specific_gas_constant()
    }
}
