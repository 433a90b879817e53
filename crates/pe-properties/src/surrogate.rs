//! Analytical frozen-chemistry surrogate for bipropellant combustion products.
//!
//! This is not an equilibrium code. It reproduces the shape of real combustion
//! data closely enough for design sweeps: a flame temperature that peaks near
//! stoichiometric and falls off on both sides, a molar mass that rises with
//! oxidizer content, and gamma that rises as the gas cools. The temperature curve
//! has a closed-form inverse on each side of its peak, which is what gas
//! generator lookups need.

use crate::error::{PropertyError, PropertyResult};
use crate::gas_state::CombustionGasState;
use crate::mixture::{GasGeneratorRichness, MixtureDef, MixtureLimits};
use crate::model::PropellantModel;
use crate::model::validation::{validate_of_ratio, validate_pressure, validate_temperature};
use pe_core::units::{Density, Pressure, Temperature, in_mpa, k, kg_per_m3};

/// Property provider built from a [`MixtureDef`].
#[derive(Debug, Clone)]
pub struct SurrogateMixtureModel {
    def: MixtureDef,
}

impl SurrogateMixtureModel {
    pub fn new(def: MixtureDef) -> PropertyResult<Self> {
        def.validate()?;
        Ok(Self { def })
    }

    pub fn definition(&self) -> &MixtureDef {
        &self.def
    }

    /// Peak flame temperature at `pressure` [K].
    fn peak_temperature(&self, pressure: Pressure) -> f64 {
        let fit = &self.def.combustion;
        let pressure_factor =
            (in_mpa(pressure) / fit.reference_pressure_mpa).powf(fit.pressure_exponent);
        fit.peak_temperature_k * pressure_factor
    }

    /// Flame temperature for an O/F ratio at `pressure` [K].
    fn flame_temperature(&self, of_ratio: f64, pressure: Pressure) -> f64 {
        let fit = &self.def.combustion;
        let log_offset = (of_ratio / fit.peak_of).ln();
        let bell = (-log_offset * log_offset / (2.0 * fit.log_width * fit.log_width)).exp();
        fit.base_temperature_k + (self.peak_temperature(pressure) - fit.base_temperature_k) * bell
    }

    /// O/F ratio that burns at `temperature`, on the requested side of the peak.
    fn of_ratio_for_temperature(
        &self,
        temperature: f64,
        pressure: Pressure,
        richness: GasGeneratorRichness,
    ) -> PropertyResult<f64> {
        let fit = &self.def.combustion;
        let amplitude = self.peak_temperature(pressure) - fit.base_temperature_k;
        let fraction = (temperature - fit.base_temperature_k) / amplitude;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(PropertyError::OutOfRange {
                what: "gas generator temperature",
                value: temperature,
            });
        }

        let log_offset = fit.log_width * (-2.0 * fraction.ln()).sqrt();
        let signed = match richness {
            GasGeneratorRichness::FuelRich => -log_offset,
            GasGeneratorRichness::OxidizerRich => log_offset,
        };
        Ok(fit.peak_of * signed.exp())
    }

    fn molar_mass(&self, of_ratio: f64) -> f64 {
        let fit = &self.def.combustion;
        (fit.molar_mass_base + fit.molar_mass_slope * of_ratio).min(fit.molar_mass_max)
    }

    fn gamma(&self, temperature: f64) -> f64 {
        let fit = &self.def.combustion;
        let span = fit.peak_temperature_k - fit.base_temperature_k;
        let fraction = ((temperature - fit.base_temperature_k) / span).clamp(0.0, 1.0);
        fit.gamma_cold + (fit.gamma_hot - fit.gamma_cold) * fraction
    }

    fn build_state(
        &self,
        of_ratio: f64,
        pressure: Pressure,
        temperature: f64,
    ) -> PropertyResult<CombustionGasState> {
        CombustionGasState::from_chamber(
            self.gamma(temperature),
            self.molar_mass(of_ratio),
            k(temperature),
            pressure,
            self.def.frozen_area_ratio,
            self.def.frozen_mach,
            of_ratio,
        )
    }
}

impl PropellantModel for SurrogateMixtureModel {
    fn name(&self) -> &str {
        &self.def.name
    }

    fn limits(&self) -> MixtureLimits {
        self.def.limits()
    }

    fn nominal_of_ratio(&self) -> f64 {
        self.def.nominal_of
    }

    fn state_at_ratio_and_pressure(
        &self,
        of_ratio: f64,
        chamber_pressure: Pressure,
    ) -> PropertyResult<CombustionGasState> {
        validate_of_ratio(of_ratio)?;
        validate_pressure(chamber_pressure)?;
        let temperature = self.flame_temperature(of_ratio, chamber_pressure);
        self.build_state(of_ratio, chamber_pressure, temperature)
    }

    fn state_at_pressure_and_temperature(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        richness: GasGeneratorRichness,
    ) -> PropertyResult<CombustionGasState> {
        validate_pressure(pressure)?;
        validate_temperature(temperature)?;
        let of_ratio = self.of_ratio_for_temperature(temperature.value, pressure, richness)?;
        self.build_state(of_ratio, pressure, temperature.value)
    }

    fn oxidizer_density(&self) -> Density {
        kg_per_m3(self.def.oxidizer_density_kg_m3)
    }

    fn fuel_density(&self) -> Density {
        kg_per_m3(self.def.fuel_density_kg_m3)
    }
}
