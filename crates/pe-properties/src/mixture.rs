//! Mixture definitions and admissible operating limits.

use crate::error::{PropertyError, PropertyResult};
use pe_core::numeric::clamp_to_range;
use pe_core::units::{Pressure, mpa, pa};
use serde::{Deserialize, Serialize};

/// Admissible chamber operating envelope of a mixture.
///
/// `of_lean` is the lower O/F bound and `of_rich` the upper one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureLimits {
    pub of_lean: f64,
    pub of_rich: f64,
    pub chamber_pressure_low: Pressure,
    pub chamber_pressure_high: Pressure,
    /// Smallest admissible nozzle area ratio
    pub frozen_area_ratio: f64,
}

impl MixtureLimits {
    /// Clamp an O/F ratio into `[of_lean, of_rich]`.
    pub fn clamp_of_ratio(&self, of_ratio: f64) -> (f64, bool) {
        clamp_to_range(of_ratio, self.of_lean, self.of_rich)
    }

    /// Clamp a chamber pressure into `[low, high]`.
    pub fn clamp_chamber_pressure(&self, pressure: Pressure) -> (Pressure, bool) {
        let (value, clamped) = clamp_to_range(
            pressure.value,
            self.chamber_pressure_low.value,
            self.chamber_pressure_high.value,
        );
        (pa(value), clamped)
    }

    /// Raise an area ratio to at least the frozen-flow area ratio.
    pub fn clamp_area_ratio(&self, area_ratio: f64) -> (f64, bool) {
        clamp_to_range(area_ratio, self.frozen_area_ratio, f64::INFINITY)
    }

    pub fn validate(&self) -> PropertyResult<()> {
        if !(self.of_lean.is_finite() && self.of_rich.is_finite())
            || self.of_lean <= 0.0
            || self.of_lean > self.of_rich
        {
            return Err(PropertyError::InvalidArg {
                what: "O/F limits must satisfy 0 < lean <= rich",
            });
        }
        let low = self.chamber_pressure_low.value;
        let high = self.chamber_pressure_high.value;
        if !(low.is_finite() && high.is_finite()) || low <= 0.0 || low > high {
            return Err(PropertyError::InvalidArg {
                what: "chamber pressure limits must satisfy 0 < low <= high",
            });
        }
        if !self.frozen_area_ratio.is_finite() || self.frozen_area_ratio < 1.0 {
            return Err(PropertyError::InvalidArg {
                what: "frozen area ratio must be >= 1",
            });
        }
        Ok(())
    }
}

/// Which side of the temperature peak a gas generator runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasGeneratorRichness {
    #[default]
    FuelRich,
    OxidizerRich,
}

/// Curve fit of the combustion products used by the surrogate provider.
///
/// Chamber temperature is a bell curve in `ln(O/F)`:
///
/// ```text
/// T(OF, p) = T_base + (T_peak·(p/p_ref)^n - T_base) · exp(-ln(OF/OF_peak)² / (2w²))
/// ```
///
/// Molar mass grows linearly with O/F (capped), gamma interpolates linearly in
/// temperature between `gamma_cold` at `T_base` and `gamma_hot` at `T_peak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombustionFit {
    pub peak_of: f64,
    pub peak_temperature_k: f64,
    pub base_temperature_k: f64,
    pub log_width: f64,
    pub reference_pressure_mpa: f64,
    #[serde(default)]
    pub pressure_exponent: f64,
    pub molar_mass_base: f64,
    pub molar_mass_slope: f64,
    pub molar_mass_max: f64,
    pub gamma_hot: f64,
    pub gamma_cold: f64,
}

/// A bipropellant mixture as stored in the catalog and in project files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureDef {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub oxidizer: String,
    pub fuel: String,
    pub oxidizer_density_kg_m3: f64,
    pub fuel_density_kg_m3: f64,
    pub of_lean: f64,
    pub of_rich: f64,
    pub nominal_of: f64,
    pub chamber_pressure_low_mpa: f64,
    pub chamber_pressure_high_mpa: f64,
    pub frozen_area_ratio: f64,
    pub frozen_mach: f64,
    pub combustion: CombustionFit,
}

impl MixtureDef {
    pub fn limits(&self) -> MixtureLimits {
        MixtureLimits {
            of_lean: self.of_lean,
            of_rich: self.of_rich,
            chamber_pressure_low: mpa(self.chamber_pressure_low_mpa),
            chamber_pressure_high: mpa(self.chamber_pressure_high_mpa),
            frozen_area_ratio: self.frozen_area_ratio,
        }
    }

    /// True if `name` is the mixture name or one of its aliases (case-insensitive).
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub fn validate(&self) -> PropertyResult<()> {
        if self.name.trim().is_empty() {
            return Err(PropertyError::InvalidArg {
                what: "mixture name must not be empty",
            });
        }
        self.limits().validate()?;
        if !(self.of_lean..=self.of_rich).contains(&self.nominal_of) {
            return Err(PropertyError::OutOfRange {
                what: "nominal O/F",
                value: self.nominal_of,
            });
        }
        for (value, what) in [
            (self.oxidizer_density_kg_m3, "oxidizer density must be positive"),
            (self.fuel_density_kg_m3, "fuel density must be positive"),
            (self.frozen_mach, "frozen Mach number must be positive"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PropertyError::InvalidArg { what });
            }
        }

        let fit = &self.combustion;
        for (value, what) in [
            (fit.peak_of, "peak O/F must be positive"),
            (fit.log_width, "log width must be positive"),
            (
                fit.reference_pressure_mpa,
                "reference pressure must be positive",
            ),
            (fit.molar_mass_base, "molar mass base must be positive"),
            (fit.molar_mass_max, "molar mass cap must be positive"),
            (fit.base_temperature_k, "base temperature must be positive"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PropertyError::InvalidArg { what });
            }
        }
        if fit.peak_temperature_k <= fit.base_temperature_k {
            return Err(PropertyError::InvalidArg {
                what: "peak temperature must exceed base temperature",
            });
        }
        if fit.gamma_hot <= 1.0 || fit.gamma_cold <= 1.0 {
            return Err(PropertyError::InvalidArg {
                what: "gamma fit values must exceed 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_core::units::in_mpa;

    fn limits() -> MixtureLimits {
        MixtureLimits {
            of_lean: 1.5,
            of_rich: 3.2,
            chamber_pressure_low: mpa(0.25),
            chamber_pressure_high: mpa(50.0),
            frozen_area_ratio: 1.6,
        }
    }

    #[test]
    fn of_ratio_clamps_to_nearest_bound() {
        let l = limits();
        assert_eq!(l.clamp_of_ratio(0.5), (1.5, true));
        assert_eq!(l.clamp_of_ratio(9.0), (3.2, true));
        assert_eq!(l.clamp_of_ratio(2.3), (2.3, false));
    }

    #[test]
    fn pressure_clamps_to_limits() {
        let l = limits();
        let (p, clamped) = l.clamp_chamber_pressure(mpa(80.0));
        assert!(clamped);
        assert!((in_mpa(p) - 50.0).abs() < 1e-9);

        let (p, clamped) = l.clamp_chamber_pressure(mpa(10.0));
        assert!(!clamped);
        assert!((in_mpa(p) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn area_ratio_only_has_lower_bound() {
        let l = limits();
        assert_eq!(l.clamp_area_ratio(1.0), (1.6, true));
        assert_eq!(l.clamp_area_ratio(250.0), (250.0, false));
    }

    #[test]
    fn inverted_limits_are_invalid() {
        let mut l = limits();
        l.of_lean = 4.0;
        assert!(l.validate().is_err());
    }
}
