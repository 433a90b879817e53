//! Engine configuration, feed system constants and input clamping.

use crate::error::{EngineError, EngineResult};
use pe_core::units::{Length, Pressure, in_mpa, mpa};
use pe_properties::{MixtureLimits, SharedPropellant};
use std::fmt;
use std::sync::Arc;

/// Inputs of one engine design point.
///
/// Values are always stored clamped to the mixture's limits.
#[derive(Clone)]
pub struct EngineConfiguration {
    pub mixture: SharedPropellant,
    pub of_ratio: f64,
    pub chamber_pressure: Pressure,
    /// Nozzle exit area over throat area
    pub area_ratio: f64,
    pub throat_diameter: Length,
}

impl EngineConfiguration {
    pub fn mixture_name(&self) -> &str {
        self.mixture.name()
    }
}

impl PartialEq for EngineConfiguration {
    /// Field-by-field equality; mixtures compare by provider identity.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.mixture, &other.mixture)
            && self.of_ratio == other.of_ratio
            && self.chamber_pressure == other.chamber_pressure
            && self.area_ratio == other.area_ratio
            && self.throat_diameter == other.throat_diameter
    }
}

impl fmt::Debug for EngineConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfiguration")
            .field("mixture", &self.mixture.name())
            .field("of_ratio", &self.of_ratio)
            .field("chamber_pressure_mpa", &in_mpa(self.chamber_pressure))
            .field("area_ratio", &self.area_ratio)
            .field("throat_diameter_m", &self.throat_diameter.value)
            .finish()
    }
}

/// Configuration field that can be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    OfRatio,
    ChamberPressure,
    AreaRatio,
    MinThrottle,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigField::OfRatio => "O/F ratio",
            ConfigField::ChamberPressure => "chamber pressure [MPa]",
            ConfigField::AreaRatio => "area ratio",
            ConfigField::MinThrottle => "minimum throttle",
        };
        f.write_str(name)
    }
}

/// A requested input that was moved into its admissible range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedInput {
    pub field: ConfigField,
    pub requested: f64,
    pub applied: f64,
}

impl ClampedInput {
    pub(crate) fn record(
        clamps: &mut Vec<ClampedInput>,
        field: ConfigField,
        requested: f64,
        applied: f64,
        clamped: bool,
    ) {
        if clamped {
            tracing::debug!(%field, requested, applied, "input clamped");
            clamps.push(ClampedInput {
                field,
                requested,
                applied,
            });
        }
    }
}

/// Build a clamped configuration from raw inputs.
///
/// Non-finite inputs and a non-positive throat diameter are rejected; everything
/// else is clamped into the mixture's limits.
pub(crate) fn clamp_configuration(
    mixture: SharedPropellant,
    of_ratio: f64,
    chamber_pressure: Pressure,
    area_ratio: f64,
    throat_diameter: Length,
) -> EngineResult<(EngineConfiguration, Vec<ClampedInput>)> {
    for (value, what) in [
        (of_ratio, "O/F ratio must be finite"),
        (chamber_pressure.value, "chamber pressure must be finite"),
        (area_ratio, "area ratio must be finite"),
    ] {
        if !value.is_finite() {
            return Err(EngineError::InvalidArg { what });
        }
    }
    if !throat_diameter.value.is_finite() || throat_diameter.value <= 0.0 {
        return Err(EngineError::InvalidArg {
            what: "throat diameter must be positive",
        });
    }

    let limits: MixtureLimits = mixture.limits();
    let mut clamps = Vec::new();

    let (of_applied, clamped) = limits.clamp_of_ratio(of_ratio);
    ClampedInput::record(&mut clamps, ConfigField::OfRatio, of_ratio, of_applied, clamped);

    let (pressure_applied, clamped) = limits.clamp_chamber_pressure(chamber_pressure);
    ClampedInput::record(
        &mut clamps,
        ConfigField::ChamberPressure,
        in_mpa(chamber_pressure),
        in_mpa(pressure_applied),
        clamped,
    );

    let (area_applied, clamped) = limits.clamp_area_ratio(area_ratio);
    ClampedInput::record(&mut clamps, ConfigField::AreaRatio, area_ratio, area_applied, clamped);

    let config = EngineConfiguration {
        mixture,
        of_ratio: of_applied,
        chamber_pressure: pressure_applied,
        area_ratio: area_applied,
        throat_diameter,
    };
    Ok((config, clamps))
}

/// Propellant feed assumptions shared by the turbopump cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedSystem {
    /// Injector pressure drop as a fraction of chamber pressure
    pub injector_drop_ratio: f64,
    /// Regenerative cooling pressure drop, fuel side only
    pub regen_drop_ratio: f64,
    pub tank_pressure: Pressure,
}

impl Default for FeedSystem {
    fn default() -> Self {
        Self {
            injector_drop_ratio: 0.3,
            regen_drop_ratio: 0.15,
            tank_pressure: mpa(0.2),
        }
    }
}

impl FeedSystem {
    /// Oxidizer pump rise: `p_c·(1 + inj) - p_tank`.
    pub fn oxidizer_pump_rise(&self, chamber_pressure: Pressure) -> Pressure {
        chamber_pressure * (1.0 + self.injector_drop_ratio) - self.tank_pressure
    }

    /// Fuel pump rise: `p_c·(1 + inj)·(1 + regen) - p_tank`.
    pub fn fuel_pump_rise(&self, chamber_pressure: Pressure) -> Pressure {
        chamber_pressure * (1.0 + self.injector_drop_ratio) * (1.0 + self.regen_drop_ratio)
            - self.tank_pressure
    }
}
