//! Combustion-gas property provider trait.

use crate::error::PropertyResult;
use crate::gas_state::CombustionGasState;
use crate::mixture::{GasGeneratorRichness, MixtureLimits};
use pe_core::units::{Density, Pressure, Temperature};
use std::fmt;
use std::sync::Arc;

/// Trait for bipropellant property providers.
///
/// Implementations must be deterministic and side-effect free: the engine
/// calculators call them synchronously during every recompute and assume the same
/// inputs always give the same gas state.
pub trait PropellantModel: Send + Sync + fmt::Debug {
    /// Mixture name (for display/logging).
    fn name(&self) -> &str;

    /// Admissible chamber envelope used to clamp engine configurations.
    fn limits(&self) -> MixtureLimits;

    /// O/F ratio a new engine starts at.
    fn nominal_of_ratio(&self) -> f64 {
        let limits = self.limits();
        0.5 * (limits.of_lean + limits.of_rich)
    }

    /// Chamber gas for a given O/F ratio and chamber pressure.
    fn state_at_ratio_and_pressure(
        &self,
        of_ratio: f64,
        chamber_pressure: Pressure,
    ) -> PropertyResult<CombustionGasState>;

    /// Gas burning at `pressure` with the O/F chosen so that the flame
    /// temperature equals `temperature`, on the requested side of the peak.
    ///
    /// Used for gas generators and preburners.
    fn state_at_pressure_and_temperature(
        &self,
        pressure: Pressure,
        temperature: Temperature,
        richness: GasGeneratorRichness,
    ) -> PropertyResult<CombustionGasState>;

    /// Liquid oxidizer density at pump inlet.
    fn oxidizer_density(&self) -> Density;

    /// Liquid fuel density at pump inlet.
    fn fuel_density(&self) -> Density;
}

/// Shared handle to a provider; engines compare mixtures by handle identity.
pub type SharedPropellant = Arc<dyn PropellantModel>;

/// Input validation helpers shared by the providers.
pub(crate) mod validation {
    use crate::error::PropertyResult;
    use pe_core::numeric::ensure_positive;
    use pe_core::units::{Pressure, Temperature};

    pub fn validate_of_ratio(of_ratio: f64) -> PropertyResult<()> {
        ensure_positive(of_ratio, "O/F ratio must be positive and finite")?;
        Ok(())
    }

    pub fn validate_pressure(p: Pressure) -> PropertyResult<()> {
        ensure_positive(p.value, "pressure must be positive and finite")?;
        Ok(())
    }

    pub fn validate_temperature(t: Temperature) -> PropertyResult<()> {
        ensure_positive(t.value, "temperature must be positive and finite")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use pe_core::units::{k, mpa, pa};

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(mpa(10.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(k(1000.0)).is_ok());
        assert!(validate_temperature(k(-10.0)).is_err());
        assert!(validate_temperature(k(0.0)).is_err());
    }

    #[test]
    fn validate_of_ratio_positive() {
        assert!(validate_of_ratio(2.3).is_ok());
        assert!(validate_of_ratio(0.0).is_err());
        assert!(validate_of_ratio(f64::INFINITY).is_err());
    }
}
