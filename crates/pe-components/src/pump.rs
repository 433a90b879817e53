//! Propellant pump power.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use pe_core::units::{Density, MassRate, Power, Pressure, w};

/// Turbopump-driven propellant pump.
///
/// ## Model
///
/// Incompressible liquid, constant efficiency:
///
/// ```text
/// P_shaft = ṁ · Δp / (ρ · η)
/// ```
///
/// `shaft_power()` returns a POSITIVE value (power consumed from the shaft).
#[derive(Clone, Debug, PartialEq)]
pub struct Pump {
    /// Component name for debugging
    pub name: String,
    /// Pressure rise from tank to discharge
    pub pressure_rise: Pressure,
    /// Pump efficiency (0 < eta <= 1)
    pub eta: f64,
}

impl Pump {
    /// Create a new pump.
    ///
    /// # Errors
    /// Returns error if the efficiency is outside (0, 1] or the pressure rise is
    /// negative.
    pub fn new(name: impl Into<String>, pressure_rise: Pressure, eta: f64) -> ComponentResult<Self> {
        if !(eta > 0.0 && eta <= 1.0) {
            return Err(ComponentError::InvalidArg {
                what: "pump efficiency must be in (0,1]",
            });
        }
        check_finite(pressure_rise.value, "pump pressure rise")?;
        if pressure_rise.value < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pump pressure rise cannot be negative",
            });
        }
        Ok(Self {
            name: name.into(),
            pressure_rise,
            eta,
        })
    }

    /// Shaft power needed to pump `mass_flow` of liquid at `density`.
    pub fn shaft_power(&self, mass_flow: MassRate, density: Density) -> ComponentResult<Power> {
        let rho = check_positive(density.value, "propellant density must be positive")?;
        let mdot = check_finite(mass_flow.value, "pump mass flow")?;
        Ok(w(mdot * self.pressure_rise.value / (rho * self.eta)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_core::units::{kg_per_m3, kgps, mpa};

    #[test]
    fn shaft_power_hand_calculation() {
        let pump = Pump::new("ox", mpa(10.0), 0.8).unwrap();
        let power = pump.shaft_power(kgps(100.0), kg_per_m3(1000.0)).unwrap();
        // 100 * 10e6 / (1000 * 0.8)
        assert!((power.value - 1.25e6).abs() < 1e-6);
    }

    #[test]
    fn zero_flow_needs_no_power() {
        let pump = Pump::new("fuel", mpa(5.0), 0.8).unwrap();
        let power = pump.shaft_power(kgps(0.0), kg_per_m3(820.0)).unwrap();
        assert_eq!(power.value, 0.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Pump::new("p", mpa(1.0), 0.0).is_err());
        assert!(Pump::new("p", mpa(1.0), 1.2).is_err());
        assert!(Pump::new("p", mpa(-1.0), 0.8).is_err());

        let pump = Pump::new("p", mpa(1.0), 0.8).unwrap();
        assert!(pump.shaft_power(kgps(1.0), kg_per_m3(0.0)).is_err());
    }
}
