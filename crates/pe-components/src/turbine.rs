//! Gas turbine work extraction.

use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use pe_core::units::{MassRate, Power, kgps, w};
use pe_properties::CombustionGasState;

/// Turbine driving the propellant pumps.
///
/// ## Model
///
/// The drive gas enters at the gas state's chamber temperature and expands
/// isentropically through the pressure ratio `πt`:
///
/// ```text
/// Δh_s = cp · T_in · (1 - πt^-((γ-1)/γ))
/// P_gas = P_shaft / η
/// ṁ_t = P_gas / Δh_s
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Turbine {
    /// Component name for debugging
    pub name: String,
    /// Turbine efficiency (0 < eta <= 1)
    pub eta: f64,
    /// Inlet over outlet pressure
    pub pressure_ratio: f64,
}

impl Turbine {
    pub fn new(name: impl Into<String>, eta: f64, pressure_ratio: f64) -> ComponentResult<Self> {
        if !(eta > 0.0 && eta <= 1.0) {
            return Err(ComponentError::InvalidArg {
                what: "turbine efficiency must be in (0,1]",
            });
        }
        check_finite(pressure_ratio, "turbine pressure ratio")?;
        if pressure_ratio <= 1.0 {
            return Err(ComponentError::InvalidArg {
                what: "turbine pressure ratio must exceed 1",
            });
        }
        Ok(Self {
            name: name.into(),
            eta,
            pressure_ratio,
        })
    }

    /// Isentropic specific enthalpy drop of `gas` across the turbine [J/kg].
    pub fn specific_work(&self, gas: &CombustionGasState) -> f64 {
        let exponent = (gas.gamma - 1.0) / gas.gamma;
        gas.cp() * gas.chamber_temperature.value * (1.0 - self.pressure_ratio.powf(-exponent))
    }

    /// Gas power the turbine must take in to deliver `shaft_power`.
    pub fn gas_power(&self, shaft_power: Power) -> Power {
        w(shaft_power.value / self.eta)
    }

    /// Drive gas flow needed to deliver `shaft_power`.
    pub fn mass_flow_for(
        &self,
        shaft_power: Power,
        gas: &CombustionGasState,
    ) -> ComponentResult<MassRate> {
        let work = check_positive(self.specific_work(gas), "turbine specific work")?;
        let mdot = self.gas_power(shaft_power).value / work;
        Ok(kgps(check_finite(mdot, "turbine mass flow")?))
    }
}
