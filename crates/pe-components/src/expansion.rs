//! Supersonic nozzle expansion, thrust and specific impulse.
//!
//! The gas composition is frozen at the provider's nozzle station. Expansion past
//! that station is isentropic at the station's gamma and molar mass:
//!
//! 1. The provider's frozen area ratio is rescaled by the area ratio that the
//!    station's Mach number implies at this gamma, giving an effective exit area
//!    ratio for the configured nozzle.
//! 2. Exit Mach comes from the supersonic inverse of the area relation.
//! 3. Exit temperature and pressure follow from the isentropic ratios relative to
//!    the frozen station; exit velocity is exit Mach times the local sonic speed.
//!
//! ```text
//! F_vac = v_e·ṁ + p_e·A_e
//! F_sl  = v_e·ṁ + (p_e - p_sl)·A_e
//! Isp   = F / (ṁ·g0)
//! ```

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use crate::nozzle::{
    area_ratio_from_mach, isentropic_temperature_ratio, mach_from_area_ratio,
    pressure_ratio_from_temperature_ratio,
};
use pe_core::constants::{G0_MPS2, R_UNIVERSAL, sea_level_pressure};
use pe_core::units::{
    Area, Force, MassRate, Pressure, Temperature, Time, Velocity, k, mps, n, pa, s,
};
use pe_properties::CombustionGasState;

/// Nozzle exit conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitState {
    pub effective_frozen_area_ratio: f64,
    pub effective_exit_area_ratio: f64,
    pub mach: f64,
    pub temperature: Temperature,
    pub pressure: Pressure,
    pub sonic_velocity: Velocity,
    /// Optimum exhaust velocity
    pub velocity: Velocity,
}

/// Thrust and specific impulse at vacuum and sea level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NozzlePerformance {
    pub exit: ExitState,
    pub thrust_vacuum: Force,
    pub thrust_sea_level: Force,
    pub isp_vacuum: Time,
    pub isp_sea_level: Time,
    pub min_thrust_vacuum: Force,
}

/// Expand the frozen gas to the exit of a nozzle with area ratio `area_ratio`.
pub fn expand_to_exit(gas: &CombustionGasState, area_ratio: f64) -> ComponentResult<ExitState> {
    check_positive(area_ratio, "area ratio must be positive")?;
    let gamma = gas.gamma;

    let effective_frozen_area_ratio = area_ratio_from_mach(gas.nozzle_mach, gamma)?;
    let effective_exit_area_ratio =
        area_ratio * gas.frozen_area_ratio / effective_frozen_area_ratio;
    let mach = mach_from_area_ratio(effective_exit_area_ratio, gamma)?;

    let t_ratio = isentropic_temperature_ratio(gas.nozzle_mach, mach, gamma)?;
    let temperature = t_ratio * gas.nozzle_temperature.value;
    let pressure =
        pressure_ratio_from_temperature_ratio(t_ratio, gamma) * gas.nozzle_pressure.value;
    let sonic_velocity = (gamma * R_UNIVERSAL / gas.molar_mass * temperature).sqrt();
    let velocity = check_finite(sonic_velocity * mach, "exhaust velocity")?;

    Ok(ExitState {
        effective_frozen_area_ratio,
        effective_exit_area_ratio,
        mach,
        temperature: k(temperature),
        pressure: pa(pressure),
        sonic_velocity: mps(sonic_velocity),
        velocity: mps(velocity),
    })
}

/// Nozzle expansion for a given gas, geometry and flow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NozzleExpansion {
    pub area_ratio: f64,
    pub exit_area: Area,
    /// Total engine mass flow, including turbine bleed
    pub mass_flow: MassRate,
    /// Minimum throttle fraction in [0, 1]
    pub min_throttle: f64,
}

impl NozzleExpansion {
    pub fn evaluate(&self, gas: &CombustionGasState) -> ComponentResult<NozzlePerformance> {
        let mdot = check_positive(self.mass_flow.value, "mass flow must be positive")?;
        let exit = expand_to_exit(gas, self.area_ratio)?;

        let momentum = exit.velocity.value * mdot;
        let thrust_vacuum = momentum + exit.pressure.value * self.exit_area.value;
        let thrust_sea_level =
            momentum + (exit.pressure.value - sea_level_pressure().value) * self.exit_area.value;

        Ok(NozzlePerformance {
            exit,
            thrust_vacuum: n(thrust_vacuum),
            thrust_sea_level: n(thrust_sea_level),
            isp_vacuum: s(thrust_vacuum / (mdot * G0_MPS2)),
            isp_sea_level: s(thrust_sea_level / (mdot * G0_MPS2)),
            min_thrust_vacuum: n(thrust_vacuum * self.min_throttle),
        })
    }
}
