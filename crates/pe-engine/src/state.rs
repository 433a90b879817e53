//! Derived engine state published after each successful recompute.

use crate::config::EngineConfiguration;
use pe_components::GeometrySizing;
use pe_core::units::{Area, Force, Length, MassRate, Power, Pressure, Temperature, Time, Velocity};
use pe_properties::CombustionGasState;

/// Main chamber and total engine mass flows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassFlowState {
    pub chamber_total: MassRate,
    pub chamber_oxidizer: MassRate,
    pub chamber_fuel: MassRate,
    /// Chamber flow plus any turbine drive flow
    pub total: MassRate,
    /// Flow-weighted O/F of everything the engine consumes
    pub overall_of_ratio: f64,
}

/// Turbopump operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineCycleState {
    pub pressure_ratio: f64,
    pub inlet_temperature: Temperature,
    pub mass_flow: MassRate,
    /// Gas power taken in by the turbine
    pub power: Power,
    pub gas_generator_of_ratio: f64,
    pub oxidizer_pump_rise: Pressure,
    pub fuel_pump_rise: Pressure,
    pub oxidizer_pump_power: Power,
    pub fuel_pump_power: Power,
}

/// Engine performance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceResult {
    pub thrust_vacuum: Force,
    pub thrust_sea_level: Force,
    pub isp_vacuum: Time,
    pub isp_sea_level: Time,
    pub exit_pressure: Pressure,
    pub exit_temperature: Temperature,
    pub exit_mach: f64,
    pub exhaust_velocity: Velocity,
    pub throat_area: Area,
    pub exit_area: Area,
    pub nozzle_diameter: Length,
    pub min_thrust_vacuum: Force,
}

/// Everything one recompute produced, replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    /// Recompute counter, bumped once per successful recompute
    pub revision: u64,
    pub configuration: EngineConfiguration,
    pub min_throttle: f64,
    pub injector_drop_ratio: f64,
    pub chamber_gas: CombustionGasState,
    pub mass_flow: MassFlowState,
    pub turbine: Option<TurbineCycleState>,
    pub performance: PerformanceResult,
    pub geometry: GeometrySizing,
}
