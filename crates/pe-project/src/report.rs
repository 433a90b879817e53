//! Serializable engine results.
//!
//! Quantities are flattened to plain numbers with the unit in the field name.

use crate::ProjectResult;
use crate::build::build_calculator;
use crate::schema::EngineDef;
use pe_core::units::in_mpa;
use pe_engine::{ClampedInput, EngineCalculator, EngineError, TurbineCycleState};
use pe_properties::MixtureCatalog;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineReport {
    pub id: String,
    pub calculator: String,
    pub revision: u64,
    pub mixture: String,
    pub of_ratio: f64,
    pub overall_of_ratio: f64,
    pub chamber_pressure_mpa: f64,
    pub chamber_temperature_k: f64,
    pub area_ratio: f64,
    pub throat_diameter_m: f64,
    pub nozzle_diameter_m: f64,
    pub min_throttle: f64,
    pub injector_drop_ratio: f64,
    pub chamber_mass_flow_kg_s: f64,
    pub total_mass_flow_kg_s: f64,
    pub thrust_vacuum_n: f64,
    pub thrust_sea_level_n: f64,
    pub min_thrust_vacuum_n: f64,
    pub isp_vacuum_s: f64,
    pub isp_sea_level_s: f64,
    pub exit_pressure_mpa: f64,
    pub exit_temperature_k: f64,
    pub exit_mach: f64,
    pub exhaust_velocity_m_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbine: Option<TurbineReport>,
    pub geometry: GeometryReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clamps: Vec<ClampReport>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TurbineReport {
    pub mass_flow_kg_s: f64,
    pub power_kw: f64,
    pub pressure_ratio: f64,
    pub inlet_temperature_k: f64,
    pub gas_generator_of_ratio: f64,
    pub oxidizer_pump_rise_mpa: f64,
    pub fuel_pump_rise_mpa: f64,
    pub oxidizer_pump_power_kw: f64,
    pub fuel_pump_power_kw: f64,
}

impl From<&TurbineCycleState> for TurbineReport {
    fn from(t: &TurbineCycleState) -> Self {
        Self {
            mass_flow_kg_s: t.mass_flow.value,
            power_kw: t.power.value / 1000.0,
            pressure_ratio: t.pressure_ratio,
            inlet_temperature_k: t.inlet_temperature.value,
            gas_generator_of_ratio: t.gas_generator_of_ratio,
            oxidizer_pump_rise_mpa: in_mpa(t.oxidizer_pump_rise),
            fuel_pump_rise_mpa: in_mpa(t.fuel_pump_rise),
            oxidizer_pump_power_kw: t.oxidizer_pump_power.value / 1000.0,
            fuel_pump_power_kw: t.fuel_pump_power.value / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeometryReport {
    pub material: String,
    pub chamber_diameter_m: f64,
    pub chamber_length_m: f64,
    pub chamber_volume_m3: f64,
    pub chamber_mass_kg: f64,
    pub nozzle_mass_kg: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClampReport {
    pub field: String,
    pub requested: f64,
    pub applied: f64,
}

impl From<&ClampedInput> for ClampReport {
    fn from(c: &ClampedInput) -> Self {
        Self {
            field: c.field.to_string(),
            requested: c.requested,
            applied: c.applied,
        }
    }
}

impl EngineReport {
    /// Report of the calculator's published snapshot, if it has one.
    pub fn from_calculator(id: &str, calc: &EngineCalculator) -> Option<Self> {
        let snap = calc.snapshot()?;
        let config = &snap.configuration;
        let perf = &snap.performance;
        let geometry = &snap.geometry;
        Some(Self {
            id: id.to_string(),
            calculator: calc.calculator_type().to_string(),
            revision: snap.revision,
            mixture: config.mixture_name().to_string(),
            of_ratio: config.of_ratio,
            overall_of_ratio: snap.mass_flow.overall_of_ratio,
            chamber_pressure_mpa: in_mpa(config.chamber_pressure),
            chamber_temperature_k: snap.chamber_gas.chamber_temperature.value,
            area_ratio: config.area_ratio,
            throat_diameter_m: config.throat_diameter.value,
            nozzle_diameter_m: perf.nozzle_diameter.value,
            min_throttle: snap.min_throttle,
            injector_drop_ratio: snap.injector_drop_ratio,
            chamber_mass_flow_kg_s: snap.mass_flow.chamber_total.value,
            total_mass_flow_kg_s: snap.mass_flow.total.value,
            thrust_vacuum_n: perf.thrust_vacuum.value,
            thrust_sea_level_n: perf.thrust_sea_level.value,
            min_thrust_vacuum_n: perf.min_thrust_vacuum.value,
            isp_vacuum_s: perf.isp_vacuum.value,
            isp_sea_level_s: perf.isp_sea_level.value,
            exit_pressure_mpa: in_mpa(perf.exit_pressure),
            exit_temperature_k: perf.exit_temperature.value,
            exit_mach: perf.exit_mach,
            exhaust_velocity_m_s: perf.exhaust_velocity.value,
            turbine: snap.turbine.as_ref().map(TurbineReport::from),
            geometry: GeometryReport {
                material: geometry.material.name.to_string(),
                chamber_diameter_m: geometry.chamber_diameter.value,
                chamber_length_m: geometry.chamber_length.value,
                chamber_volume_m3: geometry.chamber_volume.value,
                chamber_mass_kg: geometry.chamber_mass.value,
                nozzle_mass_kg: geometry.nozzle_mass.value,
            },
            clamps: calc.clamps().iter().map(ClampReport::from).collect(),
        })
    }
}

/// Build and evaluate one engine.
pub fn run_engine(engine: &EngineDef, catalog: &MixtureCatalog) -> ProjectResult<EngineReport> {
    let calc = build_calculator(engine, catalog)?;
    EngineReport::from_calculator(&engine.id, &calc).ok_or_else(|| {
        EngineError::InvalidArg {
            what: "engine produced no results",
        }
        .into()
    })
}

/// One point of an area-ratio sweep.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SweepPoint {
    pub area_ratio: f64,
    pub thrust_vacuum_n: f64,
    pub thrust_sea_level_n: f64,
    pub isp_vacuum_s: f64,
    pub isp_sea_level_s: f64,
    pub exit_pressure_mpa: f64,
}

/// Evaluate an engine over `steps` evenly spaced area ratios in `[from, to]`.
///
/// One calculator is reused; each point is a regular configuration update.
pub fn sweep_area_ratio(
    engine: &EngineDef,
    catalog: &MixtureCatalog,
    from: f64,
    to: f64,
    steps: usize,
) -> ProjectResult<Vec<SweepPoint>> {
    if steps < 2 || !from.is_finite() || !to.is_finite() || from <= 0.0 || to <= from {
        return Err(EngineError::InvalidArg {
            what: "sweep needs at least two steps over an increasing positive range",
        }
        .into());
    }

    let mut calc = build_calculator(engine, catalog)?;
    let config = calc
        .configuration()
        .cloned()
        .ok_or(EngineError::InvalidArg {
            what: "engine produced no results",
        })?;

    let mut points = Vec::with_capacity(steps);
    for i in 0..steps {
        let area_ratio = from + (to - from) * i as f64 / (steps - 1) as f64;
        calc.set_engine_properties(
            config.mixture.clone(),
            config.of_ratio,
            config.chamber_pressure,
            area_ratio,
            config.throat_diameter,
        )?;
        let Some(snap) = calc.snapshot() else {
            continue;
        };
        let perf = &snap.performance;
        points.push(SweepPoint {
            area_ratio: snap.configuration.area_ratio,
            thrust_vacuum_n: perf.thrust_vacuum.value,
            thrust_sea_level_n: perf.thrust_sea_level.value,
            isp_vacuum_s: perf.isp_vacuum.value,
            isp_sea_level_s: perf.isp_sea_level.value,
            exit_pressure_mpa: in_mpa(perf.exit_pressure),
        });
    }
    Ok(points)
}
