//! Turn project definitions into configured calculators.

use crate::ProjectResult;
use crate::schema::{CycleDef, EngineDef, Project};
use pe_components::SizingParameters;
use pe_core::units::{k, m, mpa};
use pe_engine::{EngineCalculator, EngineError, GasGeneratorCycle, PowerCycle};
use pe_properties::MixtureCatalog;

/// Built-in mixtures extended with the project's own definitions.
pub fn build_catalog(project: &Project) -> ProjectResult<MixtureCatalog> {
    let mut catalog = MixtureCatalog::builtin();
    for def in &project.mixtures {
        catalog.insert(def.clone()).map_err(EngineError::from)?;
    }
    Ok(catalog)
}

/// Power cycle for a cycle definition, overrides applied on top of defaults.
pub fn power_cycle(def: &CycleDef) -> PowerCycle {
    match def {
        CycleDef::None => PowerCycle::NoCycle,
        CycleDef::GasGenerator {
            turbine_inlet_temperature_k,
            richness,
            pump_efficiency,
            turbine_efficiency,
            turbine_back_pressure_mpa,
            max_bleed_fraction,
        } => {
            let mut cycle = GasGeneratorCycle::default();
            if let Some(t) = turbine_inlet_temperature_k {
                cycle.turbine_inlet_temperature = k(*t);
            }
            if let Some(r) = richness {
                cycle.richness = *r;
            }
            if let Some(eta) = pump_efficiency {
                cycle.pump_efficiency = *eta;
            }
            if let Some(eta) = turbine_efficiency {
                cycle.turbine_efficiency = *eta;
            }
            if let Some(p) = turbine_back_pressure_mpa {
                cycle.turbine_back_pressure = mpa(*p);
            }
            if let Some(f) = max_bleed_fraction {
                cycle.max_bleed_fraction = *f;
            }
            PowerCycle::GasGenerator(cycle)
        }
    }
}

/// Configure a calculator for one engine.
///
/// The minimum throttle is applied before the engine properties so the first
/// recompute already uses the matching injector drop. Clamp records from both
/// setters end up on the calculator.
pub fn build_calculator(engine: &EngineDef, catalog: &MixtureCatalog) -> ProjectResult<EngineCalculator> {
    let mixture = catalog.model(&engine.mixture).map_err(EngineError::from)?;

    let mut sizing = SizingParameters::default();
    if let Some(material) = &engine.material {
        sizing.material = material.clone();
    }

    let mut calc = EngineCalculator::new(power_cycle(&engine.cycle)).with_sizing(sizing);
    calc.set_min_throttle(engine.min_throttle)?;

    let of_ratio = engine.of_ratio.unwrap_or_else(|| mixture.nominal_of_ratio());
    calc.set_engine_properties(
        mixture,
        of_ratio,
        mpa(engine.chamber_pressure_mpa),
        engine.area_ratio,
        m(engine.throat_diameter_m),
    )?;

    tracing::debug!(
        engine = %engine.id,
        calculator = calc.calculator_type(),
        revision = calc.revision(),
        "engine built"
    );
    Ok(calc)
}
