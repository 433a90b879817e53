//! Power cycle variants.

use crate::config::FeedSystem;
use crate::error::EngineResult;
use crate::gas_generator::GasGeneratorCycle;
use crate::state::TurbineCycleState;
use pe_components::ChamberSolution;
use pe_core::units::{MassRate, Pressure, kgps};
use pe_properties::PropellantModel;

/// How the propellants reach chamber pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerCycle {
    /// No turbopump (pressure-fed or analysis only)
    NoCycle,
    GasGenerator(GasGeneratorCycle),
}

impl Default for PowerCycle {
    fn default() -> Self {
        PowerCycle::GasGenerator(GasGeneratorCycle::default())
    }
}

/// Inputs every cycle receives from the chamber step.
#[derive(Debug, Clone, Copy)]
pub struct CycleInputs<'a> {
    pub mixture: &'a dyn PropellantModel,
    pub chamber: &'a ChamberSolution,
    pub of_ratio: f64,
    pub chamber_pressure: Pressure,
    pub feed: &'a FeedSystem,
}

/// What a cycle adds on top of the chamber flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub turbine: Option<TurbineCycleState>,
    /// Propellant consumed outside the main chamber
    pub additional_mass_flow: MassRate,
    /// O/F of the additional flow
    pub additional_of_ratio: f64,
}

impl CycleOutcome {
    fn none() -> Self {
        Self {
            turbine: None,
            additional_mass_flow: kgps(0.0),
            additional_of_ratio: 0.0,
        }
    }
}

impl PowerCycle {
    /// Display name of the calculator variant.
    pub fn calculator_type(&self) -> &'static str {
        match self {
            PowerCycle::NoCycle => "NULL",
            PowerCycle::GasGenerator(_) => "Gas Generator",
        }
    }

    pub fn compute_cycle(&self, inputs: &CycleInputs<'_>) -> EngineResult<CycleOutcome> {
        match self {
            PowerCycle::NoCycle => Ok(CycleOutcome::none()),
            PowerCycle::GasGenerator(cycle) => {
                let solution = cycle.solve(
                    inputs.mixture,
                    &inputs.chamber.flow,
                    inputs.of_ratio,
                    inputs.chamber_pressure,
                    inputs.feed,
                )?;
                Ok(CycleOutcome {
                    turbine: Some(solution.turbine),
                    additional_mass_flow: solution.turbine.mass_flow,
                    additional_of_ratio: solution.turbine.gas_generator_of_ratio,
                })
            }
        }
    }
}
