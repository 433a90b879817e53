//! Gas-generator cycle: turbine flow that balances pump power.
//!
//! A small fraction of the propellant is burned in a gas generator at chamber
//! pressure and a fixed turbine inlet temperature. The turbine exhausts
//! overboard against a fixed back pressure and drives both pumps. The turbine
//! flow is the root of
//!
//! ```text
//! r(ṁ_t) = (P_ox(ṁ_t) + P_fuel(ṁ_t)) / (η_t · Δh_s) - ṁ_t
//! ```
//!
//! where the pump powers include the propellant burned in the gas generator.

use crate::config::FeedSystem;
use crate::error::{EngineError, EngineResult};
use crate::state::TurbineCycleState;
use pe_components::{ChamberFlow, Pump, Turbine};
use pe_core::units::{MassRate, Pressure, Temperature, in_mpa, k, kgps, mpa, w};
use pe_properties::{CombustionGasState, GasGeneratorRichness, PropellantModel};
use pe_solver::{BrentConfig, SolverError, brent_solve};

/// Gas-generator design constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasGeneratorCycle {
    pub turbine_inlet_temperature: Temperature,
    pub richness: GasGeneratorRichness,
    pub pump_efficiency: f64,
    pub turbine_efficiency: f64,
    /// Turbine exhaust pressure
    pub turbine_back_pressure: Pressure,
    /// Upper end of the turbine flow search, as a fraction of chamber flow
    pub max_bleed_fraction: f64,
    pub solver: BrentConfig,
}

impl Default for GasGeneratorCycle {
    fn default() -> Self {
        Self {
            turbine_inlet_temperature: k(1000.0),
            richness: GasGeneratorRichness::FuelRich,
            pump_efficiency: 0.8,
            turbine_efficiency: 0.7,
            turbine_back_pressure: mpa(0.2),
            max_bleed_fraction: 0.25,
            solver: BrentConfig {
                abs_tol: 1e-6,
                max_iterations: 200,
            },
        }
    }
}

/// Immutable inputs of the turbine balance residual.
#[derive(Debug, Clone, Copy)]
struct TurbineBalance {
    chamber_oxidizer: f64,
    chamber_fuel: f64,
    gas_generator_of: f64,
    /// Pump shaft power per unit propellant flow [W/(kg/s)]
    oxidizer_specific_power: f64,
    fuel_specific_power: f64,
    turbine_efficiency: f64,
    /// Isentropic turbine work [J/kg]
    specific_work: f64,
}

impl TurbineBalance {
    fn propellant_flows(&self, turbine_flow: f64) -> (f64, f64) {
        let gg_fuel = turbine_flow / (self.gas_generator_of + 1.0);
        let gg_oxidizer = gg_fuel * self.gas_generator_of;
        (
            self.chamber_oxidizer + gg_oxidizer,
            self.chamber_fuel + gg_fuel,
        )
    }

    fn pump_powers(&self, turbine_flow: f64) -> (f64, f64) {
        let (oxidizer, fuel) = self.propellant_flows(turbine_flow);
        (
            oxidizer * self.oxidizer_specific_power,
            fuel * self.fuel_specific_power,
        )
    }
}

fn turbine_balance_residual(turbine_flow: f64, balance: &TurbineBalance) -> f64 {
    let (oxidizer_power, fuel_power) = balance.pump_powers(turbine_flow);
    let turbine_power = (oxidizer_power + fuel_power) / balance.turbine_efficiency;
    turbine_power / balance.specific_work - turbine_flow
}

/// Result of a gas-generator balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasGeneratorSolution {
    pub turbine: TurbineCycleState,
    pub iterations: usize,
}

impl GasGeneratorCycle {
    pub fn validate(&self) -> EngineResult<()> {
        for (value, what) in [
            (self.pump_efficiency, "pump efficiency must be in (0,1]"),
            (self.turbine_efficiency, "turbine efficiency must be in (0,1]"),
            (self.max_bleed_fraction, "bleed fraction must be in (0,1]"),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(EngineError::InvalidArg { what });
            }
        }
        if !(self.turbine_inlet_temperature.value > 0.0) {
            return Err(EngineError::InvalidArg {
                what: "turbine inlet temperature must be positive",
            });
        }
        if !(self.turbine_back_pressure.value > 0.0) {
            return Err(EngineError::InvalidArg {
                what: "turbine back pressure must be positive",
            });
        }
        Ok(())
    }

    /// Solve the turbine flow for a chamber operating point.
    pub fn solve(
        &self,
        mixture: &dyn PropellantModel,
        chamber_flow: &ChamberFlow,
        chamber_of_ratio: f64,
        chamber_pressure: Pressure,
        feed: &FeedSystem,
    ) -> EngineResult<GasGeneratorSolution> {
        self.validate()?;

        let oxidizer_rise = feed.oxidizer_pump_rise(chamber_pressure);
        let fuel_rise = feed.fuel_pump_rise(chamber_pressure);
        let oxidizer_pump = Pump::new("oxidizer", oxidizer_rise, self.pump_efficiency)?;
        let fuel_pump = Pump::new("fuel", fuel_rise, self.pump_efficiency)?;

        let pressure_ratio = chamber_pressure.value / self.turbine_back_pressure.value;
        let turbine = Turbine::new("gas generator", self.turbine_efficiency, pressure_ratio)?;

        let gas: CombustionGasState = mixture.state_at_pressure_and_temperature(
            chamber_pressure,
            self.turbine_inlet_temperature,
            self.richness,
        )?;

        let unit_flow = kgps(1.0);
        let balance = TurbineBalance {
            chamber_oxidizer: chamber_flow.oxidizer.value,
            chamber_fuel: chamber_flow.fuel.value,
            gas_generator_of: gas.of_ratio,
            oxidizer_specific_power: oxidizer_pump
                .shaft_power(unit_flow, mixture.oxidizer_density())?
                .value,
            fuel_specific_power: fuel_pump.shaft_power(unit_flow, mixture.fuel_density())?.value,
            turbine_efficiency: self.turbine_efficiency,
            specific_work: turbine.specific_work(&gas),
        };
        if !(balance.specific_work > 0.0) {
            return Err(EngineError::InvalidArg {
                what: "turbine specific work must be positive",
            });
        }

        let bracket_lo = 0.0;
        let bracket_hi = self.max_bleed_fraction * chamber_flow.total.value;
        let wrap = |source: SolverError| EngineError::CycleSolve {
            of_ratio: chamber_of_ratio,
            chamber_pressure_mpa: in_mpa(chamber_pressure),
            bracket_lo,
            bracket_hi,
            source,
        };
        let solution = brent_solve(
            turbine_balance_residual,
            &balance,
            bracket_lo,
            bracket_hi,
            &self.solver,
        )
        .map_err(wrap)?;

        let turbine_flow = solution.x;
        let (oxidizer_power, fuel_power) = balance.pump_powers(turbine_flow);
        let turbine_power = turbine.gas_power(w(oxidizer_power + fuel_power));

        tracing::debug!(
            turbine_flow,
            bleed_fraction = turbine_flow / chamber_flow.total.value,
            turbine_power = turbine_power.value,
            iterations = solution.iterations,
            "gas generator balanced"
        );

        Ok(GasGeneratorSolution {
            turbine: TurbineCycleState {
                pressure_ratio,
                inlet_temperature: self.turbine_inlet_temperature,
                mass_flow: kgps(turbine_flow),
                power: turbine_power,
                gas_generator_of_ratio: gas.of_ratio,
                oxidizer_pump_rise: oxidizer_rise,
                fuel_pump_rise: fuel_rise,
                oxidizer_pump_power: w(oxidizer_power),
                fuel_pump_power: w(fuel_power),
            },
            iterations: solution.iterations,
        })
    }
}

/// Blend the chamber and turbine-drive O/F by mass flow.
pub fn overall_of_ratio(
    chamber_of: f64,
    chamber_flow: MassRate,
    bleed_of: f64,
    bleed_flow: MassRate,
) -> f64 {
    let total = chamber_flow.value + bleed_flow.value;
    if total <= 0.0 {
        return chamber_of;
    }
    chamber_of * chamber_flow.value / total + bleed_of * bleed_flow.value / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_properties::FixedGasModel;

    fn chamber_flow(total: f64, of: f64) -> ChamberFlow {
        ChamberFlow::split(kgps(total), of)
    }

    #[test]
    fn balanced_flow_zeroes_the_residual() {
        let model = FixedGasModel::default();
        let cycle = GasGeneratorCycle::default();
        let sol = cycle
            .solve(
                &model,
                &chamber_flow(100.0, 2.3),
                2.3,
                mpa(7.0),
                &FeedSystem::default(),
            )
            .unwrap();
        let mdot = sol.turbine.mass_flow.value;
        assert!(mdot > 0.0 && mdot < 25.0);

        let implied = sol.turbine.power.value
            / cycle_specific_work(&model, &cycle, mpa(7.0));
        assert!((implied - mdot).abs() < 1e-5);
    }

    fn cycle_specific_work(model: &FixedGasModel, cycle: &GasGeneratorCycle, pc: Pressure) -> f64 {
        let gas = model
            .state_at_pressure_and_temperature(pc, cycle.turbine_inlet_temperature, cycle.richness)
            .unwrap();
        let turbine = Turbine::new(
            "t",
            cycle.turbine_efficiency,
            pc.value / cycle.turbine_back_pressure.value,
        )
        .unwrap();
        turbine.specific_work(&gas)
    }

    #[test]
    fn pump_rises_follow_feed_system() {
        let model = FixedGasModel::default();
        let sol = GasGeneratorCycle::default()
            .solve(&model, &chamber_flow(100.0, 2.3), 2.3, mpa(10.0), &FeedSystem::default())
            .unwrap();
        assert!((in_mpa(sol.turbine.oxidizer_pump_rise) - 12.8).abs() < 1e-9);
        assert!((sol.turbine.pressure_ratio - 50.0).abs() < 1e-9);
        assert!(sol.turbine.fuel_pump_rise.value > sol.turbine.oxidizer_pump_rise.value);
    }

    #[test]
    fn hotter_turbine_needs_less_flow() {
        let model = FixedGasModel::default();
        let solve = |t: f64| {
            GasGeneratorCycle {
                turbine_inlet_temperature: k(t),
                ..GasGeneratorCycle::default()
            }
            .solve(&model, &chamber_flow(100.0, 2.3), 2.3, mpa(7.0), &FeedSystem::default())
            .unwrap()
            .turbine
            .mass_flow
            .value
        };
        assert!(solve(1100.0) < solve(1000.0));
        assert!(solve(1000.0) < solve(900.0));
    }

    #[test]
    fn insufficient_bleed_bound_is_invalid_bracket() {
        let model = FixedGasModel::default();
        let cycle = GasGeneratorCycle {
            max_bleed_fraction: 1e-4,
            ..GasGeneratorCycle::default()
        };
        let err = cycle
            .solve(&model, &chamber_flow(100.0, 2.3), 2.3, mpa(7.0), &FeedSystem::default())
            .unwrap_err();
        match err {
            EngineError::CycleSolve {
                of_ratio,
                bracket_hi,
                source: SolverError::InvalidBracket { .. },
                ..
            } => {
                assert_eq!(of_ratio, 2.3);
                assert!((bracket_hi - 0.01).abs() < 1e-12);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn oxidizer_rich_generator_uses_oxidizer_rich_gas() {
        let model = FixedGasModel::default();
        let sol = GasGeneratorCycle {
            richness: GasGeneratorRichness::OxidizerRich,
            ..GasGeneratorCycle::default()
        }
        .solve(&model, &chamber_flow(100.0, 2.3), 2.3, mpa(7.0), &FeedSystem::default())
        .unwrap();
        assert_eq!(
            sol.turbine.gas_generator_of_ratio,
            model.oxidizer_rich_gas.of_ratio
        );
    }

    #[test]
    fn overall_of_blend() {
        let of = overall_of_ratio(2.5, kgps(90.0), 0.5, kgps(10.0));
        assert!((of - 2.3).abs() < 1e-12);
        assert_eq!(overall_of_ratio(2.5, kgps(90.0), 0.5, kgps(0.0)), 2.5);
    }
}
