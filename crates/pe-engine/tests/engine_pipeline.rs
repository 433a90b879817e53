//! End-to-end recompute pipeline tests.

use pe_core::units::{k, m, mpa};
use pe_engine::{EngineCalculator, EngineError, GasGeneratorCycle, PowerCycle, Recompute};
use pe_properties::{FixedGasModel, MixtureCatalog, SharedPropellant};
use pe_solver::SolverError;
use std::sync::Arc;

fn reference_gas() -> SharedPropellant {
    Arc::new(FixedGasModel::new(1.2, 22.0, k(3500.0)))
}

fn reference_engine(cycle: PowerCycle, area_ratio: f64) -> EngineCalculator {
    EngineCalculator::with_engine(cycle, reference_gas(), 2.3, mpa(10.0), area_ratio, m(0.1))
        .unwrap()
}

#[test]
fn reference_scenario() {
    let calc = reference_engine(PowerCycle::NoCycle, 30.0);
    let snap = calc.snapshot().unwrap();

    // A_t·p_c·sqrt(γ·Mw/(R·Tc)·(2/(γ+1))^((γ+1)/(γ-1)))
    let chamber_flow = snap.mass_flow.chamber_total.value;
    assert!((chamber_flow - 44.3).abs() < 0.2, "chamber flow {chamber_flow}");

    let perf = &snap.performance;
    assert!(perf.exit_mach > snap.chamber_gas.nozzle_mach);
    assert!(perf.isp_vacuum > perf.isp_sea_level);
    assert!(perf.thrust_vacuum > perf.thrust_sea_level);
    assert!(perf.exit_pressure.value > 0.0);
    assert!(perf.exit_pressure < snap.chamber_gas.nozzle_pressure);
    assert!((perf.exit_area.value / perf.throat_area.value - 30.0).abs() < 1e-9);
}

#[test]
fn vacuum_thrust_grows_with_area_ratio() {
    let mixture = reference_gas();
    let mut calc = EngineCalculator::new(PowerCycle::NoCycle);
    let mut previous = 0.0;
    for area_ratio in [2.0, 5.0, 10.0, 20.0, 40.0, 80.0] {
        calc.set_engine_properties(mixture.clone(), 2.3, mpa(10.0), area_ratio, m(0.1))
            .unwrap();
        let thrust = calc.performance().unwrap().thrust_vacuum.value;
        assert!(thrust > previous, "area ratio {area_ratio}: {thrust} <= {previous}");
        previous = thrust;
    }
}

#[test]
fn gas_generator_engine_loses_isp_to_turbine_exhaust() {
    let open = reference_engine(PowerCycle::NoCycle, 30.0);
    let gg = reference_engine(PowerCycle::default(), 30.0);
    let open_perf = open.performance().unwrap();
    let gg_perf = gg.performance().unwrap();
    assert!(gg_perf.thrust_vacuum > open_perf.thrust_vacuum);
    assert!(gg_perf.isp_vacuum < open_perf.isp_vacuum);
}

#[test]
fn repeated_identical_call_keeps_revision() {
    let mixture = reference_gas();
    let mut calc = EngineCalculator::gas_generator();
    let first = calc
        .set_engine_properties(mixture.clone(), 2.3, mpa(10.0), 30.0, m(0.1))
        .unwrap();
    assert_eq!(first, Recompute::Updated { revision: 1 });

    for _ in 0..3 {
        let again = calc
            .set_engine_properties(mixture.clone(), 2.3, mpa(10.0), 30.0, m(0.1))
            .unwrap();
        assert!(!again.changed());
    }
    assert_eq!(calc.revision(), 1);
}

#[test]
fn every_field_participates_in_change_detection() {
    let mixture = reference_gas();
    let other: SharedPropellant = Arc::new(FixedGasModel::new(1.2, 22.0, k(3500.0)));
    let mut calc = reference_engine(PowerCycle::NoCycle, 30.0);
    let edits: [(SharedPropellant, f64, f64, f64, f64); 5] = [
        (mixture.clone(), 2.3, 12.0, 30.0, 0.1),
        (mixture.clone(), 2.5, 12.0, 30.0, 0.1),
        (mixture.clone(), 2.5, 12.0, 35.0, 0.1),
        (mixture.clone(), 2.5, 12.0, 35.0, 0.12),
        (other, 2.5, 12.0, 35.0, 0.12),
    ];
    for (step, (mix, of, pc, ar, dt)) in edits.into_iter().enumerate() {
        let outcome = calc.set_engine_properties(mix, of, mpa(pc), ar, m(dt)).unwrap();
        assert_eq!(
            outcome,
            Recompute::Updated {
                revision: step as u64 + 2
            }
        );
    }
}

#[test]
fn doubling_chamber_pressure_increases_chamber_mass() {
    let mixture = reference_gas();
    let mut calc = reference_engine(PowerCycle::NoCycle, 30.0);
    let low = calc.geometry().unwrap().chamber_mass;
    calc.set_engine_properties(mixture, 2.3, mpa(20.0), 30.0, m(0.1))
        .unwrap();
    let high = calc.geometry().unwrap().chamber_mass;
    assert!((high.value / low.value - 2.0).abs() < 1e-9);
}

#[test]
fn builtin_mixture_clamps_and_reports() {
    let kerolox = MixtureCatalog::builtin().model("Kerosene_Lox").unwrap();
    let mut calc = EngineCalculator::gas_generator();
    calc.set_engine_properties(kerolox, 1.0, mpa(7.0), 1.0, m(0.2))
        .unwrap();
    let config = calc.configuration().unwrap();
    assert_eq!(config.of_ratio, 1.5);
    assert_eq!(config.area_ratio, 1.6);
    assert_eq!(calc.clamps().len(), 2);
}

#[test]
fn infeasible_turbine_bracket_keeps_published_state() {
    let mut calc = reference_engine(PowerCycle::default(), 30.0);
    let before = calc.snapshot().cloned().unwrap();
    let cycle_before = *calc.cycle();

    let starved = PowerCycle::GasGenerator(GasGeneratorCycle {
        max_bleed_fraction: 1e-4,
        ..Default::default()
    });
    let err = calc.set_cycle(starved).unwrap_err();
    assert!(matches!(
        err,
        EngineError::CycleSolve {
            source: SolverError::InvalidBracket { .. },
            ..
        }
    ));
    assert!(err.is_configuration_error());

    assert_eq!(calc.revision(), 1);
    assert_eq!(calc.snapshot().unwrap(), &before);
    assert_eq!(calc.configuration().unwrap(), &before.configuration);
    assert_eq!(calc.cycle(), &cycle_before);
}

#[test]
fn catalog_lookup_per_call_keeps_revision() {
    let catalog = MixtureCatalog::builtin();
    let mut calc = EngineCalculator::gas_generator();
    let set = |calc: &mut EngineCalculator| {
        calc.set_engine_properties(
            catalog.model("Kerosene_Lox").unwrap(),
            2.3,
            mpa(7.0),
            16.0,
            m(0.2),
        )
        .unwrap()
    };
    assert_eq!(set(&mut calc), Recompute::Updated { revision: 1 });
    assert_eq!(set(&mut calc), Recompute::Unchanged);
    assert_eq!(calc.revision(), 1);
}
