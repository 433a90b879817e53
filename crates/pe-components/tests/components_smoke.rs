//! Integration tests for pe-components with the built-in property providers.

use pe_components::{
    CombustionChamber, NozzleExpansion, Pump, SizingParameters, Turbine, size_engine,
};
use pe_core::units::{k, kgps, m, mpa, w};
use pe_properties::{
    GasGeneratorRichness, MixtureCatalog, PropellantModel, StandardMaterials,
};

fn kerolox_chamber(area_ratio: f64) -> CombustionChamber {
    CombustionChamber {
        of_ratio: 2.3,
        chamber_pressure: mpa(7.0),
        area_ratio,
        throat_diameter: m(0.25),
    }
}

#[test]
fn kerolox_sea_level_engine() {
    let model = MixtureCatalog::builtin().model("Kerosene_Lox").unwrap();
    let chamber = kerolox_chamber(16.0).evaluate(model.as_ref()).unwrap();

    assert!(chamber.flow.total.value > 0.0);
    assert!(
        (chamber.flow.oxidizer.value / chamber.flow.fuel.value - 2.3).abs() < 1e-9,
        "split must keep the chamber O/F"
    );

    let perf = NozzleExpansion {
        area_ratio: 16.0,
        exit_area: chamber.exit_area,
        mass_flow: chamber.flow.total,
        min_throttle: 0.5,
    }
    .evaluate(&chamber.gas)
    .unwrap();

    assert!(perf.exit.mach > chamber.gas.nozzle_mach);
    assert!(perf.thrust_sea_level.value > 0.0);
    assert!(perf.isp_sea_level.value > 230.0 && perf.isp_sea_level.value < 340.0);
    assert!(perf.isp_vacuum.value > perf.isp_sea_level.value);
}

#[test]
fn hydrolox_outperforms_kerolox_in_vacuum() {
    let catalog = MixtureCatalog::builtin();
    let isp = |name: &str, of: f64| {
        let model = catalog.model(name).unwrap();
        let chamber = CombustionChamber {
            of_ratio: of,
            ..kerolox_chamber(40.0)
        }
        .evaluate(model.as_ref())
        .unwrap();
        NozzleExpansion {
            area_ratio: 40.0,
            exit_area: chamber.exit_area,
            mass_flow: chamber.flow.total,
            min_throttle: 1.0,
        }
        .evaluate(&chamber.gas)
        .unwrap()
        .isp_vacuum
        .value
    };
    assert!(isp("Hydrogen_Lox", 6.0) > isp("Kerosene_Lox", 2.3));
}

#[test]
fn turbine_drives_pumps_with_generator_gas() {
    let model = MixtureCatalog::builtin().model("Kerosene_Lox").unwrap();
    let gg = model
        .state_at_pressure_and_temperature(mpa(7.0), k(1000.0), GasGeneratorRichness::FuelRich)
        .unwrap();

    let ox_pump = Pump::new("ox", mpa(9.0), 0.8).unwrap();
    let fuel_pump = Pump::new("fuel", mpa(10.5), 0.8).unwrap();
    let demand = ox_pump
        .shaft_power(kgps(70.0), model.oxidizer_density())
        .unwrap()
        .value
        + fuel_pump
            .shaft_power(kgps(30.0), model.fuel_density())
            .unwrap()
            .value;

    let turbine = Turbine::new("gg", 0.7, 35.0).unwrap();
    let flow = turbine.mass_flow_for(w(demand), &gg).unwrap();
    assert!(flow.value > 0.0);
    assert!(flow.value < 10.0, "bleed should be a few percent of 100 kg/s");
}

#[test]
fn sizing_with_every_standard_material() {
    let throat = pe_components::chamber::circle_area(m(0.25));
    for material in StandardMaterials.all() {
        let params = SizingParameters {
            material: material.id.to_string(),
            ..SizingParameters::default()
        };
        let g = size_engine(throat, 16.0, mpa(7.0), &params, &StandardMaterials).unwrap();
        assert!(g.chamber_mass.value > 0.0, "{}", material.name);
        assert!(g.nozzle_mass.value > 0.0, "{}", material.name);
    }
}
