use pe_project::{build_catalog, load_yaml, run_engine, sweep_area_ratio};
use std::path::{Path, PathBuf};

fn projects_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../projects")
}

#[test]
fn bundled_projects_load_and_run() {
    for name in [
        "01_kerolox_gas_generator.yaml",
        "02_pressure_fed_and_custom_mixture.yaml",
    ] {
        let path = projects_dir().join(name);
        let project =
            load_yaml(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let catalog = build_catalog(&project).unwrap();
        for engine in &project.engines {
            let report = run_engine(engine, &catalog)
                .unwrap_or_else(|e| panic!("{}/{} failed: {}", name, engine.id, e));
            assert!(report.thrust_vacuum_n > report.thrust_sea_level_n);
            assert!(report.isp_vacuum_s > 0.0);
            assert!(report.geometry.chamber_mass_kg > 0.0);
        }
    }
}

#[test]
fn report_serializes_with_unit_suffixed_fields() {
    let project = load_yaml(&projects_dir().join("01_kerolox_gas_generator.yaml")).unwrap();
    let catalog = build_catalog(&project).unwrap();
    let report = run_engine(project.engine("booster").unwrap(), &catalog).unwrap();
    assert_eq!(report.calculator, "Gas Generator");
    assert!(report.turbine.is_some());

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["thrust_vacuum_n"].as_f64().unwrap() > 0.0);
    assert!(json["turbine"]["mass_flow_kg_s"].as_f64().unwrap() > 0.0);
    assert_eq!(json["geometry"]["material"], "Inconel 718");
}

#[test]
fn pressure_fed_engine_has_no_turbine() {
    let project =
        load_yaml(&projects_dir().join("02_pressure_fed_and_custom_mixture.yaml")).unwrap();
    let catalog = build_catalog(&project).unwrap();
    let report = run_engine(project.engine("pressure_fed").unwrap(), &catalog).unwrap();
    assert_eq!(report.calculator, "NULL");
    assert!(report.turbine.is_none());
    assert_eq!(report.chamber_mass_flow_kg_s, report.total_mass_flow_kg_s);
}

#[test]
fn area_ratio_sweep_is_monotonic_in_vacuum_thrust() {
    let project = load_yaml(&projects_dir().join("01_kerolox_gas_generator.yaml")).unwrap();
    let catalog = build_catalog(&project).unwrap();
    let points = sweep_area_ratio(project.engine("booster").unwrap(), &catalog, 5.0, 60.0, 12)
        .unwrap();
    assert_eq!(points.len(), 12);
    assert_eq!(points[0].area_ratio, 5.0);
    for pair in points.windows(2) {
        assert!(pair[1].thrust_vacuum_n > pair[0].thrust_vacuum_n);
    }
}

#[test]
fn sweep_rejects_degenerate_range() {
    let project = load_yaml(&projects_dir().join("01_kerolox_gas_generator.yaml")).unwrap();
    let catalog = build_catalog(&project).unwrap();
    let engine = project.engine("booster").unwrap();
    assert!(sweep_area_ratio(engine, &catalog, 10.0, 5.0, 4).is_err());
    assert!(sweep_area_ratio(engine, &catalog, 5.0, 10.0, 1).is_err());
}
