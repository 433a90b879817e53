use pe_project::schema::*;
use pe_project::{load, load_json, load_yaml, save_json, save_yaml, validate_project};
use pe_properties::GasGeneratorRichness;

fn sample_project() -> Project {
    Project {
        version: 1,
        name: "Roundtrip".to_string(),
        mixtures: vec![],
        engines: vec![
            EngineDef {
                id: "gg".to_string(),
                name: Some("Gas generator".to_string()),
                mixture: "Kerosene_Lox".to_string(),
                cycle: CycleDef::GasGenerator {
                    turbine_inlet_temperature_k: Some(1050.0),
                    richness: Some(GasGeneratorRichness::FuelRich),
                    pump_efficiency: None,
                    turbine_efficiency: Some(0.65),
                    turbine_back_pressure_mpa: None,
                    max_bleed_fraction: None,
                },
                of_ratio: Some(2.4),
                chamber_pressure_mpa: 8.0,
                area_ratio: 20.0,
                throat_diameter_m: 0.2,
                min_throttle: 0.5,
                material: Some("Inconel".to_string()),
            },
            EngineDef {
                id: "pf".to_string(),
                name: None,
                mixture: "Methane_Lox".to_string(),
                cycle: CycleDef::None,
                of_ratio: None,
                chamber_pressure_mpa: 2.0,
                area_ratio: 10.0,
                throat_diameter_m: 0.05,
                min_throttle: 1.0,
                material: None,
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_project() {
    let project = Project {
        version: 1,
        name: "Empty Project".to_string(),
        mixtures: vec![],
        engines: vec![],
    };
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("pe_project_roundtrip_empty.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_engines() {
    let project = sample_project();
    let path = std::env::temp_dir().join("pe_project_roundtrip_engines.yaml");
    save_yaml(&path, &project).unwrap();
    assert_eq!(load(&path).unwrap(), project);
}

#[test]
fn roundtrip_json_engines() {
    let project = sample_project();
    let path = std::env::temp_dir().join("pe_project_roundtrip_engines.json");
    save_json(&path, &project).unwrap();
    assert_eq!(load_json(&path).unwrap(), project);
    assert_eq!(load(&path).unwrap(), project);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let text = r#"
version: 1
name: Minimal
engines:
  - id: e
    mixture: hydrolox
    chamber_pressure_mpa: 10.0
    area_ratio: 40.0
    throat_diameter_m: 0.1
"#;
    let project: Project = serde_yaml::from_str(text).unwrap();
    validate_project(&project).unwrap();
    let engine = &project.engines[0];
    assert_eq!(engine.cycle, CycleDef::default());
    assert_eq!(engine.min_throttle, 1.0);
    assert_eq!(engine.of_ratio, None);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = sample_project();
    project.engines[1].id = "gg".to_string();
    let path = std::env::temp_dir().join("pe_project_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}
