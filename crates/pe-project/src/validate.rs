//! Project validation logic.

use crate::schema::{CycleDef, EngineDef, Project};
use pe_properties::{MixtureCatalog, MixtureDef};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut catalog = MixtureCatalog::builtin();
    let mut mixture_names = HashSet::new();
    for mixture in &project.mixtures {
        if !mixture_names.insert(mixture.name.to_ascii_lowercase()) {
            return Err(ValidationError::DuplicateId {
                id: mixture.name.clone(),
                context: "mixtures".to_string(),
            });
        }
        validate_mixture(mixture)?;
        catalog
            .insert(mixture.clone())
            .map_err(|e| invalid(format!("mixture '{}'", mixture.name), &mixture.name, e))?;
    }

    let mut engine_ids = HashSet::new();
    for engine in &project.engines {
        if engine.id.trim().is_empty() {
            return Err(invalid("engine id", "", "must not be empty"));
        }
        if !engine_ids.insert(&engine.id) {
            return Err(ValidationError::DuplicateId {
                id: engine.id.clone(),
                context: "engines".to_string(),
            });
        }
        if catalog.get(&engine.mixture).is_none() {
            return Err(ValidationError::MissingReference {
                id: engine.mixture.clone(),
                context: format!("engine '{}' mixture", engine.id),
            });
        }
        validate_engine(engine)?;
    }

    Ok(())
}

fn validate_mixture(mixture: &MixtureDef) -> Result<(), ValidationError> {
    for (value, field) in [
        (mixture.of_lean, "of_lean"),
        (mixture.of_rich, "of_rich"),
        (mixture.nominal_of, "nominal_of"),
        (mixture.chamber_pressure_low_mpa, "chamber_pressure_low_mpa"),
        (mixture.chamber_pressure_high_mpa, "chamber_pressure_high_mpa"),
        (mixture.frozen_area_ratio, "frozen_area_ratio"),
    ] {
        if !value.is_finite() {
            return Err(invalid(
                format!("mixture '{}' {field}", mixture.name),
                value,
                "must be finite",
            ));
        }
    }
    Ok(())
}

fn validate_engine(engine: &EngineDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("engine '{}' {name}", engine.id);

    if let Some(of) = engine.of_ratio {
        positive(field("of_ratio"), of)?;
    }
    positive(field("chamber_pressure_mpa"), engine.chamber_pressure_mpa)?;
    positive(field("area_ratio"), engine.area_ratio)?;
    positive(field("throat_diameter_m"), engine.throat_diameter_m)?;
    positive(field("min_throttle"), engine.min_throttle)?;
    if let Some(material) = &engine.material
        && material.trim().is_empty()
    {
        return Err(invalid(field("material"), "", "must not be empty"));
    }

    if let CycleDef::GasGenerator {
        turbine_inlet_temperature_k,
        pump_efficiency,
        turbine_efficiency,
        turbine_back_pressure_mpa,
        max_bleed_fraction,
        ..
    } = &engine.cycle
    {
        if let Some(t) = turbine_inlet_temperature_k {
            positive(field("cycle turbine_inlet_temperature_k"), *t)?;
        }
        if let Some(p) = turbine_back_pressure_mpa {
            positive(field("cycle turbine_back_pressure_mpa"), *p)?;
            if *p >= engine.chamber_pressure_mpa {
                return Err(invalid(
                    field("cycle turbine_back_pressure_mpa"),
                    p,
                    "must be below chamber pressure",
                ));
            }
        }
        for (value, name) in [
            (pump_efficiency, "cycle pump_efficiency"),
            (turbine_efficiency, "cycle turbine_efficiency"),
            (max_bleed_fraction, "cycle max_bleed_fraction"),
        ] {
            if let Some(v) = value
                && !(*v > 0.0 && *v <= 1.0)
            {
                return Err(invalid(field(name), v, "must be in (0, 1]"));
            }
        }
    }

    Ok(())
}

fn positive(field: String, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn invalid(
    field: impl Into<String>,
    value: impl ToString,
    reason: impl ToString,
) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(id: &str) -> EngineDef {
        EngineDef {
            id: id.to_string(),
            name: None,
            mixture: "Kerosene_Lox".to_string(),
            cycle: CycleDef::default(),
            of_ratio: Some(2.3),
            chamber_pressure_mpa: 7.0,
            area_ratio: 16.0,
            throat_diameter_m: 0.2,
            min_throttle: 1.0,
            material: None,
        }
    }

    fn project(engines: Vec<EngineDef>) -> Project {
        Project {
            version: LATEST_VERSION,
            name: "test".to_string(),
            mixtures: vec![],
            engines,
        }
    }

    #[test]
    fn accepts_valid_project() {
        validate_project(&project(vec![engine("a"), engine("b")])).unwrap();
    }

    #[test]
    fn rejects_duplicate_engine_ids() {
        let err = validate_project(&project(vec![engine("a"), engine("a")])).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn rejects_unknown_mixture() {
        let mut e = engine("a");
        e.mixture = "Hydrazine".to_string();
        let err = validate_project(&project(vec![e])).unwrap_err();
        assert!(matches!(err, ValidationError::MissingReference { .. }));
    }

    #[test]
    fn rejects_bad_geometry() {
        for throat in [0.0, -0.1, f64::NAN] {
            let mut e = engine("a");
            e.throat_diameter_m = throat;
            assert!(validate_project(&project(vec![e])).is_err());
        }
    }

    #[test]
    fn rejects_bad_cycle_overrides() {
        let mut e = engine("a");
        e.cycle = CycleDef::GasGenerator {
            turbine_inlet_temperature_k: None,
            richness: None,
            pump_efficiency: Some(1.5),
            turbine_efficiency: None,
            turbine_back_pressure_mpa: None,
            max_bleed_fraction: None,
        };
        let err = validate_project(&project(vec![e])).unwrap_err();
        assert!(err.to_string().contains("pump_efficiency"));
    }

    #[test]
    fn custom_mixture_is_resolvable() {
        let mut custom = MixtureCatalog::builtin()
            .get("Methane_Lox")
            .cloned()
            .unwrap();
        custom.name = "Propane_Lox".to_string();
        custom.aliases.clear();
        let mut e = engine("a");
        e.mixture = "propane_lox".to_string();
        let mut p = project(vec![e]);
        p.mixtures.push(custom);
        validate_project(&p).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut p = project(vec![]);
        p.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
