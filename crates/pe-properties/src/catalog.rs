//! Named mixture catalog.

use crate::error::{PropertyError, PropertyResult};
use crate::mixture::{CombustionFit, MixtureDef};
use crate::model::SharedPropellant;
use crate::surrogate::SurrogateMixtureModel;
use std::sync::{Arc, OnceLock};

/// Ordered collection of mixture definitions, looked up by name or alias.
///
/// Each entry builds its provider once; repeated lookups return the same
/// `Arc`, so callers can compare providers by identity.
#[derive(Debug, Clone, Default)]
pub struct MixtureCatalog {
    entries: Vec<MixtureDef>,
    models: Vec<OnceLock<SharedPropellant>>,
}

impl MixtureCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with the built-in mixtures.
    pub fn builtin() -> Self {
        let entries = vec![kerosene_lox(), hydrogen_lox(), methane_lox()];
        let models = entries.iter().map(|_| OnceLock::new()).collect();
        Self { entries, models }
    }

    pub fn get(&self, name: &str) -> Option<&MixtureDef> {
        self.position(name).map(|i| &self.entries[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|def| def.matches_name(name))
    }

    /// Add a mixture, replacing any entry with the same name.
    pub fn insert(&mut self, def: MixtureDef) -> PropertyResult<()> {
        def.validate()?;
        match self
            .entries
            .iter()
            .position(|existing| existing.name.eq_ignore_ascii_case(&def.name))
        {
            Some(i) => {
                self.entries[i] = def;
                self.models[i] = OnceLock::new();
            }
            None => {
                self.entries.push(def);
                self.models.push(OnceLock::new());
            }
        }
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|def| def.name.as_str())
    }

    pub fn entries(&self) -> &[MixtureDef] {
        &self.entries
    }

    /// Shared surrogate provider for the named mixture, built on first use.
    pub fn model(&self, name: &str) -> PropertyResult<SharedPropellant> {
        let i = self
            .position(name)
            .ok_or_else(|| PropertyError::UnknownMixture {
                name: name.to_string(),
            })?;
        if let Some(model) = self.models[i].get() {
            return Ok(model.clone());
        }
        let def = self.entries[i].clone();
        let model: SharedPropellant = Arc::new(SurrogateMixtureModel::new(def)?);
        Ok(self.models[i].get_or_init(|| model).clone())
    }
}

fn kerosene_lox() -> MixtureDef {
    MixtureDef {
        name: "Kerosene_Lox".into(),
        aliases: vec!["kerolox".into(), "RP-1/LOX".into()],
        oxidizer: "LOX".into(),
        fuel: "RP-1".into(),
        oxidizer_density_kg_m3: 1141.0,
        fuel_density_kg_m3: 820.0,
        of_lean: 1.5,
        of_rich: 3.2,
        nominal_of: 2.3,
        chamber_pressure_low_mpa: 0.25,
        chamber_pressure_high_mpa: 50.0,
        frozen_area_ratio: 1.6,
        frozen_mach: 1.8,
        combustion: CombustionFit {
            peak_of: 2.6,
            peak_temperature_k: 3670.0,
            base_temperature_k: 300.0,
            log_width: 0.9,
            reference_pressure_mpa: 7.0,
            pressure_exponent: 0.015,
            molar_mass_base: 14.0,
            molar_mass_slope: 3.5,
            molar_mass_max: 32.0,
            gamma_hot: 1.22,
            gamma_cold: 1.30,
        },
    }
}

fn hydrogen_lox() -> MixtureDef {
    MixtureDef {
        name: "Hydrogen_Lox".into(),
        aliases: vec!["hydrolox".into(), "LH2/LOX".into()],
        oxidizer: "LOX".into(),
        fuel: "LH2".into(),
        oxidizer_density_kg_m3: 1141.0,
        fuel_density_kg_m3: 70.8,
        of_lean: 3.0,
        of_rich: 8.0,
        nominal_of: 6.0,
        chamber_pressure_low_mpa: 0.25,
        chamber_pressure_high_mpa: 50.0,
        frozen_area_ratio: 1.6,
        frozen_mach: 1.8,
        combustion: CombustionFit {
            peak_of: 4.5,
            peak_temperature_k: 3600.0,
            base_temperature_k: 200.0,
            log_width: 0.8,
            reference_pressure_mpa: 7.0,
            pressure_exponent: 0.02,
            molar_mass_base: 2.5,
            molar_mass_slope: 1.85,
            molar_mass_max: 32.0,
            gamma_hot: 1.20,
            gamma_cold: 1.38,
        },
    }
}

fn methane_lox() -> MixtureDef {
    MixtureDef {
        name: "Methane_Lox".into(),
        aliases: vec!["methalox".into(), "CH4/LOX".into()],
        oxidizer: "LOX".into(),
        fuel: "LCH4".into(),
        oxidizer_density_kg_m3: 1141.0,
        fuel_density_kg_m3: 422.0,
        of_lean: 2.0,
        of_rich: 4.0,
        nominal_of: 3.4,
        chamber_pressure_low_mpa: 0.25,
        chamber_pressure_high_mpa: 50.0,
        frozen_area_ratio: 1.6,
        frozen_mach: 1.8,
        combustion: CombustionFit {
            peak_of: 3.3,
            peak_temperature_k: 3600.0,
            base_temperature_k: 250.0,
            log_width: 0.85,
            reference_pressure_mpa: 7.0,
            pressure_exponent: 0.015,
            molar_mass_base: 10.0,
            molar_mass_slope: 3.6,
            molar_mass_max: 32.0,
            gamma_hot: 1.21,
            gamma_cold: 1.30,
        },
    }
}
