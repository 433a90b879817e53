//! Structural materials for chamber and nozzle wall sizing.

use crate::error::{PropertyError, PropertyResult};
use pe_core::units::{Density, kg_per_m3};

/// Properties of a wall material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructuralMaterial {
    /// Lookup key
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Density [kg/m³]
    pub density_kg_m3: f64,
    /// Ultimate tensile strength [MPa]
    pub ultimate_strength_mpa: f64,
    /// Maximum service temperature [K]
    pub max_service_temperature_k: f64,
}

impl StructuralMaterial {
    pub fn density(&self) -> Density {
        kg_per_m3(self.density_kg_m3)
    }

    /// Wall sizing factor: density per unit strength times `safety_factor`.
    ///
    /// Units are kg/m³ per MPa; multiplied by a pressure in MPa and a volume it
    /// gives a wall mass in kg.
    pub fn sizing_factor(&self, safety_factor: f64) -> f64 {
        self.density_kg_m3 / self.ultimate_strength_mpa * safety_factor
    }

    /// Names match on id or display name, case-insensitive.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.id.eq_ignore_ascii_case(name) || self.name.eq_ignore_ascii_case(name)
    }
}

pub const INCONEL_718: StructuralMaterial = StructuralMaterial {
    id: "Inconel",
    name: "Inconel 718",
    density_kg_m3: 8190.0,
    ultimate_strength_mpa: 1375.0,
    max_service_temperature_k: 975.0,
};

pub const STAINLESS_316L: StructuralMaterial = StructuralMaterial {
    id: "Stainless",
    name: "Stainless Steel 316L",
    density_kg_m3: 8000.0,
    ultimate_strength_mpa: 485.0,
    max_service_temperature_k: 1100.0,
};

pub const CUCRZR: StructuralMaterial = StructuralMaterial {
    id: "CuCrZr",
    name: "Copper Chromium Zirconium",
    density_kg_m3: 8900.0,
    ultimate_strength_mpa: 410.0,
    max_service_temperature_k: 800.0,
};

pub const NIOBIUM_C103: StructuralMaterial = StructuralMaterial {
    id: "C103",
    name: "Niobium C103",
    density_kg_m3: 8850.0,
    ultimate_strength_mpa: 370.0,
    max_service_temperature_k: 1640.0,
};

/// Default material for engine sizing.
pub const DEFAULT_MATERIAL: &str = "Inconel";

/// Lookup of structural materials by name.
pub trait MaterialLibrary: Send + Sync {
    fn lookup(&self, name: &str) -> PropertyResult<StructuralMaterial>;
}

/// The built-in material table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardMaterials;

impl StandardMaterials {
    pub const ALL: [StructuralMaterial; 4] = [INCONEL_718, STAINLESS_316L, CUCRZR, NIOBIUM_C103];

    pub fn all(&self) -> &'static [StructuralMaterial] {
        &Self::ALL
    }
}

impl MaterialLibrary for StandardMaterials {
    fn lookup(&self, name: &str) -> PropertyResult<StructuralMaterial> {
        Self::ALL
            .iter()
            .find(|material| material.matches_name(name))
            .copied()
            .ok_or_else(|| PropertyError::UnknownMaterial {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconel_is_found_by_id_and_name() {
        let lib = StandardMaterials;
        assert_eq!(lib.lookup("Inconel").unwrap(), INCONEL_718);
        assert_eq!(lib.lookup("inconel 718").unwrap(), INCONEL_718);
    }

    #[test]
    fn unknown_material_is_an_error() {
        let err = StandardMaterials.lookup("Unobtainium").unwrap_err();
        assert_eq!(
            err,
            PropertyError::UnknownMaterial {
                name: "Unobtainium".into()
            }
        );
    }

    #[test]
    fn sizing_factor_matches_density_over_strength() {
        let factor = INCONEL_718.sizing_factor(2.0);
        assert!((factor - 8190.0 / 1375.0 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn ids_are_unique() {
        let all = StandardMaterials.all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
