//! Project schema definitions.

use pe_properties::{GasGeneratorRichness, MixtureDef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Mixtures added to (or replacing entries of) the built-in catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixtures: Vec<MixtureDef>,
    #[serde(default)]
    pub engines: Vec<EngineDef>,
}

impl Project {
    pub fn engine(&self, id: &str) -> Option<&EngineDef> {
        self.engines.iter().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mixture: String,
    #[serde(default)]
    pub cycle: CycleDef,
    /// Defaults to the mixture's nominal O/F
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_ratio: Option<f64>,
    pub chamber_pressure_mpa: f64,
    pub area_ratio: f64,
    pub throat_diameter_m: f64,
    #[serde(default = "default_min_throttle")]
    pub min_throttle: f64,
    /// Chamber and nozzle wall material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

fn default_min_throttle() -> f64 {
    1.0
}

impl EngineDef {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CycleDef {
    None,
    GasGenerator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        turbine_inlet_temperature_k: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        richness: Option<GasGeneratorRichness>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pump_efficiency: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        turbine_efficiency: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        turbine_back_pressure_mpa: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_bleed_fraction: Option<f64>,
    },
}

impl Default for CycleDef {
    fn default() -> Self {
        CycleDef::GasGenerator {
            turbine_inlet_temperature_k: None,
            richness: None,
            pump_efficiency: None,
            turbine_efficiency: None,
            turbine_back_pressure_mpa: None,
            max_bleed_fraction: None,
        }
    }
}
