use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};

use crate::error::{ModgenError, Result};
use crate::preset::Preset;
use crate::registry::Registry;

#[derive(RustEmbed)]
#[folder = "../data/mods/"]
pub struct ModDefinitionStorage;

/// name of the definition that is generated when nothing else is asked for
pub const DEFAULT_DEFINITION: &str = "easier_eclipse";

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ModDefinition {
    /// name of the mod, also used for the output file name
    pub name: String,

    pub version: String,

    /// this can contain any description of the mod
    pub description: Option<String>,

    /// difficulty tiers in the order they should be listed
    pub presets: Vec<Preset>,
}

impl ModDefinition {
    pub fn from_json(data: &str) -> Result<ModDefinition> {
        Ok(serde_json::from_str(data)?)
    }

    /// loads a definition that was compiled into the binary, `name` without extension
    pub fn get_embedded(name: &str) -> Result<ModDefinition> {
        let file = ModDefinitionStorage::get(&format!("{}.json", name))
            .ok_or_else(|| ModgenError::MissingDefinition(name.to_string()))?;
        let data = String::from_utf8_lossy(&file.data);

        ModDefinition::from_json(&data)
    }

    /// the presets as a validated registry
    pub fn registry(&self) -> Result<Registry> {
        Registry::new(self.presets.clone())
    }

    pub fn output_filename(&self, extension: &str) -> String {
        format!("{}.{}", self.name, extension)
    }
}
