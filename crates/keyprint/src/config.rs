//! Generator configuration.

use std::path::Path;

use keyprint_generators::{BlockiesConfig, JdenticonConfig};
use keyprint_render::RasterOptions;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for every algorithm and the raster backend.
///
/// Missing fields take their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Blockies grid settings.
    pub blockies: BlockiesConfig,
    /// Jdenticon theme and layout settings.
    pub jdenticon: JdenticonConfig,
    /// Raster output settings.
    pub raster: RasterOptions,
}

impl GeneratorConfig {
    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
