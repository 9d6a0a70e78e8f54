use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::api::error::MotionError;
use crate::components::color_shift::ColorShiftProfile;
use crate::components::motion::MotionProfile;

/// Preset manifest describing named light motion and colour profiles.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetManifest {
    /// Named motion profiles.
    #[serde(default)]
    pub motion: HashMap<String, MotionProfile>,
    /// Named colour profiles.
    #[serde(default)]
    pub color: HashMap<String, ColorShiftProfile>,
    /// Extra names for existing profiles.
    #[serde(default)]
    pub aliases: AliasTable,
}

/// Alias → canonical name, per registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasTable {
    #[serde(default)]
    pub motion: HashMap<String, String>,
    #[serde(default)]
    pub color: HashMap<String, String>,
}

impl PresetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        Ok(serde_json::from_str(json)?)
    }
}
