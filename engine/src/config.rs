//! Rig configuration file.
//!
//! One JSON document holds the tunables for both controllers. Missing fields
//! fall back to their defaults, so a file only needs the values it changes:
//!
//! ```json
//! {
//!   "camera": { "closest_distance": 0.8 },
//!   "locomotion": { "jump_power": 9.0, "aerial_control_influence": 0.05 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::ClipGuardConfig;
use crate::error::RigError;
use crate::player::LocomotionConfig;

/// Tunables for a camera guard and a locomotion controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub camera: ClipGuardConfig,
    pub locomotion: LocomotionConfig,
}

impl RigConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, RigError> {
        let config: RigConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, RigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("rig config loaded from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), RigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, RigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate both sections.
    pub fn validate(&self) -> Result<(), RigError> {
        self.camera.validate()?;
        self.locomotion.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = RigConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RigConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = RigConfig::from_json_str(
            r#"{ "camera": { "closest_distance": 0.8 }, "locomotion": { "jump_power": 9.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.camera.closest_distance, 0.8);
        assert_eq!(config.camera.return_time, 0.4);
        assert_eq!(config.locomotion.jump_power, 9.0);
    }

    #[test]
    fn test_pretty_json_reloads() {
        let mut config = RigConfig::default();
        config.locomotion.gravity_multiplier = 3.0;
        config.camera.zoom_max = 6.0;
        let json = config.to_json_pretty().unwrap();
        assert_eq!(RigConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let result = RigConfig::from_json_str(r#"{ "locomotion": { "gravity_multiplier": 9.0 } }"#);
        assert!(matches!(result, Err(RigError::InvalidConfig { field: "gravity_multiplier", .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(RigConfig::from_json_str("{ camera"), Err(RigError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RigConfig::load(Path::new("/nonexistent/rig.json"));
        assert!(matches!(result, Err(RigError::Io(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("chase_rig_config_{}", std::process::id()));
        let path = dir.join("rig.json");
        let mut config = RigConfig::default();
        config.camera.sphere_cast_radius = 0.2;

        config.save(&path).unwrap();
        let loaded = RigConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
