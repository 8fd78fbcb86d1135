//! Configuration for FixtureKit
//!
//! Load-time settings, fixed once a placement session starts. Supports JSON
//! and TOML files chosen by extension.
//!
//! Configuration is organized into sections:
//! - Workspace extents and safe-zone margin
//! - Placement policy (validation mode, nudge step, starting preset)
//! - The tool preset list
//! - Measurement system for read-outs

pub use fixturekit_core::units::MeasurementSystem;
use fixturekit_core::constants::{
    DEFAULT_PRESET_ID, NUDGE_STEP, SAFE_ZONE_MARGIN, WORKSPACE_DEPTH, WORKSPACE_WIDTH,
};
use fixturekit_core::{
    init_standard_presets, ConfigError, PresetCatalog, ToolPreset, ValidationMode,
    WorkspaceGeometry,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// Workspace extents in mm
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// X extent
    pub width: f64,
    /// Z extent
    pub depth: f64,
    /// Inset from every edge that the tool must respect
    pub safe_zone_margin: f64,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            width: WORKSPACE_WIDTH,
            depth: WORKSPACE_DEPTH,
            safe_zone_margin: SAFE_ZONE_MARGIN,
        }
    }
}

/// Placement policy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Reject or clamp out-of-bounds candidates
    pub validation_mode: ValidationMode,
    /// Arrow-key step in mm
    pub nudge_step: f64,
    /// Preset active at startup
    pub initial_preset: String,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            nudge_step: NUDGE_STEP,
            initial_preset: DEFAULT_PRESET_ID.to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Measurement system for read-outs
    pub measurement_system: MeasurementSystem,
    /// Workspace extents
    pub workspace: WorkspaceSettings,
    /// Placement policy
    pub placement: PlacementSettings,
    /// Available tools, in menu order
    pub presets: Vec<ToolPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            measurement_system: MeasurementSystem::default(),
            workspace: WorkspaceSettings::default(),
            placement: PlacementSettings::default(),
            presets: init_standard_presets().iter().cloned().collect(),
        }
    }
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/fixturekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("fixturekit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML) and validate it
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate, then save config to file (JSON or TOML)
    ///
    /// Missing parent directories are created.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Check everything a session needs before it can start
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.workspace_geometry()?;
        let catalog = self.preset_catalog()?;
        catalog.require(&self.placement.initial_preset)?;

        let step = self.placement.nudge_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::InvalidSetting {
                key: "placement.nudge_step".to_string(),
                reason: format!("must be a positive number of mm, got {}", step),
            });
        }
        Ok(())
    }

    /// Validated workspace geometry
    pub fn workspace_geometry(&self) -> Result<WorkspaceGeometry, ConfigError> {
        WorkspaceGeometry::new(
            self.workspace.width,
            self.workspace.depth,
            self.workspace.safe_zone_margin,
        )
    }

    /// Validated preset catalog; at least one preset is required
    pub fn preset_catalog(&self) -> Result<PresetCatalog, ConfigError> {
        if self.presets.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        PresetCatalog::from_presets(self.presets.clone())
    }

    /// The preset to start with
    pub fn initial_preset(&self) -> Result<ToolPreset, ConfigError> {
        self.preset_catalog()?
            .require(&self.placement.initial_preset)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixturekit_core::{FootprintSize, ToolShape};

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.presets.len(), 8);
        assert_eq!(config.placement.validation_mode, ValidationMode::Reject);
        assert_eq!(config.placement.nudge_step, 10.0);
        assert_eq!(config.initial_preset().unwrap().id.as_str(), "box-default");

        let ws = config.workspace_geometry().unwrap();
        assert_eq!(ws.width(), 1200.0);
        assert_eq!(ws.depth(), 600.0);
        assert_eq!(ws.margin(), 10.0);
    }

    #[test]
    fn test_margin_too_large() {
        let mut config = Config::default();
        config.workspace.safe_zone_margin = 300.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMargin { .. })
        ));
    }

    #[test]
    fn test_bad_preset_size() {
        let mut config = Config::default();
        config.presets[0].size = FootprintSize::new(-1.0, 10.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPresetSize { .. })
        ));
    }

    #[test]
    fn test_empty_and_unknown_presets() {
        let mut config = Config::default();
        config.placement.initial_preset = "nope".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownPreset {
                id: "nope".to_string()
            })
        );

        config.presets.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyCatalog));
    }

    #[test]
    fn test_duplicate_preset() {
        let mut config = Config::default();
        let dup = ToolPreset::new(
            "box-small",
            "Copy",
            FootprintSize::new(10.0, 10.0, 10.0),
            ToolShape::Box,
        )
        .unwrap();
        config.presets.push(dup);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicatePresetId { .. })
        ));
    }

    #[test]
    fn test_nudge_step_must_be_positive() {
        let mut config = Config::default();
        config.placement.nudge_step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [placement]
            validation_mode = "clamp"
            "#,
        )
        .unwrap();
        assert_eq!(config.placement.validation_mode, ValidationMode::Clamp);
        assert_eq!(config.placement.nudge_step, 10.0);
        assert_eq!(config.workspace, WorkspaceSettings::default());
        assert_eq!(config.presets.len(), 8);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::load_from_file(Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(ref ext) if ext == "yaml"));
    }
}
