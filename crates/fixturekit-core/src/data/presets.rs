//! Tool presets - placeable tool definitions and catalog management
//!
//! This module provides:
//! - Tool shapes (box, cylinder, externally modeled)
//! - Tool presets with nominal footprint sizes
//! - An ordered, id-unique preset catalog
//! - The standard preset catalog

use serde::{Deserialize, Serialize};

use super::{FootprintSize, Position3D, WorkspaceGeometry};
use crate::error::ConfigError;

/// Geometry used to draw the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolShape {
    /// Rectangular block
    Box,
    /// Upright cylinder, `w == d` is the diameter
    Cylinder,
    /// Loaded from an external model
    Custom,
}

impl std::fmt::Display for ToolShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Box => write!(f, "Box"),
            Self::Cylinder => write!(f, "Cylinder"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

/// Preset identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(
    /// The unique string identifier for the preset.
    pub String,
);

impl PresetId {
    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PresetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for PresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placeable tool
///
/// Presets are swapped wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPreset {
    /// Unique identifier
    pub id: PresetId,
    /// Display label
    pub label: String,
    /// Nominal dimensions in mm
    pub size: FootprintSize,
    /// How the tool is drawn
    pub shape: ToolShape,
    /// Opaque model reference, consumed only by the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_model_ref: Option<String>,
}

impl ToolPreset {
    /// Create a validated preset
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        size: FootprintSize,
        shape: ToolShape,
    ) -> Result<Self, ConfigError> {
        let preset = Self {
            id: PresetId(id.into()),
            label: label.into(),
            size,
            shape,
            external_model_ref: None,
        };
        preset.validate()?;
        Ok(preset)
    }

    /// Attach an external model reference
    pub fn with_model(mut self, model_ref: impl Into<String>) -> Self {
        self.external_model_ref = Some(model_ref.into());
        self
    }

    /// Reject non-positive or non-finite dimensions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.is_positive() {
            Ok(())
        } else {
            Err(ConfigError::InvalidPresetSize {
                id: self.id.0.clone(),
                w: self.size.w,
                d: self.size.d,
                h: self.size.h,
            })
        }
    }

    /// Y coordinate of the center when resting on the plane
    pub fn resting_height(&self) -> f64 {
        self.size.h / 2.0
    }

    /// Centered resting position for this tool in `workspace`
    pub fn initial_position(&self, workspace: &WorkspaceGeometry) -> Position3D {
        let (x, z) = workspace.center();
        Position3D::new(x, self.resting_height(), z)
    }
}

/// Preset catalog - ordered collection with unique ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalog {
    presets: Vec<ToolPreset>,
}

impl PresetCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, validating every preset and id uniqueness
    pub fn from_presets(presets: Vec<ToolPreset>) -> Result<Self, ConfigError> {
        let mut catalog = Self::new();
        for preset in presets {
            catalog.add(preset)?;
        }
        Ok(catalog)
    }

    /// Add a preset, keeping insertion order
    pub fn add(&mut self, preset: ToolPreset) -> Result<(), ConfigError> {
        preset.validate()?;
        if self.get(preset.id.as_str()).is_some() {
            return Err(ConfigError::DuplicatePresetId {
                id: preset.id.0.clone(),
            });
        }
        self.presets.push(preset);
        Ok(())
    }

    /// Get a preset by id
    pub fn get(&self, id: &str) -> Option<&ToolPreset> {
        self.presets.iter().find(|p| p.id.as_str() == id)
    }

    /// Get a preset by id or report it as unknown
    pub fn require(&self, id: &str) -> Result<&ToolPreset, ConfigError> {
        self.get(id)
            .ok_or_else(|| ConfigError::UnknownPreset { id: id.to_string() })
    }

    /// First preset in catalog order
    pub fn first(&self) -> Option<&ToolPreset> {
        self.presets.first()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ToolPreset> {
        self.presets.iter()
    }

    /// Number of presets
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

fn standard(id: &str, label: &str, w: f64, d: f64, h: f64, shape: ToolShape) -> ToolPreset {
    ToolPreset {
        id: PresetId::from(id),
        label: label.to_string(),
        size: FootprintSize::new(w, d, h),
        shape,
        external_model_ref: None,
    }
}

/// Initialize the standard preset catalog
pub fn init_standard_presets() -> PresetCatalog {
    let presets = vec![
        standard("box-default", "Box (default)", 120.0, 60.0, 40.0, ToolShape::Box),
        standard("box-small", "Box small", 60.0, 60.0, 30.0, ToolShape::Box),
        standard("box-large", "Box large", 180.0, 90.0, 50.0, ToolShape::Box),
        standard("cylinder", "Cylinder", 80.0, 80.0, 45.0, ToolShape::Cylinder),
        standard("cnc-spindle", "CNC Spindle", 120.0, 80.0, 140.0, ToolShape::Custom)
            .with_model("/models/cnc-spindle.glb"),
        standard("l-fixture", "L-Fixture", 130.0, 45.0, 100.0, ToolShape::Custom)
            .with_model("/models/l-fixture.glb"),
        standard("stepped-fixture", "Stepped Fixture", 140.0, 75.0, 90.0, ToolShape::Custom)
            .with_model("/models/stepped-fixture.glb"),
        standard("drill-press", "Drill Press", 120.0, 70.0, 165.0, ToolShape::Custom)
            .with_model("/models/drill-press.glb"),
    ];

    // All ids above are distinct and every size is positive.
    PresetCatalog { presets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = init_standard_presets();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.first().map(|p| p.id.as_str()), Some("box-default"));

        let spindle = catalog.get("cnc-spindle").unwrap();
        assert_eq!(spindle.shape, ToolShape::Custom);
        assert_eq!(
            spindle.external_model_ref.as_deref(),
            Some("/models/cnc-spindle.glb")
        );

        for preset in catalog.iter() {
            assert!(preset.validate().is_ok(), "{} should be valid", preset.id);
        }
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let mut catalog = init_standard_presets();
        let dup = ToolPreset::new(
            "cylinder",
            "Another cylinder",
            FootprintSize::new(50.0, 50.0, 20.0),
            ToolShape::Cylinder,
        )
        .unwrap();
        assert_eq!(
            catalog.add(dup),
            Err(ConfigError::DuplicatePresetId {
                id: "cylinder".to_string()
            })
        );
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn test_preset_rejects_bad_size() {
        let err = ToolPreset::new(
            "flat",
            "Flat",
            FootprintSize::new(10.0, 10.0, 0.0),
            ToolShape::Box,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPresetSize { .. }));
    }

    #[test]
    fn test_initial_position_rests_on_plane() {
        let catalog = init_standard_presets();
        let preset = catalog.get("box-large").unwrap();
        let pos = preset.initial_position(&WorkspaceGeometry::default());
        assert_eq!(pos, Position3D::new(600.0, 25.0, 300.0));
    }

    #[test]
    fn test_require_unknown() {
        let catalog = init_standard_presets();
        assert!(catalog.require("box-small").is_ok());
        assert_eq!(
            catalog.require("lathe").unwrap_err(),
            ConfigError::UnknownPreset {
                id: "lathe".to_string()
            }
        );
    }

    #[test]
    fn test_preset_serialization_skips_missing_model() {
        let catalog = init_standard_presets();
        let json = serde_json::to_string(catalog.get("box-small").unwrap()).unwrap();
        assert!(!json.contains("external_model_ref"));
        assert!(json.contains("\"shape\":\"box\""));

        let back: ToolPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, catalog.get("box-small").unwrap());
    }
}
