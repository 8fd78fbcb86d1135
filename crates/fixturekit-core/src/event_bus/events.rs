//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::data::{Position3D, ValidationMode};

/// Observable change in the placement session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacementEvent {
    /// An accepted mutation moved the tool
    PositionChanged(Position3D),
    /// Safe-zone containment flipped
    ValidityChanged(bool),
    /// A drag session started (`true`) or ended (`false`)
    DragStateChanged(bool),
    /// Rotation about Y changed
    RotationChanged {
        /// Normalized angle in `[0, 2π)`.
        radians: f64,
    },
    /// A different tool preset became active
    PresetChanged {
        /// Identifier of the new preset.
        id: String,
    },
    /// Host switched the validation policy
    ValidationModeChanged(ValidationMode),
    /// Camera heading moved past the report threshold
    CameraAzimuthChanged {
        /// Azimuth of the eye around the orbit target, `atan2(dx, dz)`.
        radians: f64,
    },
}

impl PlacementEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            PlacementEvent::PositionChanged(_) => EventCategory::Position,
            PlacementEvent::ValidityChanged(_) => EventCategory::Validity,
            PlacementEvent::DragStateChanged(_) => EventCategory::Drag,
            PlacementEvent::RotationChanged { .. } => EventCategory::Rotation,
            PlacementEvent::PresetChanged { .. } => EventCategory::Preset,
            PlacementEvent::ValidationModeChanged(_) => EventCategory::Settings,
            PlacementEvent::CameraAzimuthChanged { .. } => EventCategory::Camera,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            PlacementEvent::PositionChanged(p) => format!("Position {}", p),
            PlacementEvent::ValidityChanged(true) => "Placement valid".to_string(),
            PlacementEvent::ValidityChanged(false) => "Placement invalid".to_string(),
            PlacementEvent::DragStateChanged(true) => "Drag started".to_string(),
            PlacementEvent::DragStateChanged(false) => "Drag ended".to_string(),
            PlacementEvent::RotationChanged { radians } => {
                format!("Rotation {:.1}°", radians.to_degrees())
            }
            PlacementEvent::PresetChanged { id } => format!("Preset {}", id),
            PlacementEvent::ValidationModeChanged(mode) => format!("Validation mode {}", mode),
            PlacementEvent::CameraAzimuthChanged { radians } => {
                format!("Camera azimuth {:.1}°", radians.to_degrees())
            }
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Position updates.
    Position,
    /// Validity transitions.
    Validity,
    /// Drag session start/end.
    Drag,
    /// Rotation updates.
    Rotation,
    /// Preset switches.
    Preset,
    /// Policy and configuration changes.
    Settings,
    /// Camera heading reports.
    Camera,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Position => write!(f, "Position"),
            EventCategory::Validity => write!(f, "Validity"),
            EventCategory::Drag => write!(f, "Drag"),
            EventCategory::Rotation => write!(f, "Rotation"),
            EventCategory::Preset => write!(f, "Preset"),
            EventCategory::Settings => write!(f, "Settings"),
            EventCategory::Camera => write!(f, "Camera"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_category() {
        assert_eq!(
            PlacementEvent::ValidityChanged(false).category(),
            EventCategory::Validity
        );
        assert_eq!(
            PlacementEvent::ValidationModeChanged(ValidationMode::Clamp).category(),
            EventCategory::Settings
        );
    }

    #[test]
    fn test_event_description() {
        assert_eq!(
            PlacementEvent::DragStateChanged(false).description(),
            "Drag ended"
        );
        assert_eq!(
            PlacementEvent::RotationChanged {
                radians: std::f64::consts::FRAC_PI_2
            }
            .description(),
            "Rotation 90.0°"
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = PlacementEvent::PositionChanged(Position3D::new(1.0, 2.0, 3.0));
        let json = serde_json::to_string(&event).unwrap();
        let back: PlacementEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
