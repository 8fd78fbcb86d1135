//! Keyboard shortcuts for the placement session.

use fixturekit_core::constants::NUDGE_STEP;
use serde::{Deserialize, Serialize};

/// Keys the placement session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    Char(char),
    Other,
}

/// Where keyboard focus currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Canvas,
    /// Text inputs, text areas and editable content
    TextEntry,
}

/// Command produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeyCommand {
    Nudge { dx: f64, dz: f64 },
    RotateQuarterTurn,
    ToggleValidationMode,
    ResetToCenter,
}

/// Maps keys to placement commands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Distance moved per arrow press, in mm
    pub nudge_step: f64,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            nudge_step: NUDGE_STEP,
        }
    }
}

impl KeyBindings {
    pub fn new(nudge_step: f64) -> Self {
        Self { nudge_step }
    }

    /// Command for `key`, or `None` if unbound or focus is in a text field
    ///
    /// Arrow keys move on compass directions: up is north (-Z).
    pub fn map(&self, key: Key, focus: FocusTarget) -> Option<KeyCommand> {
        if focus == FocusTarget::TextEntry {
            return None;
        }
        let step = self.nudge_step;
        match key {
            Key::ArrowUp => Some(KeyCommand::Nudge { dx: 0.0, dz: -step }),
            Key::ArrowDown => Some(KeyCommand::Nudge { dx: 0.0, dz: step }),
            Key::ArrowLeft => Some(KeyCommand::Nudge { dx: -step, dz: 0.0 }),
            Key::ArrowRight => Some(KeyCommand::Nudge { dx: step, dz: 0.0 }),
            Key::Home => Some(KeyCommand::ResetToCenter),
            Key::Char('r' | 'R') => Some(KeyCommand::RotateQuarterTurn),
            Key::Char('c' | 'C') => Some(KeyCommand::ToggleValidationMode),
            Key::Char(_) | Key::Other => None,
        }
    }
}
