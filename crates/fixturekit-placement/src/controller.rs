//! Placement orchestration.
//!
//! [`PlacementController`] owns the live transform, the active preset, the
//! validation mode and the cached validity flag. Every accepted change to
//! position or rotation, whether from an explicit operation, a drag update
//! or the per-frame watcher, ends in the same recompute so observers and
//! geometry never disagree.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use fixturekit_core::constants::QUARTER_TURN;
use fixturekit_core::{
    format_length, ConfigError, EventBus, MeasurementSystem, PlacementEvent, Position3D,
    ToolPreset, ValidationMode, WorkspaceGeometry,
};

use crate::camera::{AzimuthTracker, OrbitCamera};
use crate::drag::{DragContext, DragController, DragState, PointerId};
use crate::footprint::{compute_footprint, normalize_rotation, quarter_turns, Footprint};
use crate::input::KeyCommand;
use crate::picking::{ray_hits_box, GroundPlane, Ray};
use crate::validator::SafeZoneValidator;

/// Position and Y rotation of the placed tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveTransform {
    pub position: Position3D,
    /// Radians about Y
    pub rotation_y: f64,
}

/// Snapshot for status read-outs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementStatus {
    pub position: Position3D,
    pub rotation_degrees: f64,
    pub quarter_turns: u8,
    pub valid: bool,
    pub mode: ValidationMode,
    pub preset_id: String,
    pub dragging: bool,
}

impl PlacementStatus {
    pub fn validity_label(&self) -> &'static str {
        if self.valid {
            "Valid"
        } else {
            "Invalid"
        }
    }

    /// One-line read-out with lengths in `system`
    pub fn format(&self, system: MeasurementSystem) -> String {
        format!(
            "X {} Z {} | {:.0}° | {}",
            format_length(self.position.x, system),
            format_length(self.position.z, system),
            self.rotation_degrees,
            self.validity_label()
        )
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(MeasurementSystem::Metric))
    }
}

/// Owner of the placement session state
pub struct PlacementController {
    workspace: WorkspaceGeometry,
    validator: SafeZoneValidator,
    ground: GroundPlane,
    preset: ToolPreset,
    transform: LiveTransform,
    /// Last transform observers were told about
    published: LiveTransform,
    mode: ValidationMode,
    valid: bool,
    drag: DragController,
    azimuth: AzimuthTracker,
    events: EventBus,
}

impl PlacementController {
    /// Start a session with `preset` resting at the workspace center
    ///
    /// Fails when the preset has non-positive dimensions. The initial
    /// validity is computed without notifying anyone.
    pub fn new(workspace: WorkspaceGeometry, preset: ToolPreset) -> Result<Self, ConfigError> {
        Self::with_event_bus(workspace, preset, EventBus::new())
    }

    /// Like [`new`](Self::new) with a caller-configured event bus
    pub fn with_event_bus(
        workspace: WorkspaceGeometry,
        preset: ToolPreset,
        events: EventBus,
    ) -> Result<Self, ConfigError> {
        preset.validate()?;

        let validator = SafeZoneValidator::new(&workspace);
        let transform = LiveTransform {
            position: preset.initial_position(&workspace),
            rotation_y: 0.0,
        };
        let valid = validator.is_within_safe_zone(&transform.position, &preset.size, 0.0);
        if !validator.footprint_fits(&preset.size, 0.0) {
            warn!(
                "Preset {} ({}) is larger than the safe zone",
                preset.id, preset.size
            );
        }
        debug!("Placement session started with preset {}", preset.id);

        Ok(Self {
            workspace,
            validator,
            ground: GroundPlane::default(),
            preset,
            transform,
            published: transform,
            mode: ValidationMode::default(),
            valid,
            drag: DragController::new(),
            azimuth: AzimuthTracker::default(),
            events,
        })
    }

    /// Set the starting validation mode without notifying
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    // ---- queries ----

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn workspace(&self) -> &WorkspaceGeometry {
        &self.workspace
    }

    pub fn validator(&self) -> &SafeZoneValidator {
        &self.validator
    }

    /// Current live position
    pub fn position(&self) -> Position3D {
        self.transform.position
    }

    /// Current rotation about Y, radians
    pub fn rotation(&self) -> f64 {
        self.transform.rotation_y
    }

    pub fn transform(&self) -> LiveTransform {
        self.transform
    }

    pub fn quarter_turns(&self) -> u8 {
        quarter_turns(self.transform.rotation_y)
    }

    /// Cached validity flag
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn active_preset(&self) -> &ToolPreset {
        &self.preset
    }

    pub fn footprint(&self) -> Footprint {
        compute_footprint(&self.preset.size, self.transform.rotation_y)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Camera orbiting is suppressed while a drag holds the pointer
    pub fn orbit_enabled(&self) -> bool {
        !self.drag.is_dragging()
    }

    pub fn status(&self) -> PlacementStatus {
        PlacementStatus {
            position: self.transform.position,
            rotation_degrees: self.transform.rotation_y.to_degrees(),
            quarter_turns: self.quarter_turns(),
            valid: self.valid,
            mode: self.mode,
            preset_id: self.preset.id.to_string(),
            dragging: self.drag.is_dragging(),
        }
    }

    // ---- explicit operations ----

    /// Rotate by 90° about Y
    pub fn rotate_quarter_turn(&mut self) {
        self.apply_rotation(self.transform.rotation_y + QUARTER_TURN);
    }

    /// Set an arbitrary rotation; normalized into `[0, 2π)`
    pub fn set_rotation(&mut self, radians: f64) {
        self.apply_rotation(radians);
    }

    /// Move by `(dx, dz)`
    ///
    /// Clamp mode corrects the result into the safe zone; reject mode applies
    /// it as-is and lets the validity flag report the overrun. Non-finite
    /// deltas are ignored.
    pub fn nudge(&mut self, dx: f64, dz: f64) {
        if !dx.is_finite() || !dz.is_finite() {
            trace!("Ignoring non-finite nudge ({}, {})", dx, dz);
            return;
        }
        let candidate = self.transform.position.offset(dx, dz);
        let position = self.settle(candidate);
        self.apply_position(position);
    }

    /// Back to the workspace center at the active preset's resting height
    ///
    /// Rotation is left alone.
    pub fn reset_to_initial_center(&mut self) {
        let center = self.preset.initial_position(&self.workspace);
        self.apply_position(center);
    }

    /// Replace the active tool
    ///
    /// Discards any drag in progress and re-centers the new tool.
    pub fn switch_preset(&mut self, preset: ToolPreset) -> Result<(), ConfigError> {
        preset.validate()?;

        if self.drag.cancel() {
            self.publish(PlacementEvent::DragStateChanged(false));
        }
        info!("Switching preset {} -> {}", self.preset.id, preset.id);
        if !self
            .validator
            .footprint_fits(&preset.size, self.transform.rotation_y)
        {
            warn!(
                "Preset {} ({}) is larger than the safe zone",
                preset.id, preset.size
            );
        }

        self.preset = preset;
        self.publish(PlacementEvent::PresetChanged {
            id: self.preset.id.to_string(),
        });
        let center = self.preset.initial_position(&self.workspace);
        self.apply_position(center);
        Ok(())
    }

    /// Change the validation policy
    ///
    /// The current position is not re-clamped. Returns true if the mode
    /// changed.
    pub fn set_validation_mode(&mut self, mode: ValidationMode) -> bool {
        if self.mode == mode {
            return false;
        }
        info!("Validation mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.publish(PlacementEvent::ValidationModeChanged(mode));
        true
    }

    pub fn toggle_validation_mode(&mut self) -> ValidationMode {
        let next = self.mode.toggled();
        self.set_validation_mode(next);
        next
    }

    /// Run a keyboard command
    pub fn apply_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Nudge { dx, dz } => self.nudge(dx, dz),
            KeyCommand::RotateQuarterTurn => self.rotate_quarter_turn(),
            KeyCommand::ToggleValidationMode => {
                self.toggle_validation_mode();
            }
            KeyCommand::ResetToCenter => self.reset_to_initial_center(),
        }
    }

    // ---- pointer input ----

    /// Start a drag if `ray` hits the tool
    ///
    /// Returns false when the tool was missed or a drag is already active.
    pub fn pointer_down(&mut self, pointer: PointerId, ray: &Ray) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let fp = self.footprint();
        let p = self.transform.position;
        let center = DVec3::new(p.x, p.y, p.z);
        let half = DVec3::new(fp.half_w, self.preset.size.h / 2.0, fp.half_d);
        if ray_hits_box(ray, center, half).is_none() {
            trace!("{} press missed the tool", pointer);
            return false;
        }

        if self.drag.begin(pointer) {
            self.publish(PlacementEvent::DragStateChanged(true));
            true
        } else {
            false
        }
    }

    /// Follow the pointer during a drag
    ///
    /// Returns false for events that leave the position unchanged: no drag,
    /// a different pointer, or a ray that misses the ground.
    pub fn pointer_move(&mut self, pointer: PointerId, ray: &Ray) -> bool {
        let ctx = DragContext {
            validator: &self.validator,
            ground: &self.ground,
            size: &self.preset.size,
            rotation_y: self.transform.rotation_y,
            mode: self.mode,
        };
        let moved = self
            .drag
            .pointer_move(pointer, ray, &self.transform.position, &ctx);
        match moved {
            Some(position) => {
                self.apply_position(position);
                true
            }
            None => false,
        }
    }

    /// End the drag owned by `pointer` and commit the last position
    pub fn pointer_up(&mut self, pointer: PointerId) -> bool {
        let ctx = DragContext {
            validator: &self.validator,
            ground: &self.ground,
            size: &self.preset.size,
            rotation_y: self.transform.rotation_y,
            mode: self.mode,
        };
        let committed = self
            .drag
            .pointer_up(pointer, &self.transform.position, &ctx);
        self.finish_drag(committed)
    }

    /// Lost pointer capture; behaves as a release at the last position
    pub fn pointer_capture_lost(&mut self) -> bool {
        let ctx = DragContext {
            validator: &self.validator,
            ground: &self.ground,
            size: &self.preset.size,
            rotation_y: self.transform.rotation_y,
            mode: self.mode,
        };
        let committed = self.drag.capture_lost(&self.transform.position, &ctx);
        self.finish_drag(committed)
    }

    fn finish_drag(&mut self, committed: Option<Position3D>) -> bool {
        let Some(position) = committed else {
            return false;
        };
        self.publish(PlacementEvent::DragStateChanged(false));
        self.apply_position(position);
        true
    }

    // ---- external mutation and per-frame watcher ----

    /// Direct access for a renderer that manipulates the transform itself
    ///
    /// Changes made here are picked up by the next [`frame_tick`](Self::frame_tick).
    pub fn transform_mut(&mut self) -> &mut LiveTransform {
        &mut self.transform
    }

    /// Per-frame watcher
    ///
    /// Re-reads the live transform, reports any change made behind the
    /// controller's back, and runs the validity recompute. Idempotent
    /// without intervening mutations. Returns the validity flag.
    pub fn frame_tick(&mut self) -> bool {
        let resting = self.preset.resting_height();
        let t = &mut self.transform;
        if !t.position.x.is_finite() || !t.position.z.is_finite() {
            warn!("Discarding non-finite external position {}", t.position);
            t.position = self.published.position;
        }
        t.position.y = resting;
        t.rotation_y = normalize_rotation(t.rotation_y);

        if self.transform.rotation_y != self.published.rotation_y {
            self.published.rotation_y = self.transform.rotation_y;
            self.publish(PlacementEvent::RotationChanged {
                radians: self.transform.rotation_y,
            });
        }
        if self.transform.position != self.published.position {
            self.published.position = self.transform.position;
            self.publish(PlacementEvent::PositionChanged(self.transform.position));
        }
        trace!("Frame tick at {}", self.transform.position);
        self.recompute()
    }

    /// Report camera heading changes past the threshold
    pub fn observe_camera(&mut self, camera: &OrbitCamera) -> Option<f64> {
        let radians = self.azimuth.observe(camera.view_azimuth())?;
        self.publish(PlacementEvent::CameraAzimuthChanged { radians });
        Some(radians)
    }

    // ---- internals ----

    fn settle(&self, candidate: Position3D) -> Position3D {
        if self.mode.clamps() {
            self.validator.clamp_to_safe_zone(
                &candidate,
                &self.preset.size,
                self.transform.rotation_y,
            )
        } else {
            candidate
        }
    }

    fn apply_rotation(&mut self, radians: f64) {
        let rotation = normalize_rotation(radians);
        self.transform.rotation_y = rotation;
        self.published.rotation_y = rotation;
        debug!(
            "Rotation {:.1}° ({} quarter turns)",
            rotation.to_degrees(),
            quarter_turns(rotation)
        );
        self.publish(PlacementEvent::RotationChanged { radians: rotation });
        self.recompute();
    }

    fn apply_position(&mut self, mut position: Position3D) {
        position.y = self.preset.resting_height();
        self.transform.position = position;
        self.published.position = position;
        trace!("Position {}", position);
        self.publish(PlacementEvent::PositionChanged(position));
        self.recompute();
    }

    /// The single validity decision point
    fn recompute(&mut self) -> bool {
        let valid = self.validator.is_within_safe_zone(
            &self.transform.position,
            &self.preset.size,
            self.transform.rotation_y,
        );
        if valid != self.valid {
            self.valid = valid;
            info!(
                "Placement {} at {}",
                if valid { "valid" } else { "invalid" },
                self.transform.position
            );
            self.publish(PlacementEvent::ValidityChanged(valid));
        }
        valid
    }

    fn publish(&self, event: PlacementEvent) {
        self.events.publish(event);
    }
}

impl fmt::Debug for PlacementController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementController")
            .field("preset", &self.preset.id)
            .field("transform", &self.transform)
            .field("mode", &self.mode)
            .field("valid", &self.valid)
            .field("drag", &self.drag.state())
            .finish()
    }
}
