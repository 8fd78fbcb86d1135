//! Drag state machine.
//!
//! Converts pointer events into candidate positions on the ground plane.
//! The controller owns the live transform; this type only tracks the
//! exclusive input session and turns rays into `(x, z)` candidates.

use fixturekit_core::{FootprintSize, Position3D, ValidationMode};
use serde::{Deserialize, Serialize};

use crate::picking::{GroundPlane, Ray};
use crate::validator::SafeZoneValidator;

/// Identifier of the pointer that owns a drag session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pointer {}", self.0)
    }
}

/// Drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Exclusive input session held while a pointer is captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub pointer: PointerId,
    /// Accepted move events so far
    pub moves: u64,
}

/// Placement context needed to turn a candidate into a position
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub validator: &'a SafeZoneValidator,
    pub ground: &'a GroundPlane,
    pub size: &'a FootprintSize,
    pub rotation_y: f64,
    pub mode: ValidationMode,
}

impl DragContext<'_> {
    fn settle(&self, candidate: Position3D) -> Position3D {
        if self.mode.clamps() {
            self.validator
                .clamp_to_safe_zone(&candidate, self.size, self.rotation_y)
        } else {
            candidate
        }
    }
}

/// Idle/Dragging state machine
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pointer holding the session, if any
    pub fn captured_pointer(&self) -> Option<PointerId> {
        match self.state {
            DragState::Dragging(session) => Some(session.pointer),
            DragState::Idle => None,
        }
    }

    /// Idle → Dragging; captures `pointer`
    ///
    /// Returns false when a session is already active.
    pub fn begin(&mut self, pointer: PointerId) -> bool {
        if self.is_dragging() {
            tracing::trace!("Ignoring {} press, drag already active", pointer);
            return false;
        }
        self.state = DragState::Dragging(DragSession { pointer, moves: 0 });
        tracing::debug!("Drag started by {}", pointer);
        true
    }

    /// Candidate position for a move event
    ///
    /// `current` supplies the pinned height. Returns `None` when idle, when
    /// the event belongs to another pointer, or when the ray misses the
    /// ground; the caller keeps its previous position in those cases.
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        ray: &Ray,
        current: &Position3D,
        ctx: &DragContext<'_>,
    ) -> Option<Position3D> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };
        if session.pointer != pointer {
            return None;
        }
        let hit = ctx.ground.intersect(ray)?;
        session.moves += 1;

        let candidate = ctx.settle(current.with_xz(hit.x, hit.z));
        tracing::trace!("Drag move {} -> {}", session.moves, candidate);
        Some(candidate)
    }

    /// Dragging → Idle on pointer-up
    ///
    /// Returns the committed position: `last` re-clamped in clamp mode.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        last: &Position3D,
        ctx: &DragContext<'_>,
    ) -> Option<Position3D> {
        match self.captured_pointer() {
            Some(owner) if owner == pointer => {}
            _ => return None,
        }
        self.state = DragState::Idle;
        let committed = ctx.settle(*last);
        tracing::debug!("Drag by {} committed at {}", pointer, committed);
        Some(committed)
    }

    /// Loss of capture ends the session as if the owner released
    pub fn capture_lost(&mut self, last: &Position3D, ctx: &DragContext<'_>) -> Option<Position3D> {
        let pointer = self.captured_pointer()?;
        tracing::debug!("Pointer capture lost by {}", pointer);
        self.pointer_up(pointer, last, ctx)
    }

    /// Drop the session without committing
    ///
    /// Returns true if a session was discarded.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        if was_dragging {
            tracing::debug!("Drag session discarded");
        }
        was_dragging
    }
}
