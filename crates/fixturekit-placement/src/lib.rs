//! # FixtureKit Placement
//!
//! Placement validation and interactive drag engine.
//!
//! - [`footprint`]: quantized footprint of a tool at a Y rotation
//! - [`validator`]: safe-zone containment test and clamp
//! - [`picking`]: pointer rays, ground-plane intersection, tool hit test
//! - [`camera`]: orbit camera and heading reports
//! - [`drag`]: Idle/Dragging pointer session
//! - [`input`]: keyboard shortcut mapping
//! - [`controller`]: the session owner that ties these together and
//!   notifies observers through the event bus

pub mod camera;
pub mod controller;
pub mod drag;
pub mod footprint;
pub mod input;
pub mod picking;
pub mod validator;

pub use camera::{AzimuthTracker, OrbitCamera};
pub use controller::{LiveTransform, PlacementController, PlacementStatus};
pub use drag::{DragContext, DragController, DragSession, DragState, PointerId};
pub use footprint::{compute_footprint, normalize_rotation, quarter_turns, Footprint};
pub use input::{FocusTarget, Key, KeyBindings, KeyCommand};
pub use picking::{ray_hits_box, GroundPlane, Ray};
pub use validator::SafeZoneValidator;
