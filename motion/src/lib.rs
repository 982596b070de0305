//! Robot Motion Logic
//!
//! Engine-independent state for the robot viewer: the motion controller
//! (move, jump, dance, reset, idle), its tween and deadline machinery,
//! name-based clip/part role resolution, the fallback robot blueprint,
//! input actions with orbit-camera math, and the status surface.
//!
//! Nothing here touches the renderer. The host feeds the controller a clock
//! and held input each frame, then applies the resulting pose and
//! [`MotionCommand`]s to its scene graph.

pub mod blueprint;
pub mod clock;
pub mod controller;
pub mod easing;
pub mod input;
pub mod pose;
pub mod roles;
pub mod status;
pub mod timers;
pub mod tuning;
pub mod tween;

pub use blueprint::{PartSpec, Primitive, RobotBlueprint};
pub use clock::{Clock, ManualClock};
pub use controller::{MotionCommand, MotionController, MotionState, ModelProfile};
pub use easing::Easing;
pub use input::{Action, Direction, HeldDirections, OrbitCamera, dispatch};
pub use pose::{Pose, Position};
pub use roles::{
    ClipRole, NameMatch, PartRole, resolve_clip_roles, resolve_part_roles, resolve_roles,
};
pub use status::{LoadingIndicator, Severity, StatusBoard, StatusEntry};
pub use tuning::{MotionTuning, OrbitTuning, TuningError};
