//! Orbital camera for region-based viewing.
//!
//! The camera orbits a fixed target; its pose is three spherical
//! coordinates. Region moves are animated by [`CameraController`], which
//! is the sole owner of the pose between frames.

/// Region-driven pose animation.
pub mod controller;
/// Pose and bounds value types.
pub mod core;

pub use self::controller::CameraController;
pub use self::core::{AxisBounds, CameraBounds, CameraPose};
