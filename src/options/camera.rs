use std::f32::consts::{FRAC_PI_2, PI, TAU};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{AxisBounds, CameraBounds, CameraPose};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbital camera placement and limits.
pub struct CameraOptions {
    /// Point the camera orbits, in world space.
    #[schemars(title = "Target")]
    pub target: [f32; 3],
    /// Let the user orbit with the pointer between region moves.
    #[schemars(title = "Pointer Controls")]
    pub attach_controls: bool,
    /// Idle pose before any region is selected.
    #[schemars(title = "Initial Pose")]
    pub initial: CameraPose,
    /// Per-axis limits every authored pose must respect.
    #[schemars(title = "Bounds")]
    pub bounds: CameraBounds,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            target: [0.0; 3],
            attach_controls: true,
            initial: CameraPose::new(TAU, FRAC_PI_2, 20.0),
            bounds: CameraBounds {
                alpha: AxisBounds::around(TAU, PI, PI),
                beta: AxisBounds::new(0.0, PI),
                radius: AxisBounds::new(1.0, 100.0),
            },
        }
    }
}
