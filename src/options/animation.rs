use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Timing shared by camera moves and color fades.
pub struct AnimationOptions {
    /// Length of one transition in seconds. Zero snaps.
    #[schemars(title = "Duration", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub duration_secs: f32,
    /// Progress curve of every transition.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            easing: EasingFunction::default(),
        }
    }
}
