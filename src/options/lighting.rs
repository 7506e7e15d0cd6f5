use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// The ambient light injected once the model has loaded.
pub struct LightingOptions {
    /// Direction of the hemispheric light's sky color.
    #[schemars(title = "Direction")]
    pub direction: [f32; 3],
    /// Light intensity.
    #[schemars(title = "Intensity", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            direction: [0.0, 1.0, 0.0],
            intensity: 1.0,
        }
    }
}
