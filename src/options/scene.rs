use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::theming::Color;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Surface", inline)]
#[serde(default)]
/// Drawing surface setup.
pub struct SurfaceOptions {
    /// Supersampling factor the surface is created at (1 = native).
    #[schemars(title = "Render Scale", range(min = 1, max = 4))]
    pub render_scale: u32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { render_scale: 2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Scene-wide appearance.
pub struct SceneOptions {
    /// Background color.
    #[schemars(title = "Background")]
    pub clear_color: Color,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            clear_color: Color::rgb(0.9, 0.9, 0.92),
        }
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Model", inline)]
#[serde(default)]
/// The model resource loaded at mount.
pub struct ModelOptions {
    /// Backend-specific resource path.
    #[schemars(title = "Path")]
    pub path: String,
}

/// Textured decorative plane added to the scene at mount (e.g. a logo).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Overlay")]
pub struct OverlayOptions {
    /// Texture resource path.
    pub texture: String,
    /// Plane width in world units.
    pub width: f32,
    /// Plane height in world units.
    pub height: f32,
    /// Plane center in world space.
    #[serde(default)]
    pub position: [f32; 3],
    /// Rotation about the world X axis, radians.
    #[serde(default)]
    pub rotation_x: f32,
    /// Whether the texture's alpha channel cuts out the plane.
    #[serde(default)]
    pub has_alpha: bool,
}
