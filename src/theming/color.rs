use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::Lerp;

fn opaque() -> f32 {
    1.0
}

/// Linear RGBA color with channels in `[0, 1]`.
///
/// Alpha is optional in authored palettes and defaults to fully opaque.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Opacity (1 = opaque).
    #[serde(default = "opaque")]
    pub a: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from RGBA channels.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with opacity `a`.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Whether every channel is finite and within `[0, 1]`.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.to_array()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Channels as `[r, g, b, a]`.
    #[must_use]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Largest per-channel difference to `other`.
    #[must_use]
    pub fn max_channel_delta(self, other: Self) -> f32 {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: Lerp::lerp(self.r, other.r, t),
            g: Lerp::lerp(self.g, other.g, t),
            b: Lerp::lerp(self.b, other.b, t),
            a: Lerp::lerp(self.a, other.a, t),
        }
    }
}
