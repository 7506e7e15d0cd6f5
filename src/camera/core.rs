use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::Lerp;

/// Orbital camera pose around a fixed target.
///
/// `alpha` is the longitudinal rotation and `beta` the latitudinal
/// rotation (both radians, beta measured from the +Y axis); `radius` is
/// the distance from the target.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
pub struct CameraPose {
    /// Longitudinal angle in radians.
    pub alpha: f32,
    /// Latitudinal angle in radians.
    pub beta: f32,
    /// Distance from the target.
    pub radius: f32,
}

impl CameraPose {
    /// Pose from its three axes.
    #[must_use]
    pub const fn new(alpha: f32, beta: f32, radius: f32) -> Self {
        Self {
            alpha,
            beta,
            radius,
        }
    }

    /// World-space eye position when orbiting `target`.
    #[must_use]
    pub fn eye(&self, target: Vec3) -> Vec3 {
        let (sin_b, cos_b) = self.beta.sin_cos();
        let (sin_a, cos_a) = self.alpha.sin_cos();
        target
            + Vec3::new(
                self.radius * cos_a * sin_b,
                self.radius * cos_b,
                self.radius * sin_a * sin_b,
            )
    }

    /// Largest per-axis difference to `other`.
    #[must_use]
    pub fn max_axis_delta(&self, other: &Self) -> f32 {
        (self.alpha - other.alpha)
            .abs()
            .max((self.beta - other.beta).abs())
            .max((self.radius - other.radius).abs())
    }
}

impl Lerp for CameraPose {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            alpha: Lerp::lerp(self.alpha, other.alpha, t),
            beta: Lerp::lerp(self.beta, other.beta, t),
            radius: Lerp::lerp(self.radius, other.radius, t),
        }
    }
}

/// Inclusive lower/upper limit for one camera axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
pub struct AxisBounds {
    /// Smallest allowed value.
    pub lower: f32,
    /// Largest allowed value.
    pub upper: f32,
}

impl AxisBounds {
    /// Bounds from explicit limits.
    #[must_use]
    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    /// Bounds spanning `below` under and `above` over a center value.
    #[must_use]
    pub fn around(center: f32, below: f32, above: f32) -> Self {
        Self::new(center - below, center + above)
    }

    /// Whether `value` lies within the limits.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.lower && value <= self.upper
    }

    /// Whether `lower <= upper` and both are finite.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower <= self.upper
    }
}

/// Per-axis limits of the orbital camera.
///
/// These are handed to the backend camera, which enforces them against
/// user input. Authored poses are checked against them when options are
/// validated; the controller never clamps at call time.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
pub struct CameraBounds {
    /// Longitudinal limits.
    pub alpha: AxisBounds,
    /// Latitudinal limits.
    pub beta: AxisBounds,
    /// Distance limits.
    pub radius: AxisBounds,
}

impl CameraBounds {
    /// Whether every axis of `pose` lies within its limits.
    #[must_use]
    pub fn contains(&self, pose: &CameraPose) -> bool {
        self.alpha.contains(pose.alpha)
            && self.beta.contains(pose.beta)
            && self.radius.contains(pose.radius)
    }

    /// Name of the first axis whose limits are inverted or non-finite.
    #[must_use]
    pub fn first_unordered_axis(&self) -> Option<&'static str> {
        [("alpha", self.alpha), ("beta", self.beta), ("radius", self.radius)]
            .into_iter()
            .find(|(_, b)| !b.is_ordered())
            .map(|(name, _)| name)
    }
}
