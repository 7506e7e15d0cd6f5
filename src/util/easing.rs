//! Easing functions for animation interpolation.
//!
//! Camera moves and color fades share one curve, chosen per viewer instance
//! in [`AnimationOptions`](crate::options::AnimationOptions).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-out: `1 - (1 - t)³`. Decelerates harder than quadratic.
    CubicOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First interior control value.
        c1: f32,
        /// Second interior control value.
        c2: f32,
    },
}

impl EasingFunction {
    /// Default easing: cubic ease-out, the curve region moves were
    /// authored against.
    pub const DEFAULT: Self = Self::CubicOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::CubicHermite { c1, c2 } => {
                // f(t) = c0(1-t)³ + c1·3t(1-t)² + c2·3(1-t)t² + c3·t³
                // where c0=0.0, c3=1.0
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_out_endpoints_and_midpoint() {
        let f = EasingFunction::CubicOut;
        assert_eq!(f.evaluate(0.0), 0.0);
        assert_eq!(f.evaluate(1.0), 1.0);
        // 1 - 0.5³ = 0.875
        assert!((f.evaluate(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_out_is_monotonic_and_decelerating() {
        let f = EasingFunction::CubicOut;
        let samples: Vec<f32> =
            (0..=20).map(|i| f.evaluate(i as f32 / 20.0)).collect();
        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0], "not monotonic: {pair:?}");
        }
        let first_step = samples[1] - samples[0];
        let last_step = samples[20] - samples[19];
        assert!(first_step > last_step);
    }

    #[test]
    fn test_cubic_hermite_ease_out_shape() {
        let hermite = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!(hermite.evaluate(0.25) > 0.25);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let cubic = EasingFunction::CubicOut;
        assert_eq!(cubic.evaluate(-0.5), 0.0);
        assert_eq!(cubic.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_quadratic_variants() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn test_default_is_cubic_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::CubicOut);
    }

    #[test]
    fn test_parses_from_toml_names() {
        #[derive(Deserialize)]
        struct Holder {
            easing: EasingFunction,
        }
        let h: Holder = toml::from_str(r#"easing = "cubic_out""#).unwrap();
        assert_eq!(h.easing, EasingFunction::CubicOut);
        let h: Holder =
            toml::from_str("easing = { cubic_hermite = { c1 = 0.33, c2 = 1.0 } }")
                .unwrap();
        assert_eq!(h.easing, EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 });
    }
}
