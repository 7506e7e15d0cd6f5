//! Animation primitives shared by camera motion and color fades.

pub mod tween;

pub use tween::{Lerp, Tween};
