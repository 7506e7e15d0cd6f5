//! Clone-on-write recoloring of model parts.
//!
//! Parts loaded from a model may share one material. Before any part is
//! recolored, its material is cloned and the clone bound to that part
//! alone; from then on the [`MaterialThemer`] is the only writer of it.

/// RGBA color values.
pub mod color;
mod themer;

pub use color::Color;
pub use themer::{IsolatedMaterial, MaterialThemer};
