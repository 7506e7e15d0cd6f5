// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Region-based orbital camera and clone-on-write material theming for
//! interactive 3D model viewers.
//!
//! A viewer instance is driven entirely by its [`options::Options`]: a
//! table of named camera regions, a color palette, the list of parts that
//! may be recolored and how they start out. Hosts steer it with
//! [`engine::command::ViewerCommand`]s published on an
//! [`engine::bus::CommandBus`].
//!
//! # Key entry points
//!
//! - [`engine::Viewer`] - mounts on a backend and runs the frame loop
//! - [`backend::RenderBackend`] - what the viewer needs from a scene graph
//! - [`backend::headless::HeadlessBackend`] - in-memory backend
//! - [`camera::CameraController`] - animated moves between regions
//! - [`theming::MaterialThemer`] - per-part recoloring
//!
//! # Architecture
//!
//! Mounting configures the surface, scene and idle camera, then issues a
//! single asynchronous model load. When the load lands, each themeable
//! part's material is cloned and rebound so that recoloring one part can
//! never bleed into another that shared its material. Only then does
//! drawing start. Commands, camera tweens and color fades all advance on
//! the host's frame clock.

pub mod animation;
pub mod backend;
pub mod camera;
pub mod engine;
pub mod error;
pub mod options;
pub mod theming;
pub mod util;

pub use engine::Viewer;
pub use error::ShowroomError;
