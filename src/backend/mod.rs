//! The rendering engine boundary.
//!
//! Everything the viewer needs from a scene graph (cameras, lights,
//! materials, model loading, drawing) goes through [`RenderBackend`].
//! The crate ships [`headless::HeadlessBackend`], an in-memory
//! implementation used by the command-line runner and the tests.

pub mod headless;

use std::sync::mpsc;

use glam::Vec3;

use crate::camera::{CameraBounds, CameraPose};
use crate::error::BackendError;
use crate::options::{OverlayOptions, SurfaceOptions};
use crate::theming::Color;

/// Opaque reference to a material owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// What a successful load hands back: the ids of every part (mesh) the
/// model contributed to the scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedModel {
    /// Part ids in load order.
    pub parts: Vec<String>,
}

impl LoadedModel {
    /// Model exposing the given parts.
    #[must_use]
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Whether the model contains a part with this id.
    #[must_use]
    pub fn contains(&self, part: &str) -> bool {
        self.parts.iter().any(|p| p == part)
    }
}

pub(crate) type LoadOutcome = Result<LoadedModel, String>;

/// One-shot continuation for an asynchronous model load.
///
/// Both reporting methods consume the completion, so a load is answered
/// at most once. Dropping it unanswered is seen by the viewer as a failed
/// load.
#[derive(Debug)]
pub struct LoadCompletion {
    tx: mpsc::Sender<LoadOutcome>,
}

impl LoadCompletion {
    pub(crate) fn pair() -> (Self, mpsc::Receiver<LoadOutcome>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Report a successful load.
    pub fn succeed(self, model: LoadedModel) {
        self.deliver(Ok(model));
    }

    /// Report a failed load with a human-readable diagnostic.
    pub fn fail(self, diagnostic: impl Into<String>) {
        self.deliver(Err(diagnostic.into()));
    }

    fn deliver(self, outcome: LoadOutcome) {
        if self.tx.send(outcome).is_err() {
            log::debug!("load finished after its viewer was torn down");
        }
    }
}

/// Capabilities the viewer consumes from a rendering engine.
///
/// Calls arrive on the thread that drives
/// [`Viewer::frame`](crate::engine::Viewer::frame); implementations need
/// no internal synchronization.
pub trait RenderBackend {
    /// Prepare the drawing surface.
    fn configure_surface(
        &mut self,
        surface: &SurfaceOptions,
    ) -> Result<(), BackendError>;

    /// Create the scene graph with the given background color.
    fn create_scene(&mut self, clear_color: Color);

    /// Create the orbital camera at its idle pose. `attach_controls`
    /// wires the engine's own pointer orbiting to the drawing surface.
    fn create_camera(
        &mut self,
        pose: CameraPose,
        target: Vec3,
        bounds: &CameraBounds,
        attach_controls: bool,
    );

    /// Move the camera to `pose`. Called once per frame with the
    /// controller's current state.
    fn apply_camera(&mut self, pose: CameraPose);

    /// Pose the user orbited to with attached controls since the last
    /// call, if any.
    fn user_orbit(&mut self) -> Option<CameraPose> {
        None
    }

    /// Add a textured decorative plane.
    fn add_overlay_plane(
        &mut self,
        overlay: &OverlayOptions,
    ) -> Result<(), BackendError>;

    /// Add a hemispheric (ambient) light.
    fn add_hemispheric_light(
        &mut self,
        name: &str,
        direction: Vec3,
        intensity: f32,
    );

    /// Begin loading the model at `path`; report through `completion`
    /// whenever the load finishes.
    fn request_model(&mut self, path: &str, completion: LoadCompletion);

    /// Give the backend a chance to make progress on outstanding work
    /// (such as pending loads). Called at the start of every frame.
    fn poll(&mut self) {}

    /// Material currently bound to `part`.
    fn part_material(&self, part: &str) -> Result<MaterialHandle, BackendError>;

    /// Duplicate a material; the copy starts with identical properties.
    fn clone_material(
        &mut self,
        material: MaterialHandle,
    ) -> Result<MaterialHandle, BackendError>;

    /// Bind `material` to `part`, replacing its previous binding.
    fn bind_material(
        &mut self,
        part: &str,
        material: MaterialHandle,
    ) -> Result<(), BackendError>;

    /// Diffuse color of a material.
    fn diffuse(&self, material: MaterialHandle) -> Result<Color, BackendError>;

    /// Set the diffuse color of a material.
    fn set_diffuse(
        &mut self,
        material: MaterialHandle,
        color: Color,
    ) -> Result<(), BackendError>;

    /// React to a change of the drawing surface's size.
    fn resize(&mut self);

    /// Draw one frame of the scene.
    fn render_frame(&mut self);
}
