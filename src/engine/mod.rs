//! The mounted viewer: camera, themer, load pipeline and draw loop around
//! one [`RenderBackend`].

/// Publish/subscribe delivery of commands.
pub mod bus;
/// The command vocabulary.
pub mod command;
mod dispatch;
/// Model loading.
pub mod load;
/// Draw gating.
pub mod render_loop;

use glam::Vec3;

use self::bus::{CommandBus, Subscription};
use self::command::CommandKind;
use self::load::{AssetPipeline, LoadState};
use self::render_loop::RenderLoop;
use crate::backend::RenderBackend;
use crate::camera::CameraController;
use crate::error::ShowroomError;
use crate::options::Options;
use crate::theming::MaterialThemer;

/// An interactive model viewer bound to a rendering backend.
///
/// # Lifecycle
///
/// [`mount`](Self::mount) sets up the surface, scene, camera and overlay,
/// starts loading the model and subscribes to the command bus. Once the
/// model arrives, themeable parts get private materials, defaults are
/// applied, a light is added and drawing begins.
/// [`unmount`](Self::unmount) releases the subscriptions, stops drawing
/// and hands the backend back.
///
/// # Frame loop
///
/// The host calls [`frame`](Self::frame) once per display frame with the
/// elapsed time. All command handling, animation and drawing happen
/// inside that call.
pub struct Viewer<B: RenderBackend> {
    backend: B,
    options: Options,
    camera: CameraController,
    themer: MaterialThemer,
    pipeline: AssetPipeline,
    render_loop: RenderLoop,
    subscriptions: Vec<Subscription>,
}

// =============================================================================
// Construction and teardown
// =============================================================================

impl<B: RenderBackend> Viewer<B> {
    /// Mount a viewer on `backend`, configured by `options`, listening on
    /// `bus`.
    ///
    /// # Errors
    ///
    /// Returns [`ShowroomError::MalformedConfiguration`] if the options
    /// fail validation, or [`ShowroomError::Backend`] if the backend
    /// rejects the surface or overlay setup.
    pub fn mount(
        mut backend: B,
        options: Options,
        bus: &CommandBus,
    ) -> Result<Self, ShowroomError> {
        options.validate()?;

        backend.configure_surface(&options.surface)?;
        backend.create_scene(options.scene.clear_color);

        let camera = CameraController::new(&options.camera, options.animation);
        backend.create_camera(
            camera.pose(),
            camera.target(),
            camera.bounds(),
            options.camera.attach_controls,
        );

        if let Some(overlay) = &options.overlay {
            backend.add_overlay_plane(overlay)?;
        }

        let mut pipeline = AssetPipeline::new();
        pipeline.start(&mut backend, &options.model.path)?;

        let subscriptions =
            CommandKind::ALL.iter().map(|&kind| bus.subscribe(kind)).collect();

        Ok(Self {
            backend,
            themer: MaterialThemer::new(options.animation),
            options,
            camera,
            pipeline,
            render_loop: RenderLoop::new(),
            subscriptions,
        })
    }

    /// Release bus subscriptions, stop drawing and return the backend.
    pub fn unmount(mut self) -> B {
        self.subscriptions.clear();
        self.render_loop.stop();
        log::debug!("viewer unmounted");
        self.backend
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the viewer by `dt` seconds and draw if the model is loaded.
    pub fn frame(&mut self, dt: f32) {
        self.backend.poll();
        self.poll_load();
        self.drain_commands();

        if let Some(pose) = self.backend.user_orbit() {
            if !self.camera.adopt_user_pose(pose) {
                log::debug!("user orbit ignored during a region move");
            }
        }
        let _ = self.camera.update(dt);
        let _ = self.themer.update(dt);

        if self.render_loop.is_running() {
            self.backend.apply_camera(self.camera.pose());
            self.themer.flush(&mut self.backend);
            let _ = self.render_loop.tick(&mut self.backend);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The rendering backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the rendering backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// The material themer.
    #[must_use]
    pub fn themer(&self) -> &MaterialThemer {
        &self.themer
    }

    /// Where the model load stands.
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        self.pipeline.state()
    }

    /// The options this viewer was mounted with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the draw loop is running.
    #[must_use]
    pub fn is_rendering(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Frames drawn since the model loaded.
    #[must_use]
    pub fn frames_drawn(&self) -> u64 {
        self.render_loop.frames()
    }

    /// Whether a camera move or color fade is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.camera.is_animating() || self.themer.is_animating()
    }

    /// World-space position of the camera eye.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.camera.eye()
    }
}
