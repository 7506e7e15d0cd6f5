//! Routing of commands to the camera, the themer and the surface.

use super::command::ViewerCommand;
use super::Viewer;
use crate::backend::RenderBackend;
use crate::error::CommandError;

impl<B: RenderBackend> Viewer<B> {
    /// Carry out one command.
    ///
    /// Camera and color commands need a loaded model and fail with
    /// [`CommandError::NotReady`] until then (or forever, if the load
    /// failed). A rejected command changes nothing.
    pub fn execute(&mut self, command: ViewerCommand) -> Result<(), CommandError> {
        let kind = command.kind();
        match command {
            ViewerCommand::Resize => {
                if self.render_loop.request_resize() {
                    self.backend.resize();
                } else {
                    log::debug!("resize before first frame; deferred");
                }
                Ok(())
            }
            ViewerCommand::MoveCamera { region } => {
                if !self.pipeline.is_ready() {
                    return Err(CommandError::NotReady(kind));
                }
                self.camera.move_to(&self.options.regions, &region)
            }
            ViewerCommand::ChangeColor { part, color } => {
                if !self.pipeline.is_ready() {
                    return Err(CommandError::NotReady(kind));
                }
                self.themer.set_color(
                    &part,
                    &color,
                    &self.options.palette,
                    &self.options.regions,
                )
            }
        }
    }

    /// Apply everything queued on the bus since the last frame.
    ///
    /// Errors are logged and the offending command dropped; the frame
    /// carries on with whatever state it had.
    pub(super) fn drain_commands(&mut self) {
        let mut queued = Vec::new();
        for subscription in &self.subscriptions {
            queued.extend(subscription.drain());
        }
        for command in queued {
            if let Err(e) = self.execute(command) {
                log::warn!("command dropped: {e}");
            }
        }
    }
}
