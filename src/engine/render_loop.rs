use crate::backend::RenderBackend;

/// Per-frame draw gate.
///
/// Nothing is drawn until the model has loaded. Resize requests that
/// arrive before then are remembered and reported by [`start`](Self::start)
/// so they can be applied once there is something to resize.
#[derive(Debug, Default)]
pub struct RenderLoop {
    running: bool,
    deferred_resize: bool,
    frames: u64,
}

impl RenderLoop {
    /// Stopped loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin drawing. Returns true if a resize was deferred while stopped.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        log::debug!("render loop started");
        std::mem::take(&mut self.deferred_resize)
    }

    /// Stop drawing for good.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("render loop stopped after {} frames", self.frames);
        }
        self.running = false;
        self.deferred_resize = false;
    }

    /// Whether frames are being drawn.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Note a surface resize. Returns true if the caller should forward
    /// it now, false if it was deferred until [`start`](Self::start).
    pub fn request_resize(&mut self) -> bool {
        if self.running {
            return true;
        }
        self.deferred_resize = true;
        false
    }

    /// Draw one frame if running.
    pub fn tick<B: RenderBackend>(&mut self, backend: &mut B) -> bool {
        if !self.running {
            return false;
        }
        backend.render_frame();
        self.frames += 1;
        true
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessBackend;

    #[test]
    fn draws_only_while_running() {
        let mut backend = HeadlessBackend::new();
        let mut render_loop = RenderLoop::new();
        assert!(!render_loop.tick(&mut backend));
        assert!(!render_loop.start());
        assert!(render_loop.tick(&mut backend));
        assert!(render_loop.tick(&mut backend));
        render_loop.stop();
        assert!(!render_loop.tick(&mut backend));
        assert_eq!(render_loop.frames(), 2);
        assert_eq!(backend.frames_rendered(), 2);
    }

    #[test]
    fn early_resize_is_deferred_once() {
        let mut render_loop = RenderLoop::new();
        assert!(!render_loop.request_resize());
        assert!(!render_loop.request_resize());
        assert!(render_loop.start());
        assert!(!render_loop.start());
        assert!(render_loop.request_resize());
    }
}
