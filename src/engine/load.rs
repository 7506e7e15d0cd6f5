//! One-shot asynchronous model load, and the setup that follows it.

use std::sync::mpsc;

use glam::Vec3;

use super::Viewer;
use crate::backend::{LoadCompletion, LoadOutcome, LoadedModel, RenderBackend};
use crate::error::LoadError;

/// Where the model load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No request issued yet.
    NotStarted,
    /// Request issued, no answer yet.
    Pending,
    /// The model is in the scene.
    Succeeded,
    /// The load failed; the viewer stays empty.
    Failed(String),
}

impl LoadState {
    /// Whether the state can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// Tracks the single model load of a viewer instance.
///
/// `NotStarted -> Pending -> {Succeeded, Failed}`; both end states are
/// final. There is no timeout: a backend that never answers leaves the
/// pipeline pending for good.
pub struct AssetPipeline {
    state: LoadState,
    rx: Option<mpsc::Receiver<LoadOutcome>>,
}

impl Default for AssetPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetPipeline {
    /// Pipeline that has not requested anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoadState::NotStarted,
            rx: None,
        }
    }

    /// Ask `backend` to load the model at `path`.
    pub fn start<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        path: &str,
    ) -> Result<(), LoadError> {
        if self.state != LoadState::NotStarted {
            return Err(LoadError::AlreadyStarted);
        }
        let (completion, rx) = LoadCompletion::pair();
        self.rx = Some(rx);
        self.state = LoadState::Pending;
        log::info!("loading model '{path}'");
        backend.request_model(path, completion);
        Ok(())
    }

    /// Outcome of the load, returned exactly once when it arrives.
    ///
    /// A completion dropped without an answer counts as a failure.
    pub fn poll(&mut self) -> Option<Result<LoadedModel, LoadError>> {
        let rx = self.rx.as_ref()?;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Err("load request was dropped without an answer".to_owned())
            }
        };
        self.rx = None;
        match outcome {
            Ok(model) => {
                self.state = LoadState::Succeeded;
                Some(Ok(model))
            }
            Err(diagnostic) => {
                self.state = LoadState::Failed(diagnostic.clone());
                Some(Err(LoadError::AssetLoadFailed(diagnostic)))
            }
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether the model loaded successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Succeeded
    }
}

impl<B: RenderBackend> Viewer<B> {
    /// Check for the load outcome and run post-load setup when it lands.
    pub(super) fn poll_load(&mut self) {
        match self.pipeline.poll() {
            None => {}
            Some(Ok(model)) => self.on_loaded(&model),
            Some(Err(e)) => {
                log::error!("{e}; the viewer will stay empty");
            }
        }
    }

    /// Isolate, seed, light, then start drawing. The order matters: the
    /// first drawn frame already shows every part in its default color.
    fn on_loaded(&mut self, model: &LoadedModel) {
        log::info!("model loaded: {} parts", model.parts.len());

        for part in &self.options.theming.parts {
            if let Err(e) = self.themer.isolate(&mut self.backend, part) {
                log::warn!("cannot theme '{part}': {e}");
            }
        }

        for (part, color_name) in &self.options.theming.defaults {
            if !self.themer.is_isolated(part) {
                continue;
            }
            let seeded = self
                .options
                .palette
                .lookup(color_name)
                .and_then(|color| self.themer.seed(part, color));
            if let Err(e) = seeded {
                log::warn!("default color for '{part}' not applied: {e}");
            }
        }

        let lighting = &self.options.lighting;
        self.backend.add_hemispheric_light(
            "ambient",
            Vec3::from_array(lighting.direction),
            lighting.intensity,
        );

        if self.render_loop.start() {
            log::debug!("applying resize deferred during load");
            self.backend.resize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{HeadlessBackend, ModelDescription};

    fn backend() -> HeadlessBackend {
        let model = ModelDescription::from_toml(
            "[materials]\nM = { r = 0.5, g = 0.5, b = 0.5 }\n[parts]\nA = \"M\"",
        )
        .unwrap();
        HeadlessBackend::new().with_model("m", model)
    }

    #[test]
    fn walks_not_started_pending_succeeded() {
        let mut backend = backend();
        let mut pipeline = AssetPipeline::new();
        assert_eq!(pipeline.state(), &LoadState::NotStarted);
        assert!(pipeline.poll().is_none());

        pipeline.start(&mut backend, "m").unwrap();
        assert_eq!(pipeline.state(), &LoadState::Pending);
        assert!(pipeline.poll().is_none());

        backend.poll();
        let model = pipeline.poll().unwrap().unwrap();
        assert!(model.contains("A"));
        assert!(pipeline.is_ready());
        assert!(pipeline.state().is_terminal());
        assert!(pipeline.poll().is_none());
    }

    #[test]
    fn second_start_is_refused() {
        let mut backend = backend();
        let mut pipeline = AssetPipeline::new();
        pipeline.start(&mut backend, "m").unwrap();
        assert_eq!(
            pipeline.start(&mut backend, "m"),
            Err(LoadError::AlreadyStarted)
        );
    }

    #[test]
    fn failure_carries_diagnostic() {
        let mut backend = backend();
        let mut pipeline = AssetPipeline::new();
        pipeline.start(&mut backend, "missing").unwrap();
        backend.poll();
        let err = pipeline.poll().unwrap().unwrap_err();
        assert!(matches!(err, LoadError::AssetLoadFailed(ref d) if d.contains("missing")));
        assert!(matches!(pipeline.state(), LoadState::Failed(_)));
        assert!(!pipeline.is_ready());
    }

    #[test]
    fn abandoned_request_is_a_failure() {
        let mut backend = backend();
        backend.hold_loads(true);
        let mut pipeline = AssetPipeline::new();
        pipeline.start(&mut backend, "m").unwrap();
        backend.abandon_loads();
        assert!(matches!(
            pipeline.poll(),
            Some(Err(LoadError::AssetLoadFailed(_)))
        ));
    }

    #[test]
    fn unanswered_request_stays_pending() {
        let mut backend = backend();
        backend.hold_loads(true);
        let mut pipeline = AssetPipeline::new();
        pipeline.start(&mut backend, "m").unwrap();
        for _ in 0..10 {
            backend.poll();
            assert!(pipeline.poll().is_none());
        }
        assert_eq!(pipeline.state(), &LoadState::Pending);
    }
}
