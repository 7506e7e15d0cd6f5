//! In-memory backend with no GPU.
//!
//! Materials live in an arena and parts hold handles into it, so material
//! sharing between parts is real and observable: recoloring a shared
//! material changes every part bound to it. Models are described by small
//! TOML manifests, either registered in memory or read from a root
//! directory:
//!
//! ```toml
//! [materials]
//! frame = { r = 0.8, g = 0.8, b = 0.8 }
//!
//! [parts]
//! Cylinder00 = "frame"
//! Object009 = "frame"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{LoadCompletion, LoadedModel, MaterialHandle, RenderBackend};
use crate::camera::{CameraBounds, CameraPose};
use crate::error::BackendError;
use crate::options::{OverlayOptions, SurfaceOptions};
use crate::theming::Color;

/// Model manifest understood by [`HeadlessBackend`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDescription {
    /// Material name → initial diffuse color.
    pub materials: BTreeMap<String, Color>,
    /// Part id → material name. Several parts may name the same material.
    pub parts: BTreeMap<String, String>,
}

impl ModelDescription {
    /// Parse a manifest from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone)]
struct Material {
    name: String,
    diffuse: Color,
}

/// Camera as last configured by the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessCamera {
    /// Current pose.
    pub pose: CameraPose,
    /// Orbit target.
    pub target: Vec3,
    /// Axis limits.
    pub bounds: CameraBounds,
    /// Whether pointer controls were attached.
    pub controls_attached: bool,
}

/// Hemispheric light added to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessLight {
    /// Light name.
    pub name: String,
    /// Direction of the sky color.
    pub direction: Vec3,
    /// Light intensity.
    pub intensity: f32,
}

/// Backend that keeps the whole scene in memory.
#[derive(Default)]
pub struct HeadlessBackend {
    surface: Option<SurfaceOptions>,
    clear_color: Option<Color>,
    camera: Option<HeadlessCamera>,
    overlays: Vec<OverlayOptions>,
    lights: Vec<HeadlessLight>,
    materials: Vec<Material>,
    parts: FxHashMap<String, MaterialHandle>,
    models: FxHashMap<String, ModelDescription>,
    model_root: Option<PathBuf>,
    pending: Vec<(String, LoadCompletion)>,
    hold_loads: bool,
    pending_orbit: Option<CameraPose>,
    frames_rendered: u64,
    resizes: u32,
}

impl HeadlessBackend {
    /// Empty backend with no known models.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve model paths not registered in memory against `root`.
    #[must_use]
    pub fn with_model_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.model_root = Some(root.into());
        self
    }

    /// Register an in-memory model under `path`.
    #[must_use]
    pub fn with_model(
        mut self,
        path: impl Into<String>,
        model: ModelDescription,
    ) -> Self {
        let _ = self.models.insert(path.into(), model);
        self
    }

    /// While held, requested loads stay pending across
    /// [`poll`](RenderBackend::poll) calls.
    pub fn hold_loads(&mut self, hold: bool) {
        self.hold_loads = hold;
    }

    /// Whether a requested load is still unanswered.
    #[must_use]
    pub fn has_pending_load(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop every pending load without answering it.
    pub fn abandon_loads(&mut self) {
        self.pending.clear();
    }

    /// Pretend the user dragged the camera to `pose`.
    pub fn simulate_user_orbit(&mut self, pose: CameraPose) {
        self.pending_orbit = Some(pose);
    }

    /// Surface options, once configured.
    #[must_use]
    pub fn surface(&self) -> Option<&SurfaceOptions> {
        self.surface.as_ref()
    }

    /// Scene background, once the scene exists.
    #[must_use]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    /// The camera, once created.
    #[must_use]
    pub fn camera(&self) -> Option<&HeadlessCamera> {
        self.camera.as_ref()
    }

    /// Decorative planes added so far.
    #[must_use]
    pub fn overlays(&self) -> &[OverlayOptions] {
        &self.overlays
    }

    /// Lights added so far.
    #[must_use]
    pub fn lights(&self) -> &[HeadlessLight] {
        &self.lights
    }

    /// Number of frames drawn.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Number of surface resizes handled.
    #[must_use]
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }

    /// Diffuse color of the material bound to `part`.
    #[must_use]
    pub fn part_diffuse(&self, part: &str) -> Option<Color> {
        let handle = self.parts.get(part)?;
        self.material(*handle).ok().map(|m| m.diffuse)
    }

    /// Name of the material bound to `part`.
    #[must_use]
    pub fn part_material_name(&self, part: &str) -> Option<&str> {
        let handle = self.parts.get(part)?;
        self.material(*handle).ok().map(|m| m.name.as_str())
    }

    /// Whether two parts are bound to the same material.
    #[must_use]
    pub fn shares_material(&self, a: &str, b: &str) -> bool {
        match (self.parts.get(a), self.parts.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    fn material(&self, handle: MaterialHandle) -> Result<&Material, BackendError> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.materials.get(i))
            .ok_or(BackendError::UnknownMaterial(handle.0))
    }

    fn material_mut(
        &mut self,
        handle: MaterialHandle,
    ) -> Result<&mut Material, BackendError> {
        usize::try_from(handle.0)
            .ok()
            .and_then(|i| self.materials.get_mut(i))
            .ok_or(BackendError::UnknownMaterial(handle.0))
    }

    fn push_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle(self.materials.len() as u64 - 1)
    }

    fn describe(&self, path: &str) -> Result<ModelDescription, String> {
        if let Some(model) = self.models.get(path) {
            return Ok(model.clone());
        }
        let Some(root) = &self.model_root else {
            return Err(format!("model not found: {path}"));
        };
        let file = root.join(path);
        let text = std::fs::read_to_string(&file)
            .map_err(|e| format!("{}: {e}", file.display()))?;
        ModelDescription::from_toml(&text)
            .map_err(|e| format!("{}: {e}", file.display()))
    }

    /// Instantiate a manifest: one material per manifest entry, parts bound
    /// by name so that parts naming the same material share it.
    fn instantiate(
        &mut self,
        model: &ModelDescription,
    ) -> Result<LoadedModel, String> {
        if let Some((part, material)) = model
            .parts
            .iter()
            .find(|(_, material)| !model.materials.contains_key(*material))
        {
            return Err(format!(
                "part '{part}' references unknown material '{material}'"
            ));
        }

        let mut by_name = FxHashMap::default();
        for (name, diffuse) in &model.materials {
            let handle = self.push_material(Material {
                name: name.clone(),
                diffuse: *diffuse,
            });
            let _ = by_name.insert(name.as_str(), handle);
        }

        let mut parts = Vec::with_capacity(model.parts.len());
        for (part, material) in &model.parts {
            if let Some(&handle) = by_name.get(material.as_str()) {
                let _ = self.parts.insert(part.clone(), handle);
                parts.push(part.clone());
            }
        }
        Ok(LoadedModel::new(parts))
    }
}

impl RenderBackend for HeadlessBackend {
    fn configure_surface(
        &mut self,
        surface: &SurfaceOptions,
    ) -> Result<(), BackendError> {
        if surface.render_scale == 0 {
            return Err(BackendError::Other(
                "render scale must be at least 1".to_owned(),
            ));
        }
        self.surface = Some(surface.clone());
        Ok(())
    }

    fn create_scene(&mut self, clear_color: Color) {
        self.clear_color = Some(clear_color);
    }

    fn create_camera(
        &mut self,
        pose: CameraPose,
        target: Vec3,
        bounds: &CameraBounds,
        attach_controls: bool,
    ) {
        self.camera = Some(HeadlessCamera {
            pose,
            target,
            bounds: *bounds,
            controls_attached: attach_controls,
        });
    }

    fn apply_camera(&mut self, pose: CameraPose) {
        if let Some(camera) = &mut self.camera {
            camera.pose = pose;
        }
    }

    fn user_orbit(&mut self) -> Option<CameraPose> {
        self.pending_orbit.take()
    }

    fn add_overlay_plane(
        &mut self,
        overlay: &OverlayOptions,
    ) -> Result<(), BackendError> {
        if overlay.width <= 0.0 || overlay.height <= 0.0 {
            return Err(BackendError::Other(format!(
                "overlay '{}' has an empty extent",
                overlay.texture
            )));
        }
        self.overlays.push(overlay.clone());
        Ok(())
    }

    fn add_hemispheric_light(
        &mut self,
        name: &str,
        direction: Vec3,
        intensity: f32,
    ) {
        self.lights.push(HeadlessLight {
            name: name.to_owned(),
            direction,
            intensity,
        });
    }

    fn request_model(&mut self, path: &str, completion: LoadCompletion) {
        log::debug!("headless: queued load of '{path}'");
        self.pending.push((path.to_owned(), completion));
    }

    fn poll(&mut self) {
        if self.hold_loads {
            return;
        }
        for (path, completion) in std::mem::take(&mut self.pending) {
            match self.describe(&path).and_then(|m| self.instantiate(&m)) {
                Ok(model) => completion.succeed(model),
                Err(diagnostic) => completion.fail(diagnostic),
            }
        }
    }

    fn part_material(&self, part: &str) -> Result<MaterialHandle, BackendError> {
        self.parts
            .get(part)
            .copied()
            .ok_or_else(|| BackendError::UnknownPart(part.to_owned()))
    }

    fn clone_material(
        &mut self,
        material: MaterialHandle,
    ) -> Result<MaterialHandle, BackendError> {
        let source = self.material(material)?;
        let copy = Material {
            name: format!("{}.clone", source.name),
            diffuse: source.diffuse,
        };
        Ok(self.push_material(copy))
    }

    fn bind_material(
        &mut self,
        part: &str,
        material: MaterialHandle,
    ) -> Result<(), BackendError> {
        let _ = self.material(material)?;
        let slot = self
            .parts
            .get_mut(part)
            .ok_or_else(|| BackendError::UnknownPart(part.to_owned()))?;
        *slot = material;
        Ok(())
    }

    fn diffuse(&self, material: MaterialHandle) -> Result<Color, BackendError> {
        self.material(material).map(|m| m.diffuse)
    }

    fn set_diffuse(
        &mut self,
        material: MaterialHandle,
        color: Color,
    ) -> Result<(), BackendError> {
        self.material_mut(material)?.diffuse = color;
        Ok(())
    }

    fn resize(&mut self) {
        self.resizes += 1;
    }

    fn render_frame(&mut self) {
        self.frames_rendered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_model() -> ModelDescription {
        ModelDescription::from_toml(
            r#"
[materials]
M = { r = 0.2, g = 0.2, b = 0.2 }

[parts]
A = "M"
B = "M"
"#,
        )
        .unwrap()
    }

    fn load(backend: &mut HeadlessBackend, path: &str) -> Result<LoadedModel, String> {
        let (completion, rx) = LoadCompletion::pair();
        backend.request_model(path, completion);
        backend.poll();
        rx.try_recv().unwrap()
    }

    #[test]
    fn parts_naming_one_material_share_it() {
        let mut backend = HeadlessBackend::new().with_model("m", shared_model());
        let model = load(&mut backend, "m").unwrap();
        assert_eq!(model.parts, vec!["A".to_owned(), "B".to_owned()]);
        assert!(backend.shares_material("A", "B"));

        let shared = backend.part_material("A").unwrap();
        backend.set_diffuse(shared, Color::WHITE).unwrap();
        assert_eq!(backend.part_diffuse("B"), Some(Color::WHITE));
    }

    #[test]
    fn clone_and_rebind_breaks_sharing() {
        let mut backend = HeadlessBackend::new().with_model("m", shared_model());
        let _ = load(&mut backend, "m").unwrap();
        let shared = backend.part_material("A").unwrap();
        let copy = backend.clone_material(shared).unwrap();
        backend.bind_material("A", copy).unwrap();

        assert!(!backend.shares_material("A", "B"));
        assert_eq!(backend.part_material_name("A"), Some("M.clone"));
        backend.set_diffuse(copy, Color::WHITE).unwrap();
        assert_eq!(backend.part_diffuse("B"), Some(Color::rgb(0.2, 0.2, 0.2)));
    }

    #[test]
    fn unknown_model_fails_with_diagnostic() {
        let mut backend = HeadlessBackend::new();
        let err = load(&mut backend, "missing.toml").unwrap_err();
        assert!(err.contains("missing.toml"));
    }

    #[test]
    fn held_loads_stay_pending() {
        let mut backend = HeadlessBackend::new().with_model("m", shared_model());
        backend.hold_loads(true);
        let (completion, rx) = LoadCompletion::pair();
        backend.request_model("m", completion);
        backend.poll();
        assert!(backend.has_pending_load());
        assert!(rx.try_recv().is_err());

        backend.hold_loads(false);
        backend.poll();
        assert!(rx.try_recv().unwrap().is_ok());
    }

    #[test]
    fn dangling_material_reference_fails_load() {
        let model = ModelDescription::from_toml("[parts]\nA = \"nope\"").unwrap();
        let mut backend = HeadlessBackend::new().with_model("m", model);
        let err = load(&mut backend, "m").unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn rejected_manifest_binds_no_parts() {
        let model = ModelDescription::from_toml(
            r#"
[materials]
M = { r = 0.2, g = 0.2, b = 0.2 }

[parts]
A = "M"
Z = "nope"
"#,
        )
        .unwrap();
        let mut backend = HeadlessBackend::new().with_model("m", model);
        let _ = load(&mut backend, "m").unwrap_err();
        assert_eq!(
            backend.part_material("A"),
            Err(BackendError::UnknownPart("A".to_owned()))
        );
        assert_eq!(backend.part_diffuse("A"), None);
    }
}
