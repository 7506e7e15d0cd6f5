//! Per-instance viewer configuration with TOML preset support.
//!
//! Everything a viewer instance knows about its model lives here: the
//! region table, the palette, which parts are themeable, camera placement
//! and limits, animation timing, lighting, and the optional decorative
//! overlay. The engine itself carries no domain knowledge beyond these
//! inputs. Built-in presets for the chair and robot viewers are embedded
//! from `assets/presets/`.

mod animation;
mod camera;
mod lighting;
mod palette;
mod regions;
mod scene;
mod theming;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use palette::Palette;
pub use regions::{Region, RegionTable};
pub use scene::{ModelOptions, OverlayOptions, SceneOptions, SurfaceOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use theming::ThemingOptions;

use crate::error::ShowroomError;

/// Presets compiled into the crate, by name.
const BUILTIN_PRESETS: &[(&str, &str)] = &[
    ("chair", include_str!("../../assets/presets/chair.toml")),
    ("robot", include_str!("../../assets/presets/robot.toml")),
];

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Drawing surface setup.
    pub surface: SurfaceOptions,
    /// Scene background.
    pub scene: SceneOptions,
    /// Camera placement and limits.
    pub camera: CameraOptions,
    /// Transition timing.
    pub animation: AnimationOptions,
    /// Named camera viewpoints.
    pub regions: RegionTable,
    /// Named colors.
    pub palette: Palette,
    /// Themeable parts and their initial colors.
    pub theming: ThemingOptions,
    /// The model resource.
    pub model: ModelOptions,
    /// The ambient light.
    pub lighting: LightingOptions,
    /// Optional decorative plane.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayOptions>,
}

impl Options {
    /// Generate JSON Schema describing the options file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text and validate them.
    pub fn from_toml(text: &str) -> Result<Self, ShowroomError> {
        let options: Self = toml::from_str(text)
            .map_err(|e| ShowroomError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ShowroomError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ShowroomError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ShowroomError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(ShowroomError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Names of the presets compiled into the crate.
    #[must_use]
    pub fn builtin_presets() -> Vec<&'static str> {
        BUILTIN_PRESETS.iter().map(|(name, _)| *name).collect()
    }

    /// A built-in preset by name.
    pub fn builtin(name: &str) -> Result<Self, ShowroomError> {
        let (_, text) = BUILTIN_PRESETS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| {
                ShowroomError::OptionsParse(format!("no built-in preset '{name}'"))
            })?;
        Self::from_toml(text)
    }

    /// The chair viewer's configuration.
    pub fn chair() -> Result<Self, ShowroomError> {
        Self::builtin("chair")
    }

    /// The robot viewer's configuration.
    pub fn robot() -> Result<Self, ShowroomError> {
        Self::builtin("robot")
    }

    /// Check authoring-time invariants.
    ///
    /// Runtime code relies on these holding: the controller issues region
    /// poses without clamping, and the load pipeline seeds defaults without
    /// re-checking the palette.
    pub fn validate(&self) -> Result<(), ShowroomError> {
        let malformed = |msg: String| Err(ShowroomError::MalformedConfiguration(msg));
        let bounds = &self.camera.bounds;

        if let Some(axis) = bounds.first_unordered_axis() {
            return malformed(format!("camera {axis} bounds are inverted or non-finite"));
        }
        if !bounds.contains(&self.camera.initial) {
            return malformed(format!(
                "initial camera pose {:?} lies outside the camera bounds",
                self.camera.initial
            ));
        }
        for (name, region) in self.regions.iter() {
            if !bounds.contains(&region.pose()) {
                return malformed(format!(
                    "region '{name}' pose {:?} lies outside the camera bounds",
                    region.pose()
                ));
            }
        }
        for (name, color) in self.palette.iter() {
            if !color.is_normalized() {
                return malformed(format!(
                    "palette color '{name}' has a channel outside [0, 1]"
                ));
            }
        }
        for (part, color) in &self.theming.defaults {
            if !self.theming.is_themeable(part) {
                return malformed(format!(
                    "default color given for part '{part}', which is not themeable"
                ));
            }
            if self.palette.lookup(color).is_err() {
                return malformed(format!(
                    "default color '{color}' for part '{part}' is not in the palette"
                ));
            }
        }
        let duration = self.animation.duration_secs;
        if !duration.is_finite() || duration < 0.0 {
            return malformed(format!("animation duration {duration} is not usable"));
        }
        Ok(())
    }
}
