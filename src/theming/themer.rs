use rustc_hash::FxHashMap;

use crate::animation::Tween;
use crate::backend::{MaterialHandle, RenderBackend};
use crate::error::{BackendError, CommandError};
use crate::options::{AnimationOptions, Palette, RegionTable};
use crate::theming::Color;

/// A material owned by exactly one part.
///
/// Only [`MaterialThemer::isolate`] creates these, by cloning whatever
/// the part was loaded with and rebinding the part to the clone. Not
/// `Clone`: no other part can observe changes to its diffuse color.
#[derive(Debug)]
pub struct IsolatedMaterial {
    handle: MaterialHandle,
    diffuse: Color,
    tween: Option<Tween<Color>>,
    dirty: bool,
}

impl IsolatedMaterial {
    /// Backend handle of the private clone.
    #[must_use]
    pub fn handle(&self) -> MaterialHandle {
        self.handle
    }

    /// Diffuse color as of the last update.
    #[must_use]
    pub fn diffuse(&self) -> Color {
        self.diffuse
    }

    /// Whether a color fade is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

/// Recolors parts whose materials have been isolated.
pub struct MaterialThemer {
    parts: FxHashMap<String, IsolatedMaterial>,
    animation: AnimationOptions,
}

impl MaterialThemer {
    /// Themer with no isolated parts yet.
    #[must_use]
    pub fn new(animation: AnimationOptions) -> Self {
        Self {
            parts: FxHashMap::default(),
            animation,
        }
    }

    /// Give `part` a private copy of its material.
    ///
    /// Isolating an already isolated part is a no-op.
    pub fn isolate<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        part: &str,
    ) -> Result<(), BackendError> {
        if self.parts.contains_key(part) {
            return Ok(());
        }
        let shared = backend.part_material(part)?;
        let handle = backend.clone_material(shared)?;
        backend.bind_material(part, handle)?;
        let diffuse = backend.diffuse(handle)?;
        let _ = self.parts.insert(
            part.to_owned(),
            IsolatedMaterial {
                handle,
                diffuse,
                tween: None,
                dirty: false,
            },
        );
        log::debug!("theming: isolated '{part}' ({shared:?} -> {handle:?})");
        Ok(())
    }

    /// Set an isolated part's color immediately, without animating.
    ///
    /// Only the RGB channels change; opacity stays the material's own.
    pub fn seed(&mut self, part: &str, color: Color) -> Result<(), CommandError> {
        let material = self
            .parts
            .get_mut(part)
            .ok_or_else(|| CommandError::PartNotFound(part.to_owned()))?;
        material.tween = None;
        material.diffuse = color.with_alpha(material.diffuse.a);
        material.dirty = true;
        Ok(())
    }

    /// Start fading `part` to the palette color `color_name`.
    ///
    /// `part` is matched against isolated part ids first, then against
    /// region names whose target part is isolated. A fade already running
    /// on the same part is replaced, starting from the current color.
    /// Only RGB fades; the part keeps its current opacity throughout.
    pub fn set_color(
        &mut self,
        part: &str,
        color_name: &str,
        palette: &Palette,
        regions: &RegionTable,
    ) -> Result<(), CommandError> {
        let key = self
            .resolve(part, regions)
            .ok_or_else(|| CommandError::PartNotFound(part.to_owned()))?
            .to_owned();
        let color = palette.lookup(color_name)?;
        let animation = self.animation;
        let material = self
            .parts
            .get_mut(&key)
            .ok_or_else(|| CommandError::PartNotFound(part.to_owned()))?;
        material.tween = Some(Tween::new(
            material.diffuse,
            color.with_alpha(material.diffuse.a),
            animation.duration_secs,
            animation.easing,
        ));
        log::debug!("theming: '{key}' -> '{color_name}'");
        Ok(())
    }

    fn resolve<'a>(&'a self, part: &'a str, regions: &'a RegionTable) -> Option<&'a str> {
        if self.parts.contains_key(part) {
            return Some(part);
        }
        let target = regions.lookup(part).ok()?.target_part()?;
        self.parts.contains_key(target).then_some(target)
    }

    /// Advance every running fade. Returns true if any is still running.
    pub fn update(&mut self, dt: f32) -> bool {
        let mut animating = false;
        for material in self.parts.values_mut() {
            let Some(tween) = &mut material.tween else {
                continue;
            };
            material.diffuse = tween.advance(dt);
            material.dirty = true;
            if tween.is_complete() {
                material.tween = None;
            } else {
                animating = true;
            }
        }
        animating
    }

    /// Push changed colors to the backend.
    pub fn flush<B: RenderBackend>(&mut self, backend: &mut B) {
        for (part, material) in &mut self.parts {
            if !material.dirty {
                continue;
            }
            material.dirty = false;
            if let Err(e) = backend.set_diffuse(material.handle, material.diffuse) {
                log::warn!("theming: could not recolor '{part}': {e}");
            }
        }
    }

    /// Current color of an isolated part.
    #[must_use]
    pub fn color_of(&self, part: &str) -> Option<Color> {
        self.parts.get(part).map(IsolatedMaterial::diffuse)
    }

    /// The isolated material of `part`, if any.
    #[must_use]
    pub fn material(&self, part: &str) -> Option<&IsolatedMaterial> {
        self.parts.get(part)
    }

    /// Whether `part` owns a private material.
    #[must_use]
    pub fn is_isolated(&self, part: &str) -> bool {
        self.parts.contains_key(part)
    }

    /// Number of isolated parts.
    #[must_use]
    pub fn isolated_count(&self) -> usize {
        self.parts.len()
    }

    /// Whether any fade is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.parts.values().any(IsolatedMaterial::is_animating)
    }
}
