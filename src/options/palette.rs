use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::theming::Color;

/// Color name → RGBA, authored per viewer instance.
#[derive(
    Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema,
)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
}

impl Palette {
    /// Empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a named color.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, color: Color) -> Self {
        let _ = self.colors.insert(name.into(), color);
        self
    }

    /// Color named `name`, matched exactly.
    pub fn lookup(&self, name: &str) -> Result<Color, CommandError> {
        self.colors
            .get(name)
            .copied()
            .ok_or_else(|| CommandError::ColorNotFound(name.to_owned()))
    }

    /// All entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
