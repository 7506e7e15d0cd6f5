use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Theming", inline)]
#[serde(default)]
/// Which parts can be recolored, and how they start out.
pub struct ThemingOptions {
    /// Part ids whose materials are isolated after load.
    pub parts: Vec<String>,
    /// Part id → palette color applied right after isolation.
    pub defaults: BTreeMap<String, String>,
}

impl ThemingOptions {
    /// Whether `part` is listed as themeable.
    #[must_use]
    pub fn is_themeable(&self, part: &str) -> bool {
        self.parts.iter().any(|p| p == part)
    }
}
