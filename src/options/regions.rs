use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;
use crate::error::CommandError;

/// A named camera viewpoint, optionally tied to the part it frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Region {
    /// Part this region shows off. Also accepted in place of a part id by
    /// color commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    /// Longitudinal angle in radians.
    pub alpha: f32,
    /// Latitudinal angle in radians.
    pub beta: f32,
    /// Distance from the camera target.
    pub radius: f32,
}

impl Region {
    /// Region with no target part.
    #[must_use]
    pub fn new(alpha: f32, beta: f32, radius: f32) -> Self {
        Self {
            part: None,
            alpha,
            beta,
            radius,
        }
    }

    /// Same region, framing `part`.
    #[must_use]
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.part = Some(part.into());
        self
    }

    /// Camera pose of this region.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.alpha, self.beta, self.radius)
    }

    /// Target part id; an authored empty id counts as none.
    #[must_use]
    pub fn target_part(&self) -> Option<&str> {
        self.part.as_deref().filter(|p| !p.is_empty())
    }
}

/// Region name → viewpoint, authored per viewer instance.
#[derive(
    Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema,
)]
#[serde(transparent)]
pub struct RegionTable {
    regions: BTreeMap<String, Region>,
}

impl RegionTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a region.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, region: Region) -> Self {
        let _ = self.regions.insert(name.into(), region);
        self
    }

    /// Region named `name`.
    pub fn lookup(&self, name: &str) -> Result<&Region, CommandError> {
        self.regions
            .get(name)
            .ok_or_else(|| CommandError::RegionNotFound(name.to_owned()))
    }

    /// All regions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Region)> {
        self.regions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the table has no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        let table = RegionTable::new()
            .with("front", Region::new(1.0, 1.0, 10.0));
        assert_eq!(table.lookup("front").unwrap().pose(), CameraPose::new(1.0, 1.0, 10.0));
        assert_eq!(
            table.lookup("nonexistent"),
            Err(CommandError::RegionNotFound("nonexistent".to_owned()))
        );
    }

    #[test]
    fn empty_part_id_is_no_target() {
        let region: Region =
            toml::from_str("part = \"\"\nalpha = 6.283\nbeta = 1.396\nradius = 18.0")
                .unwrap();
        assert_eq!(region.target_part(), None);

        let region = Region::new(0.0, 0.0, 1.0).with_part("PAYLOAD");
        assert_eq!(region.target_part(), Some("PAYLOAD"));
    }

    #[test]
    fn names_may_contain_spaces() {
        let table: RegionTable = toml::from_str(
            r#"
["front view"]
alpha = 6.283
beta = 1.396
radius = 18.0
"#,
        )
        .unwrap();
        assert!(table.lookup("front view").is_ok());
        assert_eq!(table.len(), 1);
    }
}
