//! Commands a mounted viewer accepts from its host.
//!
//! Hosts build a [`ViewerCommand`] (or deserialize one from JSON) and
//! either publish it on a [`CommandBus`](super::bus::CommandBus) or hand
//! it straight to [`Viewer::execute`](super::Viewer::execute).

use std::fmt;

use serde::{Deserialize, Serialize};

/// One external request to the viewer.
///
/// ```ignore
/// bus.dispatch(ViewerCommand::MoveCamera { region: "front view".into() });
/// bus.dispatch(ViewerCommand::ChangeColor {
///     part: "PAYLOAD".into(),
///     color: "orange".into(),
/// });
/// ```
///
/// On the wire the variant is carried in a `kind` field:
/// `{"kind":"move-camera","region":"front view"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewerCommand {
    /// The drawing surface changed size.
    Resize,

    /// Animate the camera to a named region.
    MoveCamera {
        /// Region name.
        region: String,
    },

    /// Fade a part to a named palette color.
    ChangeColor {
        /// Part id, or the name of a region framing the part.
        part: String,
        /// Palette color name.
        color: String,
    },
}

impl ViewerCommand {
    /// Which subscription this command is delivered to.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Resize => CommandKind::Resize,
            Self::MoveCamera { .. } => CommandKind::MoveCamera,
            Self::ChangeColor { .. } => CommandKind::ChangeColor,
        }
    }
}

/// Payload-free tag of a [`ViewerCommand`], used as a subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandKind {
    /// [`ViewerCommand::Resize`].
    Resize,
    /// [`ViewerCommand::MoveCamera`].
    MoveCamera,
    /// [`ViewerCommand::ChangeColor`].
    ChangeColor,
}

impl CommandKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 3] = [Self::Resize, Self::MoveCamera, Self::ChangeColor];

    /// Wire name of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::MoveCamera => "move-camera",
            Self::ChangeColor => "change-color",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
