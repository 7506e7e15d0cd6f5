//! Crate-level error types.

use std::fmt;

use crate::engine::command::CommandKind;

/// Errors produced while configuring or mounting a viewer.
#[derive(Debug)]
pub enum ShowroomError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Authored configuration violates an invariant (e.g. a region pose
    /// outside the camera bounds).
    MalformedConfiguration(String),
    /// The rendering backend refused an operation.
    Backend(BackendError),
    /// The model load could not be started.
    Load(LoadError),
}

impl fmt::Display for ShowroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::MalformedConfiguration(msg) => {
                write!(f, "malformed configuration: {msg}")
            }
            Self::Backend(e) => write!(f, "backend error: {e}"),
            Self::Load(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ShowroomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Backend(e) => Some(e),
            Self::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShowroomError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<BackendError> for ShowroomError {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

impl From<LoadError> for ShowroomError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

/// A runtime command that could not be carried out.
///
/// These never escape the frame loop: commands delivered over the bus are
/// logged and dropped, leaving camera and material state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No region with this name in the instance's region table.
    RegionNotFound(String),
    /// No isolated part with this id (or region alias).
    PartNotFound(String),
    /// No palette entry with this name.
    ColorNotFound(String),
    /// The command arrived before the model finished loading (or after
    /// the load failed).
    NotReady(CommandKind),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegionNotFound(name) => write!(f, "unknown region '{name}'"),
            Self::PartNotFound(id) => write!(f, "unknown part '{id}'"),
            Self::ColorNotFound(name) => write!(f, "unknown color '{name}'"),
            Self::NotReady(kind) => {
                write!(f, "'{kind}' received before the model was ready")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Failure of the one-shot model load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The backend reported a failure, or dropped the request unanswered.
    AssetLoadFailed(String),
    /// `start` was called on a pipeline that already issued its request.
    AlreadyStarted,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoadFailed(diagnostic) => {
                write!(f, "asset load failed: {diagnostic}")
            }
            Self::AlreadyStarted => write!(f, "model load already started"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Error reported by a [`RenderBackend`](crate::backend::RenderBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The part id is not present in the loaded scene.
    UnknownPart(String),
    /// The material handle does not refer to a live material.
    UnknownMaterial(u64),
    /// Any other backend-specific failure.
    Other(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPart(id) => write!(f, "no part '{id}' in scene"),
            Self::UnknownMaterial(h) => write!(f, "no material #{h}"),
            Self::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let e = CommandError::RegionNotFound("nowhere".to_owned());
        assert_eq!(e.to_string(), "unknown region 'nowhere'");
        let e = CommandError::NotReady(CommandKind::MoveCamera);
        assert_eq!(
            e.to_string(),
            "'move-camera' received before the model was ready"
        );
    }

    #[test]
    fn backend_error_is_source() {
        use std::error::Error as _;
        let e = ShowroomError::from(BackendError::UnknownPart("A".to_owned()));
        assert!(e.source().is_some());
    }
}
