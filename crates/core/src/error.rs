use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::state::RunState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("Unknown placeholder `{}` in {} arguments. Known placeholders: {}", .placeholder, .operation, .known)]
    UnknownPlaceholder {
        operation: String,
        placeholder: String,
        known: String,
    },

    #[error("Please provide all fields (missing: {}).", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("The {} panel is still running a previous invocation.", .0)]
    PanelBusy(String),

    #[error("Invalid state transition from {} on {}", .from, .event)]
    InvalidTransition { from: RunState, event: String },

    #[error("The build command is empty.")]
    EmptyBuildCommand,

    #[error("Could not determine the application directory: {}", .0)]
    AppDir(std::io::Error),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
