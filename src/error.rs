//! Error types for dayport

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dayport
#[derive(Debug, Error)]
pub enum DayportError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Geocoding failed: {0}")]
    Geocode(String),

    #[error("Cannot digest photo {}: {source}", .path.display())]
    Digest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Photo {0} has neither a byte source nor a recorded digest")]
    MissingPhotoSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl DayportError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DayportError::MalformedInput(_) | DayportError::Json(_) => 2,
            DayportError::Geocode(_) => 3,
            DayportError::Digest { .. } | DayportError::MissingPhotoSource(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DayportError::MalformedInput(_) | DayportError::Json(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that the input is the JSON file from the export, not the HTML one\n\
                    • Make sure the file was not truncated while downloading",
                    self
                )
            }
            DayportError::Geocode(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the geocode.api_key setting or DAYPORT_GEOCODE_KEY\n\
                    • Disable lookups with `enabled = false` under [geocode] in dayport.toml",
                    self
                )
            }
            DayportError::Digest { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Photos are resolved relative to the export directory\n\
                    • Pass --media-root when importing a single posts file",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DayportError
pub type Result<T> = std::result::Result<T, DayportError>;
