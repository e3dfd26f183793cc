use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid landmark {landmark:?}: {reason}")]
    InvalidLandmark { landmark: String, reason: String },

    #[error("Failed to parse sectors file: {0}")]
    SectorsParse(#[from] serde_yaml::Error),

    #[error("Failed to write galaxy data to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed galaxy file at line {line}: {message}")]
    MalformedGalaxyFile { line: usize, message: String },

    #[error("In-process memory scanning is not supported on this platform")]
    PlatformUnsupported,

    #[error("Failed to open process memory: {0}")]
    ProcessOpenFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    pub(crate) fn invalid_landmark(landmark: &str, reason: impl Into<String>) -> Self {
        Error::InvalidLandmark {
            landmark: landmark.to_string(),
            reason: reason.into(),
        }
    }
}
