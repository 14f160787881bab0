// src/error.rs
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceRankError {
    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed record in {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Pipeline failure: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, PlaceRankError>;

impl PlaceRankError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            source,
            path: path.to_path_buf(),
        }
    }

    pub fn decode(path: &Path, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// True for errors caused by bad input rather than the environment.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::InvalidGraph(_) | Self::Config { .. }
        )
    }
}

// Allow `?` on std::io::Error by converting to PlaceRankError::Io with unknown path.
impl From<std::io::Error> for PlaceRankError {
    fn from(source: std::io::Error) -> Self {
        PlaceRankError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
