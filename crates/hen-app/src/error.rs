//! Error types for the hen-app session layer.

use std::path::PathBuf;

/// Application error shared by the CLI and any other frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Streamset error: {0}")]
    Project(String),

    #[error("Failed to read streamset file: {path}")]
    StreamsetRead {
        path: PathBuf,
        source: hen_project::ProjectError,
    },

    #[error("Failed to write streamset file: {path}")]
    StreamsetWrite {
        path: PathBuf,
        source: hen_project::ProjectError,
    },

    #[error("Build blocked by {errors} validation error(s)")]
    Blocked { errors: usize },

    #[error("Build the network before solving")]
    NotBuilt,

    #[error("Stream not found: {0}")]
    StreamNotFound(String),

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<hen_project::ProjectError> for AppError {
    fn from(err: hen_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Backend {
            message: format!("Malformed response: {err}"),
        }
    }
}
