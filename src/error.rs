use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for the batch downloader.
///
/// Only [`AppError::DownloadFailed`] is recoverable: the batch records it and
/// moves on to the next URL. Every other variant ends the run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Youtube error: {0}")]
    Youtube(#[from] yt_dlp::error::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Download of {url} failed: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Downloader error: {0}")]
    Collaborator(String),

    #[error("Destination already exists: {}", .0.display())]
    ArchiveConflict(PathBuf),

    #[error("{0}")]
    Custom(String),
}

impl From<&str> for AppError {
    fn from(error: &str) -> Self {
        AppError::Custom(error.to_string())
    }
}

impl From<String> for AppError {
    fn from(error: String) -> Self {
        AppError::Custom(error)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
