use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid portfolio content: {0}")]
    ContentError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Terminal too small (minimum 60x20)")]
    TerminalTooSmall,

    #[error("No CV configured. Set cv_path in config.json or pass --cv")]
    NoCvConfigured,

    #[error("CV download failed: {0}")]
    DownloadError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
