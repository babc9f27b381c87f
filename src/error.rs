use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{0}` is not a finishing position (expected 1-11, P1-P10 or dnf)")]
    InvalidPosition(String),

    #[error("failed to open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
}

pub type Result<T> = std::result::Result<T, Error>;
