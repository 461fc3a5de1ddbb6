use thiserror::Error;

use crate::buildpack::filename::FilenameError;
use crate::platform::error::ClientError;

/// Errors that abort an aggregation pass
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Filename(#[from] FilenameError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Invalid app timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
