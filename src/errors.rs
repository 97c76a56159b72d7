use thiserror::Error;

use crate::id::RecordId;

pub type Result<T> = std::result::Result<T, StashError>;

#[derive(Error, Debug)]
pub enum StashError {
    /// An operation referenced an id with no record behind it. Benign for
    /// most operations; duplication surfaces it because callers expect a
    /// fresh id back.
    #[error("no record with id {0}")]
    NotFound(RecordId),
    /// A rename was rejected because the trimmed name was empty. The record
    /// keeps its prior name.
    #[error("invalid record name {0:?}")]
    InvalidName(String),
    /// The platform lacks the named capability.
    #[error("platform capability unavailable: {0}")]
    Unsupported(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
