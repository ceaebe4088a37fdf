use thiserror::Error;

use crate::index::IndexError;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid policy configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("retrieval failed: {0}")]
    Index(#[from] IndexError),
}
