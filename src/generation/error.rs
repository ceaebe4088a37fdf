use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generator model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load generator model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("invalid generation configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("prompt produced no tokens")]
    EmptyPrompt,

    #[error("generation failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("decoding failed: {reason}")]
    DecodeFailed { reason: String },
}

impl From<candle_core::Error> for GenerationError {
    fn from(err: candle_core::Error) -> Self {
        GenerationError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<EmbeddingError> for GenerationError {
    fn from(err: EmbeddingError) -> Self {
        GenerationError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
