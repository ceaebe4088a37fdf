use std::sync::Arc;

use super::error::EmbeddingError;

/// Text to fixed-size vector. Implementations must be deterministic for a
/// given input and loaded model.
pub trait TextEncoder: Send + Sync {
    /// Encodes one string.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Encodes a batch, preserving input order.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Length of every vector this encoder produces.
    fn embedding_dim(&self) -> usize;

    /// `true` when no real model backs the encoder.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<T: TextEncoder + ?Sized> TextEncoder for Arc<T> {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).encode(text)
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode_batch(texts)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}
