use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::encoder::TextEncoder;
use super::error::EmbeddingError;

/// Encoder returning preset vectors by exact text; unknown text maps to the
/// zero vector. Counts calls so tests can assert on build-once behaviour.
#[derive(Debug, Default)]
pub struct MockEncoder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    failing: bool,
    encode_calls: AtomicUsize,
    batch_calls: AtomicUsize,
}

impl MockEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    /// Encoder whose every call fails.
    pub fn failing(dim: usize) -> Self {
        Self {
            dim,
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Unit vector whose cosine with the `e0` axis is exactly `similarity`.
    ///
    /// The orthogonal remainder goes on axis `axis` (must be >= 1).
    pub fn vector_at(dim: usize, similarity: f32, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[0] = similarity;
        v[axis] = (1.0 - similarity * similarity).max(0.0).sqrt();
        v
    }

    /// The `e0` axis; pair with [`MockEncoder::vector_at`].
    pub fn query_axis(dim: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[0] = 1.0;
        v
    }

    pub fn encode_calls(&self) -> usize {
        self.encode_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

impl TextEncoder for MockEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.encode_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock encoder failure".to_string(),
            });
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dim]))
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        texts.iter().map(|text| self.encode(text)).collect()
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}
