//! FAQ index: corpus entries plus their embeddings, searched by cosine similarity.
//!
//! Embeddings are computed from [`FaqEntry::index_text`] in corpus order, so
//! `entries[i]` and `embeddings[i]` always describe the same FAQ.
//!
//! # Build-once
//!
//! [`FaqIndex::build`] is the only place the corpus is encoded. It is
//! guarded by a lock with a double-checked `OnceLock`, so concurrent callers
//! racing on first use trigger exactly one batch encode and never observe a
//! partially built index. [`FaqIndex::retrieve`] calls `build` first, which
//! is a cheap no-op once the embeddings exist.

pub mod error;
pub mod types;


pub use error::IndexError;
pub use types::RetrievedCandidate;

use std::cmp::Ordering;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::constants::DEFAULT_TOP_K;
use crate::corpus::FaqEntry;
use crate::embedding::TextEncoder;

/// Cosine similarity, `dot(a, b) / (|a| * |b|)`.
///
/// Returns `0.0` for empty, mismatched or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let (dot, na, nb) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(d, aa, bb), (x, y)| {
            (d + x * y, aa + x * x, bb + y * y)
        });

    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na.sqrt() * nb.sqrt())
    }
}

pub struct FaqIndex<E: TextEncoder> {
    encoder: E,
    entries: Vec<FaqEntry>,
    embeddings: OnceLock<Vec<Vec<f32>>>,
    build_lock: Mutex<()>,
}

impl<E: TextEncoder> std::fmt::Debug for FaqIndex<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqIndex")
            .field("entries", &self.entries.len())
            .field("built", &self.is_built())
            .field("embedding_dim", &self.encoder.embedding_dim())
            .finish()
    }
}

impl<E: TextEncoder> FaqIndex<E> {
    /// Wraps a corpus. Nothing is encoded until [`FaqIndex::build`].
    pub fn new(encoder: E, entries: Vec<FaqEntry>) -> Self {
        Self {
            encoder,
            entries,
            embeddings: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// Encodes the corpus once. Later calls return immediately.
    pub fn build(&self) -> Result<(), IndexError> {
        if self.embeddings.get().is_some() {
            return Ok(());
        }

        let _guard = self.build_lock.lock();
        if self.embeddings.get().is_some() {
            return Ok(());
        }

        let texts: Vec<String> = self.entries.iter().map(FaqEntry::index_text).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let embeddings = self.encoder.encode_batch(&refs)?;

        if embeddings.len() != self.entries.len() {
            return Err(IndexError::LengthMismatch {
                expected: self.entries.len(),
                actual: embeddings.len(),
            });
        }

        let dim = self.encoder.embedding_dim();
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dim) {
            return Err(IndexError::DimensionMismatch {
                expected: dim,
                actual: bad.len(),
            });
        }

        info!(entries = embeddings.len(), dim, "FAQ index built");

        // Holding build_lock, nobody else can have set it.
        let _ = self.embeddings.set(embeddings);
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.embeddings.get().is_some()
    }

    /// Built embeddings, index-aligned with [`FaqIndex::entries`].
    pub fn embeddings(&self) -> Option<&[Vec<f32>]> {
        self.embeddings.get().map(Vec::as_slice)
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Returns at most `top_k` candidates, most similar first.
    ///
    /// The sort is stable over corpus order, so equal similarities keep the
    /// lower corpus index first.
    pub fn retrieve(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedCandidate>, IndexError> {
        self.build()?;

        let embeddings = match self.embeddings.get() {
            Some(e) if !e.is_empty() && top_k > 0 => e,
            _ => return Ok(vec![]),
        };

        let query = self.encoder.encode(question)?;
        let dim = self.encoder.embedding_dim();
        if query.len() != dim {
            return Err(IndexError::DimensionMismatch {
                expected: dim,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = embeddings
            .iter()
            .enumerate()
            .map(|(idx, embedding)| (idx, cosine_similarity(&query, embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(top_k);

        debug!(
            question_len = question.len(),
            hits = scored.len(),
            top_similarity = scored.first().map(|(_, s)| *s),
            "Retrieved FAQ candidates"
        );

        Ok(scored
            .into_iter()
            .map(|(idx, similarity)| {
                RetrievedCandidate::new(self.entries[idx].clone(), similarity, idx)
            })
            .collect())
    }

    /// [`FaqIndex::retrieve`] with the default `top_k` of 3.
    pub fn retrieve_top(&self, question: &str) -> Result<Vec<RetrievedCandidate>, IndexError> {
        self.retrieve(question, DEFAULT_TOP_K)
    }
}
