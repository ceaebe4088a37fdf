use serde::Serialize;

use crate::corpus::FaqEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One retrieval hit. Produced fresh per question.
pub struct RetrievedCandidate {
    pub faq: FaqEntry,
    /// Cosine similarity to the question, in `[-1, 1]`.
    pub similarity: f32,
    /// Position of `faq` in the corpus.
    pub rank_index: usize,
}

impl RetrievedCandidate {
    pub fn new(faq: FaqEntry, similarity: f32, rank_index: usize) -> Self {
        Self {
            faq,
            similarity,
            rank_index,
        }
    }
}
