use tracing::debug;

use crate::constants::{HIGH_SIMILARITY_THRESHOLD, MULTI_MATCH_BOOST};
use crate::index::RetrievedCandidate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceScorer {
    /// Similarity a candidate must strictly exceed to count as a high match.
    pub high_similarity: f32,
    /// Added when more than one candidate is a high match.
    pub boost: f32,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self {
            high_similarity: HIGH_SIMILARITY_THRESHOLD,
            boost: MULTI_MATCH_BOOST,
        }
    }
}

impl ConfidenceScorer {
    pub fn new(high_similarity: f32, boost: f32) -> Self {
        Self {
            high_similarity,
            boost,
        }
    }

    /// Scores a similarity-sorted candidate list. Empty input scores `0.0`.
    ///
    /// The result is clamped to `[0, 1]`.
    pub fn assess(&self, candidates: &[RetrievedCandidate]) -> f32 {
        let Some(best) = candidates.first() else {
            return 0.0;
        };

        let high_count = candidates
            .iter()
            .filter(|c| c.similarity > self.high_similarity)
            .count();

        // Cosine strays outside [0, 1] for opposed vectors and by rounding.
        let mut confidence = best.similarity.clamp(0.0, 1.0);
        if high_count > 1 {
            confidence = (confidence + self.boost).min(1.0);
        }

        debug!(
            max_similarity = best.similarity,
            high_count,
            confidence,
            "Assessed confidence"
        );

        confidence
    }
}
