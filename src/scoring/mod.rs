//! Confidence scoring over retrieved candidates.
//!
//! The score is a heuristic, not a calibrated probability: the top
//! candidate's similarity, plus a flat boost (capped at `1.0`) when more
//! than one candidate clears the high-similarity line. How many candidates
//! clear it beyond two makes no difference.
//!
//! Candidates are expected most-similar first (as [`FaqIndex::retrieve`]
//! returns them); the scorer reads the first one as the best and never
//! re-sorts.
//!
//! [`FaqIndex::retrieve`]: crate::index::FaqIndex::retrieve

pub mod scorer;

#[cfg(test)]
mod tests;

pub use scorer::ConfidenceScorer;
