use tracing::warn;

use crate::constants::{DEFAULT_DIRECT_ANSWER_CUTOFF, DEFAULT_ESCALATION_THRESHOLD, DEFAULT_TOP_K};

use super::error::PolicyError;

/// Policy knobs for [`FaqAgent`](super::FaqAgent).
///
/// The two cutoffs are independent: `direct_answer_cutoff` is checked first,
/// so a confidence above it answers verbatim whatever the escalation
/// threshold is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    /// Confidence strictly below this escalates to a human. Default: `0.6`.
    pub escalation_threshold: f32,
    /// Confidence strictly above this returns the stored answer. Default: `0.8`.
    pub direct_answer_cutoff: f32,
    /// Candidates retrieved per question. Default: `3`.
    pub top_k: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: DEFAULT_ESCALATION_THRESHOLD,
            direct_answer_cutoff: DEFAULT_DIRECT_ANSWER_CUTOFF,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl PolicyConfig {
    pub fn with_escalation_threshold(mut self, threshold: f32) -> Self {
        self.escalation_threshold = threshold;
        self
    }

    pub fn with_direct_answer_cutoff(mut self, cutoff: f32) -> Self {
        self.direct_answer_cutoff = cutoff;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(0.0..=1.0).contains(&self.escalation_threshold) {
            return Err(PolicyError::InvalidConfig {
                reason: format!(
                    "escalation_threshold must be between 0.0 and 1.0, got {}",
                    self.escalation_threshold
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.direct_answer_cutoff) {
            return Err(PolicyError::InvalidConfig {
                reason: format!(
                    "direct_answer_cutoff must be between 0.0 and 1.0, got {}",
                    self.direct_answer_cutoff
                ),
            });
        }

        if self.top_k == 0 {
            return Err(PolicyError::InvalidConfig {
                reason: "top_k must be at least 1".to_string(),
            });
        }

        if self.escalation_threshold > self.direct_answer_cutoff {
            warn!(
                escalation_threshold = self.escalation_threshold,
                direct_answer_cutoff = self.direct_answer_cutoff,
                "Escalation threshold is above the direct-answer cutoff; generated answers are unreachable"
            );
        }

        Ok(())
    }
}
