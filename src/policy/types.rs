use serde::Serialize;

use super::config::PolicyConfig;

/// Confidence band a question falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Above the direct-answer cutoff.
    HighConfidence,
    /// Between the two cutoffs.
    ModerateConfidence,
    /// Below the escalation threshold.
    LowConfidence,
}

impl Decision {
    /// Direct-answer cutoff first, then escalation threshold, else moderate.
    pub fn classify(confidence: f32, config: &PolicyConfig) -> Self {
        if confidence > config.direct_answer_cutoff {
            Decision::HighConfidence
        } else if confidence < config.escalation_threshold {
            Decision::LowConfidence
        } else {
            Decision::ModerateConfidence
        }
    }
}

/// Where the returned answer text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Best FAQ's stored answer (high confidence).
    Direct,
    /// Language-model paraphrase over retrieved context.
    Generated,
    /// Best FAQ's stored answer because generation failed or is unavailable.
    Fallback,
    /// Human hand-off message.
    Escalated,
}

impl AnswerSource {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            AnswerSource::Direct => "direct",
            AnswerSource::Generated => "generated",
            AnswerSource::Fallback => "fallback",
            AnswerSource::Escalated => "escalated",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_header_value())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentResponse {
    pub answer: String,
    /// Heuristic confidence in `[0, 1]`.
    pub confidence: f32,
    pub decision: Decision,
    pub source: AnswerSource,
}
