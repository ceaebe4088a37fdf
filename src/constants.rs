//! Cross-cutting, shared constants.
//!
//! The numeric policy knobs live here as defaults only. Every one of them is
//! overridable through the owning component's config, so nothing below is
//! consulted directly by the decision logic.

/// Output dimension of all-MiniLM-L6-v2.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens the sentence encoder looks at (sentence-transformers default for MiniLM).
pub const DEFAULT_EMBED_MAX_SEQ_LEN: usize = 256;

/// Candidates retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Similarity a candidate must strictly exceed to count as a "high" match.
pub const HIGH_SIMILARITY_THRESHOLD: f32 = 0.6;

/// Flat boost applied when more than one candidate is a high match.
pub const MULTI_MATCH_BOOST: f32 = 0.1;

/// Confidence above which the stored answer is returned verbatim.
pub const DEFAULT_DIRECT_ANSWER_CUTOFF: f32 = 0.8;

/// Component default for the escalation threshold.
///
/// Deployments usually pass their own value (see `Config::escalation_threshold`).
pub const DEFAULT_ESCALATION_THRESHOLD: f32 = 0.6;

/// Escalation threshold the HTTP service is deployed with.
pub const DEPLOYED_ESCALATION_THRESHOLD: f32 = 0.5;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;
pub const DEFAULT_SAMPLING_TOP_K: usize = 50;
pub const DEFAULT_MAX_NEW_TOKENS: usize = 100;
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 800;

/// End-of-sequence marker for Qwen2 instruct models.
pub const DEFAULT_EOS_TOKEN: &str = "<|im_end|>";

/// Returned when there is no candidate to answer from.
pub const NO_INFORMATION_ANSWER: &str = "No information about that topic.";

/// Marker that precedes the model's continuation in the prompt.
pub const ANSWER_MARKER: &str = "Answer:";
