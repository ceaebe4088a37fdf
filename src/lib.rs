//! faqdesk library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`MiniLmEmbedder`], [`TextEncoder`] - sentence embeddings
//! - [`FaqIndex`], [`cosine_similarity`] - corpus retrieval
//! - [`ConfidenceScorer`] - heuristic confidence over retrieved candidates
//! - [`QwenGenerator`], [`AnswerGenerator`], [`EscalationPicker`] - answers
//! - [`FaqAgent`], [`PolicyConfig`], [`Decision`] - the answer/generate/escalate decision
//!
//! ## Service
//! - [`Config`], [`ConfigError`] - process configuration
//! - [`JsonlSessionLog`], [`InteractionLogger`] - interaction log
//! - [`gateway`] - HTTP routes
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod gateway;
pub mod generation;
pub mod index;
pub mod policy;
pub mod scoring;
pub mod session;

pub use config::{Config, ConfigError};
pub use corpus::{CorpusError, FaqEntry, load_corpus, parse_corpus};
pub use embedding::{EmbeddingError, MiniLmConfig, MiniLmEmbedder, TextEncoder};
pub use generation::{
    AnswerGenerator, ESCALATION_MESSAGES, EscalationPicker, GenerationConfig, GenerationError,
    QwenGenerator, verbatim_answer,
};
pub use index::{FaqIndex, IndexError, RetrievedCandidate, cosine_similarity};
pub use policy::{AgentResponse, AnswerSource, Decision, FaqAgent, PolicyConfig, PolicyError};
pub use scoring::ConfidenceScorer;
pub use session::{
    InteractionLogger, InteractionRecord, JsonlSessionLog, SessionLogError, load_sessions,
};

#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
#[cfg(any(test, feature = "mock"))]
pub use generation::MockGenerator;
#[cfg(any(test, feature = "mock"))]
pub use session::MemorySessionLog;
