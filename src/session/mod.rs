//! Interaction logging.
//!
//! Every answered question is handed to an [`InteractionLogger`]. The
//! production logger appends one JSON object per line to a file; readers
//! regroup the lines per session with [`load_sessions`].

pub mod error;
pub mod jsonl;

#[cfg(any(test, feature = "mock"))]
mod memory;


pub use error::SessionLogError;
pub use jsonl::{JsonlSessionLog, load_sessions};
#[cfg(any(test, feature = "mock"))]
pub use memory::MemorySessionLog;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub session_id: String,
    pub question: String,
    /// Answer as produced by the agent, before any display clean-up.
    pub answer: String,
    /// UTC, RFC 3339.
    pub timestamp: String,
}

impl InteractionRecord {
    /// Stamps the record with the current UTC time.
    pub fn new(
        session_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            question: question.into(),
            answer: answer.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

#[async_trait]
/// Sink for answered questions.
pub trait InteractionLogger: Send + Sync {
    async fn record(&self, record: InteractionRecord) -> Result<(), SessionLogError>;
}
