//! Decision policy.
//!
//! Each question is retrieved against the FAQ index, scored, and routed:
//!
//! | Confidence                         | Answer                                  |
//! |------------------------------------|-----------------------------------------|
//! | `> direct_answer_cutoff`           | best FAQ answer verbatim                |
//! | `< escalation_threshold`           | one of the human hand-off messages      |
//! | otherwise                          | generated answer, verbatim on failure   |
//!
//! The reported confidence never changes with the path taken.

pub mod agent;
pub mod config;
pub mod error;
pub mod types;


pub use agent::FaqAgent;
pub use config::PolicyConfig;
pub use error::PolicyError;
pub use types::{AgentResponse, AnswerSource, Decision};
