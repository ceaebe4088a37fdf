//! Answer generation.
//!
//! Two ways to answer from retrieved candidates:
//!
//! - **Verbatim**: [`verbatim_answer`] returns the best candidate's stored answer.
//! - **Generated**: [`generate_answer`] builds a context from every candidate,
//!   runs an [`AnswerGenerator`] on a fixed prompt and extracts the answer.
//!
//! Which one runs is the decision policy's call, not this module's. A failed
//! generation comes back as `Err`; the caller picks the fallback.
//!
//! Low-confidence questions get an [`EscalationPicker`] message instead.

pub mod config;
pub mod error;
pub mod escalation;
pub mod prompt;
pub mod qwen;

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(test)]
mod tests;

pub use config::GenerationConfig;
pub use error::GenerationError;
pub use escalation::{ESCALATION_MESSAGES, EscalationPicker};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerator;
pub use prompt::{build_context, build_prompt, extract_answer};
pub use qwen::QwenGenerator;

use tracing::debug;

use crate::constants::NO_INFORMATION_ANSWER;
use crate::index::RetrievedCandidate;

/// A causal language model.
pub trait AnswerGenerator: Send + Sync {
    /// Continues `prompt` and returns the decoded sequence, prompt included.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// The first candidate's stored answer, or the fixed "no information" text.
///
/// Candidates must already be sorted most-similar first.
pub fn verbatim_answer(candidates: &[RetrievedCandidate]) -> &str {
    candidates
        .first()
        .map(|c| c.faq.answer.as_str())
        .unwrap_or(NO_INFORMATION_ANSWER)
}

/// Runs the generated-answer path end to end.
pub fn generate_answer<G: AnswerGenerator + ?Sized>(
    generator: &G,
    question: &str,
    candidates: &[RetrievedCandidate],
) -> Result<String, GenerationError> {
    let context = build_context(candidates);
    let prompt = build_prompt(question, &context);

    debug!(
        prompt_len = prompt.len(),
        context_parts = candidates.len(),
        "Generating answer"
    );

    let decoded = generator.generate(&prompt)?;
    Ok(extract_answer(&decoded, &prompt))
}
