//! Prompt assembly and answer extraction for the generated-answer path.

use crate::constants::ANSWER_MARKER;
use crate::index::RetrievedCandidate;

/// Joins the candidates' stored answers, in candidate order, with blank lines.
pub fn build_context(candidates: &[RetrievedCandidate]) -> String {
    candidates
        .iter()
        .map(|c| c.faq.answer.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(question: &str, context: &str) -> String {
    format!("Answer this question:\n\nQuestion: {question}\nContext: {context}\n{ANSWER_MARKER}")
}

/// Pulls the model's answer out of the decoded sequence.
///
/// Text after the last `Answer:` marker wins. Without a marker the prompt
/// prefix (by character count) is dropped instead. Either way the result is
/// trimmed.
pub fn extract_answer(decoded: &str, prompt: &str) -> String {
    if let Some(pos) = decoded.rfind(ANSWER_MARKER) {
        return decoded[pos + ANSWER_MARKER.len()..].trim().to_string();
    }

    decoded
        .chars()
        .skip(prompt.chars().count())
        .collect::<String>()
        .trim()
        .to_string()
}
