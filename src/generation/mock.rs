use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::AnswerGenerator;
use super::error::GenerationError;

#[derive(Debug, Clone)]
enum Behavior {
    /// Behaves like a causal LM: prompt followed by the continuation.
    Continue(String),
    /// Returns the text as the whole decoded sequence.
    Raw(String),
    Fail(String),
}

/// Scripted generator for tests.
#[derive(Debug)]
pub struct MockGenerator {
    behavior: Behavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockGenerator {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Appends `continuation` to the prompt, like a real model would.
    pub fn continuing(continuation: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Continue(continuation.into()))
    }

    /// Returns `decoded` verbatim, ignoring the prompt.
    pub fn raw(decoded: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Raw(decoded.into()))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(reason.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

impl AnswerGenerator for MockGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());

        match &self.behavior {
            Behavior::Continue(text) => Ok(format!("{prompt} {text}")),
            Behavior::Raw(text) => Ok(text.clone()),
            Behavior::Fail(reason) => Err(GenerationError::InferenceFailed {
                reason: reason.clone(),
            }),
        }
    }
}
