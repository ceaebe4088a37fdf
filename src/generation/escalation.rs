//! Human hand-off messages for low-confidence questions.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const ESCALATION_MESSAGES: [&str; 3] = [
    "I apologize, but I don't have enough specific information to answer your question confidently. Let me connect you with one of our admissions advisors who can provide you with detailed, personalized guidance. Would you like me to arrange that?",
    "That's a great question! While I don't have the exact details you're looking for in my current knowledge base, our admissions team would be delighted to give you comprehensive information. Can I help you schedule a brief call with them?",
    "I appreciate your question! To ensure you receive the most current and detailed information, I'd recommend speaking directly with our admissions team. They can provide personalized guidance and answer any specific concerns you might have.",
];

/// Uniform choice over [`ESCALATION_MESSAGES`]. Seed it for reproducible tests.
pub struct EscalationPicker {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for EscalationPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EscalationPicker")
            .field("messages", &ESCALATION_MESSAGES.len())
            .finish()
    }
}

impl Default for EscalationPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl EscalationPicker {
    /// Entropy-seeded picker.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn pick(&self) -> &'static str {
        let idx = self.rng.lock().gen_range(0..ESCALATION_MESSAGES.len());
        ESCALATION_MESSAGES[idx]
    }
}
