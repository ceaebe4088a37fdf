use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::corpus::FaqEntry;
use crate::embedding::TextEncoder;
use crate::generation::{AnswerGenerator, EscalationPicker, generate_answer, verbatim_answer};
use crate::index::{FaqIndex, RetrievedCandidate};
use crate::scoring::ConfidenceScorer;

use super::config::PolicyConfig;
use super::error::PolicyError;
use super::types::{AgentResponse, AnswerSource, Decision};

/// Retrieval, scoring and the answer/generate/escalate decision in one place.
pub struct FaqAgent<E: TextEncoder> {
    index: FaqIndex<E>,
    scorer: ConfidenceScorer,
    config: PolicyConfig,
    generator: Option<Arc<dyn AnswerGenerator>>,
    escalation: EscalationPicker,
}

impl<E: TextEncoder> std::fmt::Debug for FaqAgent<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqAgent")
            .field("index", &self.index)
            .field("scorer", &self.scorer)
            .field("config", &self.config)
            .field("has_generator", &self.generator.is_some())
            .finish()
    }
}

impl<E: TextEncoder> FaqAgent<E> {
    /// Verbatim-only agent. Attach a model with [`FaqAgent::with_generator`].
    pub fn new(
        encoder: E,
        entries: Vec<FaqEntry>,
        config: PolicyConfig,
    ) -> Result<Self, PolicyError> {
        config.validate()?;

        Ok(Self {
            index: FaqIndex::new(encoder, entries),
            scorer: ConfidenceScorer::default(),
            config,
            generator: None,
            escalation: EscalationPicker::new(),
        })
    }

    pub fn with_generator(mut self, generator: Arc<dyn AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_escalation(mut self, escalation: EscalationPicker) -> Self {
        self.escalation = escalation;
        self
    }

    /// Encodes the corpus now instead of on the first question.
    pub fn build_index(&self) -> Result<(), PolicyError> {
        self.index.build()?;
        Ok(())
    }

    pub fn index(&self) -> &FaqIndex<E> {
        &self.index
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn answer_question(&self, question: &str) -> Result<AgentResponse, PolicyError> {
        if question.trim().is_empty() {
            return Err(PolicyError::EmptyQuestion);
        }

        info!(question_len = question.len(), "Processing question");

        let candidates = self.index.retrieve(question, self.config.top_k)?;
        let confidence = self.scorer.assess(&candidates);

        // No candidates means nothing to answer from, whatever the thresholds say.
        let decision = if candidates.is_empty() {
            Decision::LowConfidence
        } else {
            Decision::classify(confidence, &self.config)
        };

        info!(
            confidence = format_args!("{confidence:.2}"),
            candidates = candidates.len(),
            ?decision,
            "Confidence assessed"
        );

        let (answer, source) = match decision {
            Decision::HighConfidence => {
                (verbatim_answer(&candidates).to_string(), AnswerSource::Direct)
            }
            Decision::ModerateConfidence => self.generate_or_fallback(question, &candidates),
            Decision::LowConfidence => {
                (self.escalation.pick().to_string(), AnswerSource::Escalated)
            }
        };

        debug!(%source, answer_len = answer.len(), "Answer selected");

        Ok(AgentResponse {
            answer,
            confidence,
            decision,
            source,
        })
    }

    fn generate_or_fallback(
        &self,
        question: &str,
        candidates: &[RetrievedCandidate],
    ) -> (String, AnswerSource) {
        let Some(generator) = &self.generator else {
            debug!("No generator configured, answering verbatim");
            return (verbatim_answer(candidates).to_string(), AnswerSource::Fallback);
        };

        match generate_answer(generator.as_ref(), question, candidates) {
            Ok(answer) => (answer, AnswerSource::Generated),
            Err(e) => {
                warn!(error = %e, "Generation failed, falling back to best FAQ answer");
                (verbatim_answer(candidates).to_string(), AnswerSource::Fallback)
            }
        }
    }
}
