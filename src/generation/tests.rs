use super::*;
use crate::corpus::FaqEntry;
use std::collections::HashSet;
use std::path::PathBuf;

fn candidate(answer: &str, similarity: f32, idx: usize) -> RetrievedCandidate {
    RetrievedCandidate::new(
        FaqEntry::new(format!("question {idx}"), answer, "General"),
        similarity,
        idx,
    )
}

mod verbatim_tests {
    use super::*;

    #[test]
    fn test_returns_first_candidate_answer() {
        let candidates = vec![candidate("first", 0.9, 4), candidate("second", 0.8, 1)];
        assert_eq!(verbatim_answer(&candidates), "first");
    }

    #[test]
    fn test_trusts_candidate_order() {
        // The list is assumed sorted; the first entry wins even if a later one scores higher.
        let candidates = vec![candidate("first", 0.4, 0), candidate("second", 0.8, 1)];
        assert_eq!(verbatim_answer(&candidates), "first");
    }

    #[test]
    fn test_empty_candidates_no_information() {
        assert_eq!(verbatim_answer(&[]), "No information about that topic.");
    }
}

mod prompt_tests {
    use super::*;

    #[test]
    fn test_context_joins_answers_in_order() {
        let candidates = vec![
            candidate("Twelve weeks.", 0.7, 0),
            candidate("Online and on campus.", 0.6, 3),
            candidate("Yes.", 0.5, 1),
        ];
        assert_eq!(
            build_context(&candidates),
            "Twelve weeks.\n\nOnline and on campus.\n\nYes."
        );
    }

    #[test]
    fn test_context_empty() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_prompt_template() {
        let prompt = build_prompt("How long is it?", "Twelve weeks.");
        assert_eq!(
            prompt,
            "Answer this question:\n\nQuestion: How long is it?\nContext: Twelve weeks.\nAnswer:"
        );
    }

    #[test]
    fn test_extract_takes_text_after_last_marker() {
        let prompt = build_prompt("q", "c");
        let decoded = format!("{prompt}  It lasts twelve weeks. \n");
        assert_eq!(extract_answer(&decoded, &prompt), "It lasts twelve weeks.");
    }

    #[test]
    fn test_extract_uses_last_marker_when_model_repeats_it() {
        let prompt = build_prompt("q", "c");
        let decoded = format!("{prompt} Answer: nested\nAnswer: final one");
        assert_eq!(extract_answer(&decoded, &prompt), "final one");
    }

    #[test]
    fn test_extract_without_marker_strips_prompt_prefix() {
        let prompt = "Tell me:";
        let decoded = "Tell me: something useful  ";
        assert_eq!(extract_answer(decoded, prompt), "something useful");
    }

    #[test]
    fn test_extract_without_marker_shorter_than_prompt() {
        assert_eq!(extract_answer("short", "a much longer prompt"), "");
    }

    #[test]
    fn test_extract_counts_characters_not_bytes() {
        let prompt = "Frage über Kurse:";
        let decoded = "Frage über Kurse: Ja";
        assert_eq!(extract_answer(decoded, prompt), "Ja");
    }
}

mod generate_answer_tests {
    use super::*;

    #[test]
    fn test_generate_answer_extracts_continuation() {
        let generator = MockGenerator::continuing("Around twelve weeks in total.");
        let candidates = vec![candidate("Twelve weeks.", 0.7, 0)];

        let answer = generate_answer(&generator, "How long?", &candidates).unwrap();

        assert_eq!(answer, "Around twelve weeks in total.");
        assert_eq!(generator.calls(), 1);
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("Question: How long?"));
        assert!(prompt.contains("Context: Twelve weeks."));
    }

    #[test]
    fn test_generate_answer_propagates_failure() {
        let generator = MockGenerator::failing("out of memory");
        let result = generate_answer(&generator, "q", &[candidate("a", 0.7, 0)]);
        assert!(matches!(
            result,
            Err(GenerationError::InferenceFailed { reason }) if reason == "out of memory"
        ));
    }

    #[test]
    fn test_generate_answer_through_trait_object() {
        let generator: Box<dyn AnswerGenerator> = Box::new(MockGenerator::raw("no marker here"));
        let answer = generate_answer(generator.as_ref(), "q", &[]).unwrap();
        // No marker and the decoded text is shorter than the prompt.
        assert_eq!(answer, "");
    }
}

mod escalation_tests {
    use super::*;

    #[test]
    fn test_pick_is_one_of_three_templates() {
        let picker = EscalationPicker::new();
        for _ in 0..50 {
            assert!(ESCALATION_MESSAGES.contains(&picker.pick()));
        }
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let a = EscalationPicker::seeded(42);
        let b = EscalationPicker::seeded(42);
        let seq_a: Vec<_> = (0..20).map(|_| a.pick()).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.pick()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_picker_covers_all_templates() {
        let picker = EscalationPicker::seeded(7);
        let seen: HashSet<&str> = (0..200).map(|_| picker.pick()).collect();
        assert_eq!(seen.len(), ESCALATION_MESSAGES.len());
    }

    #[test]
    fn test_templates_are_distinct_and_generic() {
        let unique: HashSet<&str> = ESCALATION_MESSAGES.iter().copied().collect();
        assert_eq!(unique.len(), 3);
        for message in ESCALATION_MESSAGES {
            assert!(message.contains("admissions"));
        }
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_defaults_match_sampling_policy() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.top_k, 50);
        assert_eq!(config.max_new_tokens, 100);
        assert_eq!(config.max_input_tokens, 800);
        assert_eq!(config.eos_token, "<|im_end|>");
    }

    #[test]
    fn test_new_infers_tokenizer_path() {
        let config = GenerationConfig::new("/models/qwen/model.gguf");
        assert_eq!(config.tokenizer_path, PathBuf::from("/models/qwen/tokenizer.json"));
    }

    #[test]
    fn test_validate_rejects_bad_sampling() {
        let base = GenerationConfig::new("/models/model.gguf");
        assert!(base.validate().is_ok());

        let mut c = base.clone();
        c.temperature = 0.0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.top_p = 1.5;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.top_k = 0;
        assert!(c.validate().is_err());

        let c = base.clone().with_eos_token("");
        assert!(c.validate().is_err());

        assert!(GenerationConfig::default().validate().is_err());
    }

    #[test]
    fn test_load_missing_model_fails() {
        let result = QwenGenerator::load(GenerationConfig::new("/nonexistent/model.gguf"));
        assert!(matches!(result, Err(GenerationError::ModelNotFound { .. })));
    }
}
