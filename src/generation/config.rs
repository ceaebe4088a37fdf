use std::path::PathBuf;

use crate::constants::{
    DEFAULT_EOS_TOKEN, DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MAX_NEW_TOKENS, DEFAULT_SAMPLING_TOP_K,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};

use super::error::GenerationError;

pub const DEFAULT_SEED: u64 = 299_792_458;

#[derive(Debug, Clone)]
/// Configuration for [`QwenGenerator`](super::QwenGenerator).
pub struct GenerationConfig {
    /// Path to the GGUF model file.
    pub model_path: PathBuf,
    /// Path to `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus probability mass.
    pub top_p: f64,
    /// Keep only the `top_k` most likely tokens before nucleus filtering.
    pub top_k: usize,
    /// Cap on generated tokens.
    pub max_new_tokens: usize,
    /// Prompt is truncated to this many tokens.
    pub max_input_tokens: usize,
    /// Token that ends generation (also used as padding).
    pub eos_token: String,
    /// Base sampling seed; each call derives its own seed from it.
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            tokenizer_path: PathBuf::new(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_SAMPLING_TOP_K,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
            eos_token: DEFAULT_EOS_TOKEN.to_string(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GenerationConfig {
    /// Creates a config for a model file, inferring `tokenizer.json` from its directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        let model_path = model_path.into();
        let tokenizer_path = model_path
            .parent()
            .map(|p| p.join("tokenizer.json"))
            .unwrap_or_default();

        Self {
            model_path,
            tokenizer_path,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_eos_token(mut self, eos_token: impl Into<String>) -> Self {
        self.eos_token = eos_token.into();
        self
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |reason: String| Err(GenerationError::InvalidConfig { reason });

        if self.temperature.is_nan() || self.temperature <= 0.0 {
            return invalid(format!(
                "temperature must be positive, got {}",
                self.temperature
            ));
        }
        if self.top_p.is_nan() || self.top_p <= 0.0 || self.top_p > 1.0 {
            return invalid(format!("top_p must be in (0, 1], got {}", self.top_p));
        }
        if self.top_k == 0 {
            return invalid("top_k must be greater than zero".to_string());
        }
        if self.max_new_tokens == 0 {
            return invalid("max_new_tokens must be greater than zero".to_string());
        }
        if self.max_input_tokens == 0 {
            return invalid("max_input_tokens must be greater than zero".to_string());
        }
        if self.eos_token.is_empty() {
            return invalid("eos_token cannot be empty".to_string());
        }
        if self.model_path.as_os_str().is_empty() {
            return invalid("model_path is required".to_string());
        }

        Ok(())
    }

    /// Returns `true` if both the model and tokenizer files exist.
    pub fn model_available(&self) -> bool {
        self.model_path.is_file() && self.tokenizer_path.is_file()
    }
}
