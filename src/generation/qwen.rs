//! Quantized Qwen2 causal LM (GGUF) with top-k / nucleus sampling.

use std::sync::atomic::{AtomicU64, Ordering};

use candle_core::quantized::gguf_file;
use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::quantized_qwen2::ModelWeights;
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::device::select_device;
use crate::embedding::utils::load_tokenizer_with_truncation;

use super::AnswerGenerator;
use super::config::GenerationConfig;
use super::error::GenerationError;

/// Local text generator.
///
/// The model carries a KV cache and needs `&mut` for every forward pass, so
/// it sits behind a mutex: concurrent requests generate one at a time.
pub struct QwenGenerator {
    model: Mutex<ModelWeights>,
    tokenizer: Tokenizer,
    device: Device,
    eos_token_id: u32,
    config: GenerationConfig,
    calls: AtomicU64,
}

impl std::fmt::Debug for QwenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QwenGenerator")
            .field("device", &format!("{:?}", self.device))
            .field("model_path", &self.config.model_path)
            .field("eos_token_id", &self.eos_token_id)
            .finish()
    }
}

impl QwenGenerator {
    pub fn load(config: GenerationConfig) -> Result<Self, GenerationError> {
        config.validate()?;

        if !config.model_path.is_file() {
            return Err(GenerationError::ModelNotFound {
                path: config.model_path.clone(),
            });
        }
        if !config.tokenizer_path.is_file() {
            return Err(GenerationError::ModelNotFound {
                path: config.tokenizer_path.clone(),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for generator");

        let tokenizer = load_tokenizer_with_truncation(&config.tokenizer_path, config.max_input_tokens)
            .map_err(|e| GenerationError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {e}"),
            })?;

        let eos_token_id = tokenizer.token_to_id(&config.eos_token).ok_or_else(|| {
            GenerationError::InvalidConfig {
                reason: format!("eos token {:?} not in tokenizer vocabulary", config.eos_token),
            }
        })?;

        let mut model_file = std::fs::File::open(&config.model_path).map_err(|e| {
            GenerationError::ModelLoadFailed {
                reason: format!("failed to open {}: {e}", config.model_path.display()),
            }
        })?;
        let content = gguf_file::Content::read(&mut model_file).map_err(|e| {
            GenerationError::ModelLoadFailed {
                reason: format!("failed to read GGUF content: {e}"),
            }
        })?;
        let model = ModelWeights::from_gguf(content, &mut model_file, &device).map_err(|e| {
            GenerationError::ModelLoadFailed {
                reason: format!("failed to load Qwen2 weights: {e}"),
            }
        })?;

        info!(
            model_path = %config.model_path.display(),
            temperature = config.temperature,
            top_p = config.top_p,
            top_k = config.top_k,
            max_new_tokens = config.max_new_tokens,
            "Qwen2 generator loaded"
        );

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            device,
            eos_token_id,
            config,
            calls: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn logits_processor(&self) -> LogitsProcessor {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        LogitsProcessor::from_sampling(
            self.config.seed.wrapping_add(call),
            Sampling::TopKThenTopP {
                k: self.config.top_k,
                p: self.config.top_p,
                temperature: self.config.temperature,
            },
        )
    }
}

impl AnswerGenerator for QwenGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let encoding = self.tokenizer.encode(prompt, true).map_err(|e| {
            GenerationError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        let prompt_len = tokens.len();

        let mut processor = self.logits_processor();
        let mut model = self.model.lock();

        for step in 0..self.config.max_new_tokens {
            // First step feeds the whole prompt at position 0 (which also resets
            // the KV cache); later steps feed only the last sampled token.
            let (input, index_pos) = if step == 0 {
                (Tensor::new(tokens.as_slice(), &self.device)?, 0)
            } else {
                let last = tokens[tokens.len() - 1];
                (Tensor::new(&[last], &self.device)?, prompt_len + step - 1)
            };

            let logits = model
                .forward(&input.unsqueeze(0)?, index_pos)?
                .squeeze(0)?
                .to_dtype(DType::F32)?;
            let next = processor.sample(&logits)?;

            if next == self.eos_token_id {
                break;
            }
            tokens.push(next);
        }
        drop(model);

        debug!(
            prompt_tokens = prompt_len,
            generated_tokens = tokens.len() - prompt_len,
            "Generation finished"
        );

        self.tokenizer
            .decode(&tokens, true)
            .map_err(|e| GenerationError::DecodeFailed {
                reason: e.to_string(),
            })
    }
}
