//! Environment-backed configuration.
//!
//! Every setting has a default except the embedder model directory, which is
//! required unless `FAQDESK_EMBEDDER_STUB` opts into the deterministic stub
//! encoder. Override with `FAQDESK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{DEFAULT_DIRECT_ANSWER_CUTOFF, DEFAULT_TOP_K, DEPLOYED_ESCALATION_THRESHOLD};
use crate::embedding::MiniLmConfig;
use crate::generation::GenerationConfig;
use crate::policy::PolicyConfig;

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FAQDESK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// YAML FAQ corpus. Default: `./data/faq.yaml`.
    pub corpus_path: PathBuf,

    /// Sentence-embedding model directory. Required unless `embedder_stub` is set.
    pub embedder_path: Option<PathBuf>,

    /// Run the hashed bag-of-words stub instead of a model (testing only).
    pub embedder_stub: bool,

    /// Quantized generator (GGUF). Unset answers verbatim only.
    pub generator_path: Option<PathBuf>,

    /// Generator tokenizer. Default: `tokenizer.json` beside the GGUF.
    pub generator_tokenizer_path: Option<PathBuf>,

    /// Append-only interaction log. Default: `./data/sessions.jsonl`.
    pub session_log_path: PathBuf,

    /// HTML page served at `/chat`.
    pub chat_page_path: Option<PathBuf>,

    /// Confidence below this escalates. Default: `0.5`.
    pub escalation_threshold: f32,

    /// Confidence above this answers verbatim. Default: `0.8`.
    pub direct_answer_cutoff: f32,

    /// Candidates retrieved per question. Default: `3`.
    pub top_k: usize,

    /// Sampling seed for the generator.
    pub generation_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            corpus_path: PathBuf::from("./data/faq.yaml"),
            embedder_path: None,
            embedder_stub: false,
            generator_path: None,
            generator_tokenizer_path: None,
            session_log_path: PathBuf::from("./data/sessions.jsonl"),
            chat_page_path: None,
            escalation_threshold: DEPLOYED_ESCALATION_THRESHOLD,
            direct_answer_cutoff: DEFAULT_DIRECT_ANSWER_CUTOFF,
            top_k: DEFAULT_TOP_K,
            generation_seed: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FAQDESK_PORT";
    const ENV_BIND_ADDR: &'static str = "FAQDESK_BIND_ADDR";
    const ENV_CORPUS_PATH: &'static str = "FAQDESK_CORPUS_PATH";
    const ENV_EMBEDDER_PATH: &'static str = "FAQDESK_EMBEDDER_PATH";
    const ENV_EMBEDDER_STUB: &'static str = "FAQDESK_EMBEDDER_STUB";
    const ENV_GENERATOR_PATH: &'static str = "FAQDESK_GENERATOR_PATH";
    const ENV_GENERATOR_TOKENIZER_PATH: &'static str = "FAQDESK_GENERATOR_TOKENIZER_PATH";
    const ENV_SESSION_LOG_PATH: &'static str = "FAQDESK_SESSION_LOG_PATH";
    const ENV_CHAT_PAGE_PATH: &'static str = "FAQDESK_CHAT_PAGE_PATH";
    const ENV_ESCALATION_THRESHOLD: &'static str = "FAQDESK_ESCALATION_THRESHOLD";
    const ENV_DIRECT_ANSWER_CUTOFF: &'static str = "FAQDESK_DIRECT_ANSWER_CUTOFF";
    const ENV_TOP_K: &'static str = "FAQDESK_TOP_K";
    const ENV_GENERATION_SEED: &'static str = "FAQDESK_GENERATION_SEED";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let corpus_path = Self::parse_path_from_env(Self::ENV_CORPUS_PATH, defaults.corpus_path);
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let embedder_stub = Self::parse_flag_from_env(Self::ENV_EMBEDDER_STUB)?;
        let generator_path = Self::parse_optional_path_from_env(Self::ENV_GENERATOR_PATH);
        let generator_tokenizer_path =
            Self::parse_optional_path_from_env(Self::ENV_GENERATOR_TOKENIZER_PATH);
        let session_log_path =
            Self::parse_path_from_env(Self::ENV_SESSION_LOG_PATH, defaults.session_log_path);
        let chat_page_path = Self::parse_optional_path_from_env(Self::ENV_CHAT_PAGE_PATH);
        let escalation_threshold = Self::parse_threshold_from_env(
            Self::ENV_ESCALATION_THRESHOLD,
            "escalation threshold",
            defaults.escalation_threshold,
        )?;
        let direct_answer_cutoff = Self::parse_threshold_from_env(
            Self::ENV_DIRECT_ANSWER_CUTOFF,
            "direct-answer cutoff",
            defaults.direct_answer_cutoff,
        )?;
        let top_k = Self::parse_top_k_from_env(defaults.top_k)?;
        let generation_seed = Self::parse_seed_from_env()?;

        Ok(Self {
            port,
            bind_addr,
            corpus_path,
            embedder_path,
            embedder_stub,
            generator_path,
            generator_tokenizer_path,
            session_log_path,
            chat_page_path,
            escalation_threshold,
            direct_answer_cutoff,
            top_k,
            generation_seed,
        })
    }

    /// Validates paths and cutoffs (does not create files or directories).
    ///
    /// A missing corpus is left for the loader to report. A missing embedder
    /// is an error unless the stub was requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus_path.exists() && !self.corpus_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.corpus_path.clone(),
            });
        }

        if self.session_log_path.exists() && !self.session_log_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.session_log_path.clone(),
            });
        }

        if let Some(ref path) = self.embedder_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        for path in [&self.generator_path, &self.generator_tokenizer_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Self::check_threshold("escalation threshold", self.escalation_threshold)?;
        Self::check_threshold("direct-answer cutoff", self.direct_answer_cutoff)?;

        if self.top_k == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "top_k",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.embedder_config()?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Decision-policy settings with the deployed thresholds.
    pub fn policy_config(&self) -> PolicyConfig {
        PolicyConfig::default()
            .with_escalation_threshold(self.escalation_threshold)
            .with_direct_answer_cutoff(self.direct_answer_cutoff)
            .with_top_k(self.top_k)
    }

    /// Embedder settings. A configured model directory wins over the stub flag.
    pub fn embedder_config(&self) -> Result<MiniLmConfig, ConfigError> {
        match &self.embedder_path {
            Some(dir) => Ok(MiniLmConfig::new(dir)),
            None if self.embedder_stub => Ok(MiniLmConfig::stub()),
            None => Err(ConfigError::MissingEnvVar {
                name: Self::ENV_EMBEDDER_PATH,
            }),
        }
    }

    /// Generator settings, or `None` when no generator is configured.
    pub fn generation_config(&self) -> Option<GenerationConfig> {
        let model_path = self.generator_path.as_ref()?;
        let mut config = GenerationConfig::new(model_path);
        if let Some(tokenizer) = &self.generator_tokenizer_path {
            config.tokenizer_path = tokenizer.clone();
        }
        if let Some(seed) = self.generation_seed {
            config = config.with_seed(seed);
        }
        Some(config)
    }

    fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidThreshold {
                name,
                value: value.to_string(),
            })
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(
        var_name: &str,
        name: &'static str,
        default: f32,
    ) -> Result<f32, ConfigError> {
        let Ok(value) = env::var(var_name) else {
            return Ok(default);
        };

        match value.trim().parse::<f32>() {
            Ok(parsed) if (0.0..=1.0).contains(&parsed) => Ok(parsed),
            _ => Err(ConfigError::InvalidThreshold { name, value }),
        }
    }

    fn parse_top_k_from_env(default: usize) -> Result<usize, ConfigError> {
        let Ok(value) = env::var(Self::ENV_TOP_K) else {
            return Ok(default);
        };

        match value.trim().parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidNumber {
                name: "top_k",
                value,
                reason: "must be at least 1".to_string(),
            }),
            Ok(top_k) => Ok(top_k),
            Err(e) => Err(ConfigError::InvalidNumber {
                name: "top_k",
                value,
                reason: e.to_string(),
            }),
        }
    }

    fn parse_seed_from_env() -> Result<Option<u64>, ConfigError> {
        match env::var(Self::ENV_GENERATION_SEED) {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidNumber {
                    name: "generation seed",
                    value,
                    reason: e.to_string(),
                }),
            _ => Ok(None),
        }
    }

    fn parse_flag_from_env(var_name: &'static str) -> Result<bool, ConfigError> {
        let Ok(value) = env::var(var_name) else {
            return Ok(false);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            _ => Err(ConfigError::InvalidFlag {
                name: var_name,
                value,
            }),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
