//! Embedding encoder.
//!
//! - [`TextEncoder`] is the seam the index depends on.
//! - [`minilm`] provides the sentence encoder (all-MiniLM-L6-v2 on candle).

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod encoder;
mod error;
/// Sentence encoder backed by a BERT checkpoint.
pub mod minilm;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use encoder::TextEncoder;
pub use error::EmbeddingError;
pub use minilm::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmConfig, MiniLmEmbedder};

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;
