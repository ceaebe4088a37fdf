//! FAQ knowledge base records and the YAML corpus loader.
//!
//! The corpus is a single document with a top-level `faq` list:
//!
//! ```yaml
//! faq:
//!   - question: How long is the program?
//!     answer: Twelve weeks.
//!     category: Programs
//! ```
//!
//! Entries are identified by their position in that list, which is also the
//! order the index embeds them in.

pub mod error;


pub use error::CorpusError;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

/// One question/answer record. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl FaqEntry {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
        }
    }

    /// Text the index embeds for this entry: `"{question} (Category: {category})"`.
    pub fn index_text(&self) -> String {
        format!("{} (Category: {})", self.question, self.category)
    }
}

#[derive(Debug, Deserialize)]
struct CorpusDocument {
    #[serde(default)]
    faq: Vec<FaqEntry>,
}

/// Parses a YAML corpus document.
pub fn parse_corpus(yaml: &str) -> Result<Vec<FaqEntry>, CorpusError> {
    let doc: CorpusDocument = serde_yaml::from_str(yaml)?;
    Ok(doc.faq)
}

/// Reads and parses the corpus file at `path`.
pub fn load_corpus(path: &Path) -> Result<Vec<FaqEntry>, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_corpus(&raw)?;
    info!(path = %path.display(), entries = entries.len(), "Loaded FAQ corpus");
    Ok(entries)
}
