use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("FAQ corpus not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read FAQ corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed FAQ corpus: {0}")]
    Parse(#[from] serde_yaml::Error),
}
