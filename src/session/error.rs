use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionLogError {
    #[error("session log I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize interaction: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("malformed session log line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
