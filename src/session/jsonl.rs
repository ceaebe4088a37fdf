use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::error::SessionLogError;
use super::{InteractionLogger, InteractionRecord};

/// Append-only JSONL interaction log.
///
/// The file is opened on the first write (parent directories are created)
/// and kept open. Writers take the lock for one whole line, so concurrent
/// records never interleave.
pub struct JsonlSessionLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl std::fmt::Debug for JsonlSessionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlSessionLog")
            .field("path", &self.path)
            .finish()
    }
}

impl JsonlSessionLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionLogError {
        SessionLogError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn open(&self) -> Result<File, SessionLogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(path = %self.path.display(), "Session log opened");
        Ok(file)
    }
}

#[async_trait]
impl InteractionLogger for JsonlSessionLog {
    async fn record(&self, record: InteractionRecord) -> Result<(), SessionLogError> {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');

        let mut guard = self.file.lock().await;
        if guard.is_none() {
            *guard = Some(self.open().await?);
        }

        if let Some(file) = guard.as_mut() {
            file.write_all(&line).await.map_err(|e| self.io_error(e))?;
            file.flush().await.map_err(|e| self.io_error(e))?;
        }

        debug!(session_id = %record.session_id, "Interaction recorded");
        Ok(())
    }
}

/// Reads a JSONL log back, grouped by session id in write order.
///
/// A missing file is an empty log. Blank lines are skipped.
pub fn load_sessions(
    path: &Path,
) -> Result<BTreeMap<String, Vec<InteractionRecord>>, SessionLogError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(SessionLogError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut sessions: BTreeMap<String, Vec<InteractionRecord>> = BTreeMap::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: InteractionRecord =
            serde_json::from_str(line).map_err(|source| SessionLogError::Parse {
                line: idx + 1,
                source,
            })?;
        sessions
            .entry(record.session_id.clone())
            .or_default()
            .push(record);
    }

    Ok(sessions)
}
