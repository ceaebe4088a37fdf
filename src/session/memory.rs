use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::SessionLogError;
use super::{InteractionLogger, InteractionRecord};

/// In-memory logger for tests.
#[derive(Debug, Default)]
pub struct MemorySessionLog {
    records: Mutex<Vec<InteractionRecord>>,
    failing: bool,
}

impl MemorySessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger whose every write fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl InteractionLogger for MemorySessionLog {
    async fn record(&self, record: InteractionRecord) -> Result<(), SessionLogError> {
        if self.failing {
            return Err(SessionLogError::Io {
                path: "memory".into(),
                source: std::io::Error::other("mock session log failure"),
            });
        }
        self.records.lock().push(record);
        Ok(())
    }
}
