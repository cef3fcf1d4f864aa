//! Bookmark saver for InspireVault.
//!
//! The saver is where a bookmark leaves the process. The vault keeps
//! everything in memory, so the shipped implementation only simulates the
//! latency of a save and always succeeds.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::bookmark::BookmarkDraft;
use crate::types::errors::SaveError;

/// Trait defining the save-bookmark collaborator.
#[async_trait]
pub trait BookmarkSaver: Send + Sync {
    async fn save_bookmark(&self, draft: &BookmarkDraft) -> Result<(), SaveError>;
}

/// Saver that waits a fixed delay and reports success.
pub struct SimulatedSaver {
    delay: Duration,
}

impl SimulatedSaver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl BookmarkSaver for SimulatedSaver {
    async fn save_bookmark(&self, draft: &BookmarkDraft) -> Result<(), SaveError> {
        tracing::debug!(url = %draft.url, delay_ms = self.delay.as_millis() as u64, "simulating bookmark save");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}
