// Dataset source trait and error taxonomy
use crate::domain::chart::{DataPoint, SeriesKind};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset request failed: {0}")]
    Transport(String),

    #[error("dataset endpoint returned status {0}")]
    Status(u16),

    #[error("failed to parse dataset response: {0}")]
    Parse(String),
}

/// Source of raw chart points. One best-effort attempt per call: no retries,
/// no timeout. A successful response with zero points is Ok, not an error.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self, kind: SeriesKind, point_count: u64) -> Result<Vec<DataPoint>, DatasetError>;
}
