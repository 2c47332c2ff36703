// Source trait for upstream telemetry reads
use crate::domain::sample::SeriesSnapshot;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },
    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("{path} returned an unreadable body: {message}")]
    Decode { path: String, message: String },
}

/// Raw status endpoint answer. Non-200 statuses are not errors here; the
/// status poller decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: u16,
    pub body: String,
}

impl StatusResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch a full series snapshot from a JSON `[[x, y], ...]` endpoint
    async fn fetch_series(&self, path: &str) -> Result<SeriesSnapshot, FetchError>;

    /// Fetch a plain-text state endpoint
    async fn fetch_status(&self, path: &str) -> Result<StatusResponse, FetchError>;
}
