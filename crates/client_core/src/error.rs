use shared::error::SnapshotError;
use thiserror::Error;

/// Banner text shown for any failed fetch; the cause only goes to the log.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("malformed coins payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid coins snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}
