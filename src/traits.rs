use crate::model::RowsPage;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to decode page: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable label for logs (e.g., the table being read).
    fn source_id(&self) -> String;

    /// Fetches one page of category rows. Pages are 1-based.
    async fn fetch_page(&self, page: u32) -> Result<RowsPage, FetchError>;
}
