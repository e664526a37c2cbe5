pub mod client;
pub mod types;

pub use client::*;
pub use types::*;

use async_trait::async_trait;

/// Where the widget gets its movies from.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn fetch_popular(&self) -> Result<DisplayList, TmdbError>;
    async fn fetch_search(&self, query: &SearchQuery) -> Result<DisplayList, TmdbError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("Network error: {0}")]
    Network(reqwest::Error),
    #[error("Upstream returned HTTP status {0}")]
    Status(u16),
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
