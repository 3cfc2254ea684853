/// Errors surfaced by a search executor.
///
/// The searcher itself never produces errors; option merging is total. Every
/// variant originates in the installed [`SearchExecutor`](crate::SearchExecutor)
/// and is propagated to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}
