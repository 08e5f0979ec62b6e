use thiserror::Error;

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The episode has no entry in the downloaded-episodes registry.
    #[error("episode \"{title}\" is not downloaded")]
    EpisodeNotDownloaded { title: String },

    /// Plugin data could not be read or written as JSON.
    #[error("plugin data JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
