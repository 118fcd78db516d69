use thiserror::Error;

/// The single failure class the data service surfaces: a storage operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store directory could not be created: {0}")]
    Io(#[from] std::io::Error),
}
