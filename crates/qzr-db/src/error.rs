use thiserror::Error;

/// Failure to read or write a stored collection
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error for '{key}': {source}")]
    Serialization {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Storage backend error: {0}")]
    Backend(String),
}
