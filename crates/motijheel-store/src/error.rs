//! Store error types.

use thiserror::Error;

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not establish the connection pool. Fatal at process start.
    #[error("failed to connect to storage: {0}")]
    Connect(sqlx::Error),

    /// A query or transaction failed. The batch writer rolls back before
    /// re-raising this.
    #[error("storage query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// Metadata could not be serialized for the JSONB column.
    #[error("failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}
