//! Domain service for catalog ingestion.
//!
//! Ingestion takes a provider-shaped [`GameRecord`] and guarantees a single
//! canonical Game row plus its tag associations, no matter how many times or
//! how concurrently the same record arrives.

use crate::domain::GameId;
use crate::models::GameRecord;
use thiserror::Error;

/// Domain errors for ingestion operations.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for IngestError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for IngestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for idempotent catalog ingestion.
///
/// # Examples
///
/// ```rust,ignore
/// use ludarr::services::{IngestError, IngestService};
/// use ludarr::models::GameRecord;
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn IngestService>) -> Result<(), IngestError> {
///     let record = GameRecord {
///         external_id: Some(3498),
///         name: "Grand Theft Auto V".to_string(),
///         ..Default::default()
///     };
///     let id = service.ensure_game(&record).await?;
///     println!("canonical game id: {id}");
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait IngestService: Send + Sync {
    /// Ensures a canonical Game row exists for `record` and returns its id.
    ///
    /// Matching is by external id first, then by exact name; a game first
    /// ingested without an external id has it backfilled on the next match.
    /// Tag associations (genres, platforms, publishers, developers) are
    /// resolved and linked after the row exists; failures there are logged
    /// and tolerated so the returned id is always valid.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Database`] on store failures or when repeated
    /// concurrent ingestions keep winning every insert race.
    async fn ensure_game(&self, record: &GameRecord) -> Result<GameId, IngestError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_error_display() {
        let err = IngestError::Database("connection reset".to_string());
        assert_eq!(err.to_string(), "Database error: connection reset");
    }
}
