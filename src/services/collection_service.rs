//! Domain service for the per-user game collection.

use crate::domain::{GameId, UserId};
use crate::models::CollectionEntry;
use thiserror::Error;

/// Domain errors for collection operations.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Game {0} is already in the collection")]
    AlreadyExists(GameId),

    #[error("Game {0} is not in the collection")]
    NotFound(GameId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CollectionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CollectionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for collection operations.
#[async_trait::async_trait]
pub trait CollectionService: Send + Sync {
    /// Adds a game to a user's collection.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::AlreadyExists`] if the pair already exists.
    /// - [`CollectionError::Validation`] on an unknown status or a score
    ///   outside 1 through 10.
    /// - [`CollectionError::Database`] on store failures.
    async fn add_to_collection(
        &self,
        user_id: UserId,
        game_id: GameId,
        status: &str,
        score: Option<i32>,
    ) -> Result<(), CollectionError>;

    /// Updates status and/or score on an existing collection entry.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NotFound`] if the pair does not exist.
    /// - [`CollectionError::Validation`] on an unknown status or a score
    ///   outside 1 through 10.
    /// - [`CollectionError::Database`] on store failures.
    async fn update_collection_entry(
        &self,
        user_id: UserId,
        game_id: GameId,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<(), CollectionError>;

    /// Removes a game from a user's collection.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NotFound`] if the pair does not exist.
    /// - [`CollectionError::Database`] on store failures.
    async fn remove_from_collection(
        &self,
        user_id: UserId,
        game_id: GameId,
    ) -> Result<(), CollectionError>;

    /// Returns a user's collection ordered by when entries were added.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Database`] on store failures.
    async fn collection_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CollectionEntry>, CollectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_error_display() {
        let err = CollectionError::AlreadyExists(GameId::new(7));
        assert_eq!(err.to_string(), "Game 7 is already in the collection");

        let err = CollectionError::Validation("score must be between 1 and 10".to_string());
        assert_eq!(
            err.to_string(),
            "Validation failed: score must be between 1 and 10"
        );
    }
}
