//! `SeaORM` implementation of the `CollectionService` trait.

use crate::db::Store;
use crate::domain::{EntryStatus, GameId, UserId};
use crate::models::CollectionEntry;
use crate::services::{CollectionError, CollectionService};

/// SeaORM-based implementation of the `CollectionService` trait.
pub struct SeaOrmCollectionService {
    store: Store,
}

impl SeaOrmCollectionService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn parse_status(status: &str) -> Result<EntryStatus, CollectionError> {
        status
            .parse()
            .map_err(|err: crate::domain::UnknownStatus| {
                CollectionError::Validation(err.to_string())
            })
    }

    fn validate_score(score: Option<i32>) -> Result<(), CollectionError> {
        if let Some(value) = score
            && !(1..=10).contains(&value)
        {
            return Err(CollectionError::Validation(format!(
                "score must be between 1 and 10, got {value}"
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl CollectionService for SeaOrmCollectionService {
    async fn add_to_collection(
        &self,
        user_id: UserId,
        game_id: GameId,
        status: &str,
        score: Option<i32>,
    ) -> Result<(), CollectionError> {
        let status = Self::parse_status(status)?;
        Self::validate_score(score)?;

        if self
            .store
            .get_collection_entry(user_id.value(), game_id.value())
            .await?
            .is_some()
        {
            return Err(CollectionError::AlreadyExists(game_id));
        }

        self.store
            .insert_collection_entry(user_id.value(), game_id.value(), status.as_str(), score)
            .await?;
        Ok(())
    }

    async fn update_collection_entry(
        &self,
        user_id: UserId,
        game_id: GameId,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<(), CollectionError> {
        let status = status.map(Self::parse_status).transpose()?;
        Self::validate_score(score)?;

        if self
            .store
            .get_collection_entry(user_id.value(), game_id.value())
            .await?
            .is_none()
        {
            return Err(CollectionError::NotFound(game_id));
        }

        self.store
            .update_collection_entry(
                user_id.value(),
                game_id.value(),
                status.map(|s| s.as_str()),
                score,
            )
            .await?;
        Ok(())
    }

    async fn remove_from_collection(
        &self,
        user_id: UserId,
        game_id: GameId,
    ) -> Result<(), CollectionError> {
        let removed = self
            .store
            .remove_collection_entry(user_id.value(), game_id.value())
            .await?;
        if removed {
            Ok(())
        } else {
            Err(CollectionError::NotFound(game_id))
        }
    }

    async fn collection_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CollectionEntry>, CollectionError> {
        let rows = self.store.collection_for_user(user_id.value()).await?;

        rows.into_iter()
            .map(|row| {
                let status = row
                    .status
                    .parse()
                    .map_err(|err: crate::domain::UnknownStatus| {
                        CollectionError::Database(format!(
                            "stored status for game {} is corrupt: {err}",
                            row.game_id
                        ))
                    })?;
                Ok(CollectionEntry {
                    game_id: GameId::new(row.game_id),
                    game_name: row.game_name,
                    game_slug: row.game_slug,
                    game_image: row.game_image,
                    status,
                    score: row.score,
                    added_at: row.added_at,
                })
            })
            .collect()
    }
}
