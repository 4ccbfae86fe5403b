use crate::entities::games;
use crate::models::GameRecord;
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use super::unique_violation;

/// Result of attempting to create a new canonical Game row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInsertOutcome {
    /// The row was created with this id.
    Created(i32),
    /// A concurrent ingestion created a row with the same external id or
    /// name first; the caller must re-run its lookup instead of failing.
    LostRace,
}

pub struct GameRepository {
    conn: DatabaseConnection,
}

impl GameRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<games::Model>> {
        let model = games::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(model)
    }

    pub async fn find_by_external_id(&self, external_id: i64) -> Result<Option<games::Model>> {
        let model = games::Entity::find()
            .filter(games::Column::ExternalId.eq(external_id))
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<games::Model>> {
        let model = games::Entity::find()
            .filter(games::Column::Name.eq(name))
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    /// Backfills the external id on a game that was first ingested without
    /// one and later matched by exact name.
    pub async fn set_external_id(&self, id: i32, external_id: i64) -> Result<()> {
        let model = games::ActiveModel {
            id: Set(id),
            external_id: Set(Some(external_id)),
            ..Default::default()
        };
        games::Entity::update(model).exec(&self.conn).await?;
        Ok(())
    }

    /// Inserts a new Game row with an optimistic bare slug.
    ///
    /// On a slug collision the insert is retried exactly once with a coarse
    /// timestamp suffix. A uniqueness violation on any other column means a
    /// concurrent ingestion won the creating insert and the caller should
    /// re-read; every other store error is propagated.
    pub async fn insert_new(&self, record: &GameRecord) -> Result<GameInsertOutcome> {
        let base = Self::slug_base(record);

        match self.try_insert(record, &base).await {
            Ok(id) => Ok(GameInsertOutcome::Created(id)),
            Err(err) => match unique_violation(&err) {
                Some(message) if message.contains("games.slug") => {
                    let suffixed = format!("{base}-{}", Utc::now().timestamp_millis());
                    match self.try_insert(record, &suffixed).await {
                        Ok(id) => Ok(GameInsertOutcome::Created(id)),
                        Err(retry_err) if unique_violation(&retry_err).is_some() => {
                            Ok(GameInsertOutcome::LostRace)
                        }
                        Err(retry_err) => Err(retry_err.into()),
                    }
                }
                Some(_) => Ok(GameInsertOutcome::LostRace),
                None => Err(err.into()),
            },
        }
    }

    async fn try_insert(&self, record: &GameRecord, slug: &str) -> Result<i32, DbErr> {
        let model = games::ActiveModel {
            external_id: Set(record.external_id),
            name: Set(record.name.clone()),
            slug: Set(slug.to_string()),
            description: Set(record.description.clone()),
            image: Set(record.image.clone()),
            rating: Set(record.rating),
            metacritic: Set(record.metacritic_score),
            released: Set(record.released_date.clone()),
            playtime: Set(record.playtime),
            added_at: Set(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = games::Entity::insert(model).exec(&self.conn).await?;
        Ok(result.last_insert_id)
    }

    /// Slug base for a new game: the slugified name, then an
    /// external-id-derived identifier, then the caller-supplied one.
    fn slug_base(record: &GameRecord) -> String {
        let from_name = crate::slug::slugify(&record.name);
        if !from_name.is_empty() {
            return from_name;
        }

        if let Some(external_id) = record.external_id {
            return format!("game-{external_id}");
        }

        if let Some(provided) = record.slug.as_deref() {
            let from_provided = crate::slug::slugify(provided);
            if !from_provided.is_empty() {
                return from_provided;
            }
        }

        "game".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_base_prefers_name() {
        let record = GameRecord {
            name: "Foo Bar".to_string(),
            slug: Some("provider-slug".to_string()),
            ..Default::default()
        };
        assert_eq!(GameRepository::slug_base(&record), "foo-bar");
    }

    #[test]
    fn slug_base_falls_back_to_external_id_then_supplied() {
        let record = GameRecord {
            name: "★☆★".to_string(),
            external_id: Some(900),
            slug: Some("stars".to_string()),
            ..Default::default()
        };
        assert_eq!(GameRepository::slug_base(&record), "game-900");

        let record = GameRecord {
            name: "★☆★".to_string(),
            slug: Some("stars".to_string()),
            ..Default::default()
        };
        assert_eq!(GameRepository::slug_base(&record), "stars");

        let record = GameRecord {
            name: "★☆★".to_string(),
            ..Default::default()
        };
        assert_eq!(GameRepository::slug_base(&record), "game");
    }
}
