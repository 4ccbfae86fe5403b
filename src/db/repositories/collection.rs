use crate::entities::{games, user_games};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

/// One collection row joined with the game's display fields.
#[derive(Debug, Clone, FromQueryResult)]
pub struct CollectionRow {
    pub game_id: i32,
    pub game_name: String,
    pub game_slug: String,
    pub game_image: Option<String>,
    pub status: String,
    pub score: Option<i32>,
    pub added_at: String,
}

/// Repository for the plain per-user collection (user_games).
pub struct CollectionRepository {
    conn: DatabaseConnection,
}

impl CollectionRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, user_id: i32, game_id: i32) -> Result<Option<user_games::Model>> {
        let model = user_games::Entity::find_by_id((user_id, game_id))
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    pub async fn insert(
        &self,
        user_id: i32,
        game_id: i32,
        status: &str,
        score: Option<i32>,
    ) -> Result<()> {
        let model = user_games::ActiveModel {
            user_id: Set(user_id),
            game_id: Set(game_id),
            status: Set(status.to_string()),
            score: Set(score),
            added_at: Set(Utc::now().to_rfc3339()),
        };
        user_games::Entity::insert(model).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn update(
        &self,
        user_id: i32,
        game_id: i32,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<()> {
        let mut model = user_games::ActiveModel {
            user_id: Set(user_id),
            game_id: Set(game_id),
            ..Default::default()
        };
        if let Some(status) = status {
            model.status = Set(status.to_string());
        }
        if let Some(score) = score {
            model.score = Set(Some(score));
        }
        user_games::Entity::update(model).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn remove(&self, user_id: i32, game_id: i32) -> Result<bool> {
        let result = user_games::Entity::delete_by_id((user_id, game_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<CollectionRow>> {
        let rows = user_games::Entity::find()
            .select_only()
            .column(user_games::Column::GameId)
            .column_as(games::Column::Name, "game_name")
            .column_as(games::Column::Slug, "game_slug")
            .column_as(games::Column::Image, "game_image")
            .column(user_games::Column::Status)
            .column(user_games::Column::Score)
            .column(user_games::Column::AddedAt)
            .join(JoinType::InnerJoin, user_games::Relation::Games.def())
            .filter(user_games::Column::UserId.eq(user_id))
            .order_by_asc(user_games::Column::AddedAt)
            .into_model::<CollectionRow>()
            .all(&self.conn)
            .await?;
        Ok(rows)
    }
}
