use crate::entities::{custom_list_entries, custom_lists, games};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use std::collections::HashMap;

#[derive(Debug, FromQueryResult)]
struct EntryCountRow {
    list_id: i32,
    entry_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CoverRow {
    list_id: i32,
    image: String,
}

/// Repository for custom lists and their ordered membership rows.
pub struct ListRepository {
    conn: DatabaseConnection,
}

impl ListRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // List Operations
    // ========================================================================

    pub async fn count_for_owner(&self, user_id: i32) -> Result<u64> {
        let count = custom_lists::Entity::find()
            .filter(custom_lists::Column::UserId.eq(user_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    /// Slugs already taken within one owner's scope, optionally excluding
    /// the list being renamed.
    pub async fn slugs_for_owner(&self, user_id: i32, exclude: Option<i32>) -> Result<Vec<String>> {
        let mut query = custom_lists::Entity::find()
            .select_only()
            .column(custom_lists::Column::Slug)
            .filter(custom_lists::Column::UserId.eq(user_id));

        if let Some(list_id) = exclude {
            query = query.filter(custom_lists::Column::Id.ne(list_id));
        }

        let slugs = query.into_tuple::<String>().all(&self.conn).await?;
        Ok(slugs)
    }

    pub async fn get(&self, list_id: i32) -> Result<Option<custom_lists::Model>> {
        let model = custom_lists::Entity::find_by_id(list_id)
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    pub async fn insert(
        &self,
        user_id: i32,
        name: &str,
        slug: &str,
        description: Option<&str>,
        cover_color: Option<&str>,
        is_public: bool,
    ) -> Result<custom_lists::Model> {
        let model = custom_lists::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            description: Set(description.map(str::to_string)),
            cover_color: Set(cover_color.map(str::to_string)),
            is_public: Set(is_public),
            created_at: Set(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = custom_lists::Entity::insert(model).exec(&self.conn).await?;
        let created = custom_lists::Entity::find_by_id(result.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("created list {} not found", result.last_insert_id))?;
        Ok(created)
    }

    pub async fn update(
        &self,
        list_id: i32,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
        cover_color: Option<&str>,
        is_public: Option<bool>,
    ) -> Result<()> {
        let mut model = custom_lists::ActiveModel {
            id: Set(list_id),
            ..Default::default()
        };
        if let Some(name) = name {
            model.name = Set(name.to_string());
        }
        if let Some(slug) = slug {
            model.slug = Set(slug.to_string());
        }
        if let Some(description) = description {
            model.description = Set(Some(description.to_string()));
        }
        if let Some(cover_color) = cover_color {
            model.cover_color = Set(Some(cover_color.to_string()));
        }
        if let Some(is_public) = is_public {
            model.is_public = Set(is_public);
        }
        custom_lists::Entity::update(model).exec(&self.conn).await?;
        Ok(())
    }

    /// Deletes a list and, transitively, its membership rows.
    pub async fn delete(&self, list_id: i32) -> Result<bool> {
        custom_list_entries::Entity::delete_many()
            .filter(custom_list_entries::Column::ListId.eq(list_id))
            .exec(&self.conn)
            .await?;

        let result = custom_lists::Entity::delete_by_id(list_id)
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Lists of one owner with their derived game counts and up to `cover_limit`
    /// representative cover images, batched to avoid per-list queries.
    pub async fn lists_with_stats(
        &self,
        user_id: i32,
        cover_limit: usize,
    ) -> Result<Vec<(custom_lists::Model, i64, Vec<String>)>> {
        let lists = custom_lists::Entity::find()
            .filter(custom_lists::Column::UserId.eq(user_id))
            .order_by_asc(custom_lists::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let list_ids: Vec<i32> = lists.iter().map(|l| l.id).collect();

        let counts: HashMap<i32, i64> = custom_list_entries::Entity::find()
            .select_only()
            .column(custom_list_entries::Column::ListId)
            .column_as(custom_list_entries::Column::GameId.count(), "entry_count")
            .filter(custom_list_entries::Column::ListId.is_in(list_ids.clone()))
            .group_by(custom_list_entries::Column::ListId)
            .into_model::<EntryCountRow>()
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|row| (row.list_id, row.entry_count))
            .collect();

        let cover_rows = custom_list_entries::Entity::find()
            .select_only()
            .column(custom_list_entries::Column::ListId)
            .column_as(games::Column::Image, "image")
            .join(
                JoinType::InnerJoin,
                custom_list_entries::Relation::Games.def(),
            )
            .filter(custom_list_entries::Column::ListId.is_in(list_ids))
            .filter(games::Column::Image.is_not_null())
            .order_by_asc(custom_list_entries::Column::ListId)
            .order_by_asc(custom_list_entries::Column::Position)
            .into_model::<CoverRow>()
            .all(&self.conn)
            .await?;

        let mut covers: HashMap<i32, Vec<String>> = HashMap::new();
        for row in cover_rows {
            let images = covers.entry(row.list_id).or_default();
            if images.len() < cover_limit {
                images.push(row.image);
            }
        }

        Ok(lists
            .into_iter()
            .map(|list| {
                let count = counts.get(&list.id).copied().unwrap_or(0);
                let images = covers.remove(&list.id).unwrap_or_default();
                (list, count, images)
            })
            .collect())
    }

    // ========================================================================
    // Entry Operations
    // ========================================================================

    pub async fn entry(
        &self,
        list_id: i32,
        game_id: i32,
    ) -> Result<Option<custom_list_entries::Model>> {
        let model = custom_list_entries::Entity::find_by_id((list_id, game_id))
            .one(&self.conn)
            .await?;
        Ok(model)
    }

    pub async fn entries_for_list(&self, list_id: i32) -> Result<Vec<custom_list_entries::Model>> {
        let rows = custom_list_entries::Entity::find()
            .filter(custom_list_entries::Column::ListId.eq(list_id))
            .order_by_asc(custom_list_entries::Column::Position)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn max_position(&self, list_id: i32) -> Result<Option<i32>> {
        let max = custom_list_entries::Entity::find()
            .select_only()
            .column_as(custom_list_entries::Column::Position.max(), "max_position")
            .filter(custom_list_entries::Column::ListId.eq(list_id))
            .into_tuple::<Option<i32>>()
            .one(&self.conn)
            .await?
            .flatten();
        Ok(max)
    }

    pub async fn insert_entry(
        &self,
        list_id: i32,
        game_id: i32,
        position: i32,
        note: Option<&str>,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<custom_list_entries::Model> {
        let added_at = Utc::now().to_rfc3339();
        let model = custom_list_entries::ActiveModel {
            list_id: Set(list_id),
            game_id: Set(game_id),
            position: Set(position),
            note: Set(note.map(str::to_string)),
            status: Set(status.map(str::to_string)),
            score: Set(score),
            added_at: Set(added_at.clone()),
        };
        custom_list_entries::Entity::insert(model)
            .exec(&self.conn)
            .await?;

        Ok(custom_list_entries::Model {
            list_id,
            game_id,
            position,
            note: note.map(str::to_string),
            status: status.map(str::to_string),
            score,
            added_at,
        })
    }

    pub async fn update_entry(
        &self,
        list_id: i32,
        game_id: i32,
        note: Option<&str>,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<()> {
        let mut model = custom_list_entries::ActiveModel {
            list_id: Set(list_id),
            game_id: Set(game_id),
            ..Default::default()
        };
        if let Some(note) = note {
            model.note = Set(Some(note.to_string()));
        }
        if let Some(status) = status {
            model.status = Set(Some(status.to_string()));
        }
        if let Some(score) = score {
            model.score = Set(Some(score));
        }
        custom_list_entries::Entity::update(model)
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn delete_entry(&self, list_id: i32, game_id: i32) -> Result<bool> {
        let result = custom_list_entries::Entity::delete_by_id((list_id, game_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
