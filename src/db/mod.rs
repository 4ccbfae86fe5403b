use crate::domain::EntityKind;
use crate::entities::{custom_list_entries, custom_lists, games, user_games};
use crate::models::GameRecord;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::collection::CollectionRow;
pub use repositories::game::GameInsertOutcome;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn game_repo(&self) -> repositories::game::GameRepository {
        repositories::game::GameRepository::new(self.conn.clone())
    }

    fn catalog_repo(&self) -> repositories::catalog_entity::CatalogEntityRepository {
        repositories::catalog_entity::CatalogEntityRepository::new(self.conn.clone())
    }

    fn collection_repo(&self) -> repositories::collection::CollectionRepository {
        repositories::collection::CollectionRepository::new(self.conn.clone())
    }

    fn list_repo(&self) -> repositories::list::ListRepository {
        repositories::list::ListRepository::new(self.conn.clone())
    }

    // ========== Game Methods ==========

    pub async fn get_game(&self, id: i32) -> Result<Option<games::Model>> {
        self.game_repo().get(id).await
    }

    pub async fn find_game_by_external_id(&self, external_id: i64) -> Result<Option<games::Model>> {
        self.game_repo().find_by_external_id(external_id).await
    }

    pub async fn find_game_by_name(&self, name: &str) -> Result<Option<games::Model>> {
        self.game_repo().find_by_name(name).await
    }

    pub async fn backfill_game_external_id(&self, id: i32, external_id: i64) -> Result<()> {
        self.game_repo().set_external_id(id, external_id).await
    }

    pub async fn insert_game(&self, record: &GameRecord) -> Result<GameInsertOutcome> {
        self.game_repo().insert_new(record).await
    }

    // ========== Catalog Entity Methods ==========

    pub async fn find_entities_by_names(
        &self,
        kind: EntityKind,
        names: &[String],
    ) -> Result<Vec<(i32, String)>> {
        self.catalog_repo().find_by_names(kind, names).await
    }

    pub async fn insert_entities_ignore_conflicts(
        &self,
        kind: EntityKind,
        rows: &[(String, String)],
    ) -> Result<()> {
        self.catalog_repo().insert_missing(kind, rows).await
    }

    pub async fn link_game_entities(
        &self,
        kind: EntityKind,
        game_id: i32,
        entity_ids: &[i32],
    ) -> Result<()> {
        self.catalog_repo()
            .link_game(kind, game_id, entity_ids)
            .await
    }

    // ========== Collection Methods ==========

    pub async fn get_collection_entry(
        &self,
        user_id: i32,
        game_id: i32,
    ) -> Result<Option<user_games::Model>> {
        self.collection_repo().get(user_id, game_id).await
    }

    pub async fn insert_collection_entry(
        &self,
        user_id: i32,
        game_id: i32,
        status: &str,
        score: Option<i32>,
    ) -> Result<()> {
        self.collection_repo()
            .insert(user_id, game_id, status, score)
            .await
    }

    pub async fn update_collection_entry(
        &self,
        user_id: i32,
        game_id: i32,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<()> {
        self.collection_repo()
            .update(user_id, game_id, status, score)
            .await
    }

    pub async fn remove_collection_entry(&self, user_id: i32, game_id: i32) -> Result<bool> {
        self.collection_repo().remove(user_id, game_id).await
    }

    pub async fn collection_for_user(&self, user_id: i32) -> Result<Vec<CollectionRow>> {
        self.collection_repo().list_for_user(user_id).await
    }

    // ========== Custom List Methods ==========

    pub async fn count_lists_for_owner(&self, user_id: i32) -> Result<u64> {
        self.list_repo().count_for_owner(user_id).await
    }

    pub async fn owner_list_slugs(
        &self,
        user_id: i32,
        exclude: Option<i32>,
    ) -> Result<Vec<String>> {
        self.list_repo().slugs_for_owner(user_id, exclude).await
    }

    pub async fn get_list(&self, list_id: i32) -> Result<Option<custom_lists::Model>> {
        self.list_repo().get(list_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_list(
        &self,
        user_id: i32,
        name: &str,
        slug: &str,
        description: Option<&str>,
        cover_color: Option<&str>,
        is_public: bool,
    ) -> Result<custom_lists::Model> {
        self.list_repo()
            .insert(user_id, name, slug, description, cover_color, is_public)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_list(
        &self,
        list_id: i32,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
        cover_color: Option<&str>,
        is_public: Option<bool>,
    ) -> Result<()> {
        self.list_repo()
            .update(list_id, name, slug, description, cover_color, is_public)
            .await
    }

    pub async fn delete_list(&self, list_id: i32) -> Result<bool> {
        self.list_repo().delete(list_id).await
    }

    pub async fn lists_with_stats(
        &self,
        user_id: i32,
        cover_limit: usize,
    ) -> Result<Vec<(custom_lists::Model, i64, Vec<String>)>> {
        self.list_repo().lists_with_stats(user_id, cover_limit).await
    }

    pub async fn get_list_entry(
        &self,
        list_id: i32,
        game_id: i32,
    ) -> Result<Option<custom_list_entries::Model>> {
        self.list_repo().entry(list_id, game_id).await
    }

    pub async fn list_entries(&self, list_id: i32) -> Result<Vec<custom_list_entries::Model>> {
        self.list_repo().entries_for_list(list_id).await
    }

    pub async fn max_list_position(&self, list_id: i32) -> Result<Option<i32>> {
        self.list_repo().max_position(list_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_list_entry(
        &self,
        list_id: i32,
        game_id: i32,
        position: i32,
        note: Option<&str>,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<custom_list_entries::Model> {
        self.list_repo()
            .insert_entry(list_id, game_id, position, note, status, score)
            .await
    }

    pub async fn update_list_entry(
        &self,
        list_id: i32,
        game_id: i32,
        note: Option<&str>,
        status: Option<&str>,
        score: Option<i32>,
    ) -> Result<()> {
        self.list_repo()
            .update_entry(list_id, game_id, note, status, score)
            .await
    }

    pub async fn remove_list_entry(&self, list_id: i32, game_id: i32) -> Result<bool> {
        self.list_repo().delete_entry(list_id, game_id).await
    }

    /// Names of every tag linked to a game, grouped by kind.
    pub async fn game_entity_names(
        &self,
        game_id: i32,
    ) -> Result<HashMap<EntityKind, Vec<String>>> {
        let mut result = HashMap::new();
        for kind in EntityKind::ALL {
            let names = self.catalog_repo().names_for_game(kind, game_id).await?;
            result.insert(kind, names);
        }
        Ok(result)
    }
}
