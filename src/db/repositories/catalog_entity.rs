use crate::domain::EntityKind;
use crate::entities::{
    developers, game_developers, game_genres, game_platforms, game_publishers, genres, platforms,
    publishers,
};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

/// One of the four tag tables (genres, platforms, publishers, developers).
///
/// All four share the (id, name, slug) shape, so the resolver algorithm is
/// written once against this trait and dispatched by [`EntityKind`].
pub trait TagEntity: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + Send;

    fn id_column() -> Self::Column;
    fn name_column() -> Self::Column;
    fn into_parts(model: Self::Model) -> (i32, String);
    fn new_row(name: String, slug: String) -> Self::Active;
}

/// One of the four game/tag junction tables.
pub trait TagLink: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + Send;

    fn key_columns() -> [Self::Column; 2];
    fn entity_id(model: Self::Model) -> i32;
    fn new_row(game_id: i32, entity_id: i32) -> Self::Active;
}

macro_rules! impl_tag_entity {
    ($module:ident) => {
        impl TagEntity for $module::Entity {
            type Active = $module::ActiveModel;

            fn id_column() -> Self::Column {
                $module::Column::Id
            }

            fn name_column() -> Self::Column {
                $module::Column::Name
            }

            fn into_parts(model: Self::Model) -> (i32, String) {
                (model.id, model.name)
            }

            fn new_row(name: String, slug: String) -> Self::Active {
                $module::ActiveModel {
                    name: Set(name),
                    slug: Set(slug),
                    ..Default::default()
                }
            }
        }
    };
}

macro_rules! impl_tag_link {
    ($module:ident) => {
        impl TagLink for $module::Entity {
            type Active = $module::ActiveModel;

            fn key_columns() -> [Self::Column; 2] {
                [$module::Column::GameId, $module::Column::EntityId]
            }

            fn entity_id(model: Self::Model) -> i32 {
                model.entity_id
            }

            fn new_row(game_id: i32, entity_id: i32) -> Self::Active {
                $module::ActiveModel {
                    game_id: Set(game_id),
                    entity_id: Set(entity_id),
                }
            }
        }
    };
}

impl_tag_entity!(genres);
impl_tag_entity!(platforms);
impl_tag_entity!(publishers);
impl_tag_entity!(developers);

impl_tag_link!(game_genres);
impl_tag_link!(game_platforms);
impl_tag_link!(game_publishers);
impl_tag_link!(game_developers);

pub struct CatalogEntityRepository {
    conn: DatabaseConnection,
}

impl CatalogEntityRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Batch lookup of tag rows by exact name.
    pub async fn find_by_names(
        &self,
        kind: EntityKind,
        names: &[String],
    ) -> Result<Vec<(i32, String)>> {
        match kind {
            EntityKind::Genre => self.fetch::<genres::Entity>(names).await,
            EntityKind::Platform => self.fetch::<platforms::Entity>(names).await,
            EntityKind::Publisher => self.fetch::<publishers::Entity>(names).await,
            EntityKind::Developer => self.fetch::<developers::Entity>(names).await,
        }
    }

    /// Conflict-ignoring batch insert of (name, slug) tag rows.
    ///
    /// Rows that lost a name or slug uniqueness race are skipped silently;
    /// callers re-fetch afterwards to pick up the winners' ids.
    pub async fn insert_missing(&self, kind: EntityKind, rows: &[(String, String)]) -> Result<()> {
        match kind {
            EntityKind::Genre => self.insert_ignore::<genres::Entity>(rows).await,
            EntityKind::Platform => self.insert_ignore::<platforms::Entity>(rows).await,
            EntityKind::Publisher => self.insert_ignore::<publishers::Entity>(rows).await,
            EntityKind::Developer => self.insert_ignore::<developers::Entity>(rows).await,
        }
    }

    /// Conflict-ignoring bulk insert of (game, entity) association rows, so
    /// re-ingesting a record never duplicates a pair.
    pub async fn link_game(
        &self,
        kind: EntityKind,
        game_id: i32,
        entity_ids: &[i32],
    ) -> Result<()> {
        match kind {
            EntityKind::Genre => {
                self.insert_links::<game_genres::Entity>(game_id, entity_ids)
                    .await
            }
            EntityKind::Platform => {
                self.insert_links::<game_platforms::Entity>(game_id, entity_ids)
                    .await
            }
            EntityKind::Publisher => {
                self.insert_links::<game_publishers::Entity>(game_id, entity_ids)
                    .await
            }
            EntityKind::Developer => {
                self.insert_links::<game_developers::Entity>(game_id, entity_ids)
                    .await
            }
        }
    }

    /// Names of all tag rows of one kind linked to a game, sorted.
    pub async fn names_for_game(&self, kind: EntityKind, game_id: i32) -> Result<Vec<String>> {
        match kind {
            EntityKind::Genre => {
                self.linked_names::<game_genres::Entity, genres::Entity>(game_id)
                    .await
            }
            EntityKind::Platform => {
                self.linked_names::<game_platforms::Entity, platforms::Entity>(game_id)
                    .await
            }
            EntityKind::Publisher => {
                self.linked_names::<game_publishers::Entity, publishers::Entity>(game_id)
                    .await
            }
            EntityKind::Developer => {
                self.linked_names::<game_developers::Entity, developers::Entity>(game_id)
                    .await
            }
        }
    }

    async fn linked_names<L: TagLink, E: TagEntity>(&self, game_id: i32) -> Result<Vec<String>> {
        let [game_col, _] = L::key_columns();
        let links = L::find()
            .filter(game_col.eq(game_id))
            .all(&self.conn)
            .await?;

        let entity_ids: Vec<i32> = links.into_iter().map(L::entity_id).collect();
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = E::find()
            .filter(E::id_column().is_in(entity_ids))
            .all(&self.conn)
            .await?;

        let mut names: Vec<String> = rows
            .into_iter()
            .map(|model| E::into_parts(model).1)
            .collect();
        names.sort();
        Ok(names)
    }

    async fn fetch<E: TagEntity>(&self, names: &[String]) -> Result<Vec<(i32, String)>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let rows = E::find()
            .filter(E::name_column().is_in(names.iter().cloned()))
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(E::into_parts).collect())
    }

    async fn insert_ignore<E: TagEntity>(&self, rows: &[(String, String)]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let models: Vec<E::Active> = rows
            .iter()
            .map(|(name, slug)| E::new_row(name.clone(), slug.clone()))
            .collect();

        // Target-less ON CONFLICT DO NOTHING also swallows slug collisions
        // between distinct names; the resolver handles those on re-fetch.
        let result = E::insert_many(models)
            .on_conflict(OnConflict::new().do_nothing().to_owned())
            .exec(&self.conn)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_links<E: TagLink>(&self, game_id: i32, entity_ids: &[i32]) -> Result<()> {
        if entity_ids.is_empty() {
            return Ok(());
        }

        let models: Vec<E::Active> = entity_ids
            .iter()
            .map(|&entity_id| E::new_row(game_id, entity_id))
            .collect();

        let result = E::insert_many(models)
            .on_conflict(
                OnConflict::columns(E::key_columns())
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.conn)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
