//! `SeaORM` implementation of the `ListService` trait.

use crate::config::CatalogConfig;
use crate::db::Store;
use crate::domain::{EntryStatus, GameId, ListId, UserId};
use crate::entities::{custom_list_entries, custom_lists};
use crate::models::{ListEntry, ListSummary};
use crate::services::list_service::{
    AddToListRequest, CreateListRequest, UpdateEntryRequest, UpdateListRequest,
};
use crate::services::{ListError, ListService};
use crate::slug::{dedup_with_counter, slugify};

const MAX_NAME_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 500;

/// SeaORM-based implementation of the `ListService` trait.
pub struct SeaOrmListService {
    store: Store,
    catalog: CatalogConfig,
}

impl SeaOrmListService {
    #[must_use]
    pub const fn new(store: Store, catalog: CatalogConfig) -> Self {
        Self { store, catalog }
    }

    fn validate_name(name: &str) -> Result<&str, ListError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ListError::Validation("list name must not be empty".to_string()));
        }
        if trimmed.chars().count() > MAX_NAME_CHARS {
            return Err(ListError::Validation(format!(
                "list name must be at most {MAX_NAME_CHARS} characters"
            )));
        }
        Ok(trimmed)
    }

    fn validate_description(description: Option<&str>) -> Result<(), ListError> {
        if let Some(text) = description
            && text.chars().count() > MAX_DESCRIPTION_CHARS
        {
            return Err(ListError::Validation(format!(
                "description must be at most {MAX_DESCRIPTION_CHARS} characters"
            )));
        }
        Ok(())
    }

    fn parse_status(status: Option<&str>) -> Result<Option<EntryStatus>, ListError> {
        status
            .map(|s| {
                s.parse().map_err(|err: crate::domain::UnknownStatus| {
                    ListError::Validation(err.to_string())
                })
            })
            .transpose()
    }

    fn validate_score(score: Option<i32>) -> Result<(), ListError> {
        if let Some(value) = score
            && !(1..=10).contains(&value)
        {
            return Err(ListError::Validation(format!(
                "score must be between 1 and 10, got {value}"
            )));
        }
        Ok(())
    }

    /// Derives a slug for `name` that no other list of this owner uses.
    async fn owner_unique_slug(
        &self,
        owner: i32,
        name: &str,
        exclude: Option<i32>,
    ) -> Result<String, ListError> {
        let base = slugify(name);
        let base = if base.is_empty() { "list".to_string() } else { base };
        let taken = self.store.owner_list_slugs(owner, exclude).await?;
        Ok(dedup_with_counter(&base, &taken))
    }

    async fn require_list(&self, list_id: ListId) -> Result<custom_lists::Model, ListError> {
        self.store
            .get_list(list_id.value())
            .await?
            .ok_or(ListError::ListNotFound(list_id))
    }

    fn cover_limit(&self) -> usize {
        usize::try_from(self.catalog.cover_image_limit).unwrap_or(usize::MAX)
    }

    fn summary(list: custom_lists::Model, game_count: i64, cover_images: Vec<String>) -> ListSummary {
        ListSummary {
            id: ListId::new(list.id),
            owner: UserId::new(list.user_id),
            name: list.name,
            slug: list.slug,
            description: list.description,
            cover_color: list.cover_color,
            is_public: list.is_public,
            game_count,
            cover_images,
        }
    }

    fn entry_view(model: custom_list_entries::Model) -> Result<ListEntry, ListError> {
        let status = model
            .status
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|err: crate::domain::UnknownStatus| {
                ListError::Database(format!(
                    "stored status for game {} in list {} is corrupt: {err}",
                    model.game_id, model.list_id
                ))
            })?;
        Ok(ListEntry {
            list_id: ListId::new(model.list_id),
            game_id: GameId::new(model.game_id),
            position: model.position,
            note: model.note,
            status,
            score: model.score,
            added_at: model.added_at,
        })
    }
}

#[async_trait::async_trait]
impl ListService for SeaOrmListService {
    async fn create_list(&self, request: CreateListRequest) -> Result<ListSummary, ListError> {
        let name = Self::validate_name(&request.name)?.to_string();
        Self::validate_description(request.description.as_deref())?;

        let owner = request.owner.value();
        let count = self.store.count_lists_for_owner(owner).await?;
        if count >= self.catalog.max_lists_per_user {
            return Err(ListError::LimitExceeded(self.catalog.max_lists_per_user));
        }

        let slug = self.owner_unique_slug(owner, &name, None).await?;
        let list = self
            .store
            .insert_list(
                owner,
                &name,
                &slug,
                request.description.as_deref(),
                request.cover_color.as_deref(),
                request.is_public,
            )
            .await?;

        Ok(Self::summary(list, 0, Vec::new()))
    }

    async fn update_list(
        &self,
        list_id: ListId,
        request: UpdateListRequest,
    ) -> Result<(), ListError> {
        let existing = self.require_list(list_id).await?;
        Self::validate_description(request.description.as_deref())?;

        let mut new_name = None;
        let mut new_slug = None;
        if let Some(name) = request.name.as_deref() {
            let name = Self::validate_name(name)?;
            if name != existing.name {
                new_slug = Some(
                    self.owner_unique_slug(existing.user_id, name, Some(existing.id))
                        .await?,
                );
            }
            new_name = Some(name.to_string());
        }

        self.store
            .update_list(
                list_id.value(),
                new_name.as_deref(),
                new_slug.as_deref(),
                request.description.as_deref(),
                request.cover_color.as_deref(),
                request.is_public,
            )
            .await?;
        Ok(())
    }

    async fn delete_list(&self, list_id: ListId) -> Result<(), ListError> {
        if self.store.delete_list(list_id.value()).await? {
            Ok(())
        } else {
            Err(ListError::ListNotFound(list_id))
        }
    }

    async fn lists_for_owner(&self, owner: UserId) -> Result<Vec<ListSummary>, ListError> {
        let rows = self
            .store
            .lists_with_stats(owner.value(), self.cover_limit())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(list, count, covers)| Self::summary(list, count, covers))
            .collect())
    }

    async fn add_game_to_list(
        &self,
        list_id: ListId,
        game_id: GameId,
        request: AddToListRequest,
    ) -> Result<ListEntry, ListError> {
        self.require_list(list_id).await?;

        if self
            .store
            .get_list_entry(list_id.value(), game_id.value())
            .await?
            .is_some()
        {
            return Err(ListError::AlreadyInList { list_id, game_id });
        }

        let status = Self::parse_status(request.status.as_deref())?;
        Self::validate_score(request.score)?;

        let position = self
            .store
            .max_list_position(list_id.value())
            .await?
            .map_or(1, |max| max + 1);

        let model = self
            .store
            .insert_list_entry(
                list_id.value(),
                game_id.value(),
                position,
                request.note.as_deref(),
                status.map(|s| s.as_str()),
                request.score,
            )
            .await?;

        Self::entry_view(model)
    }

    async fn update_list_entry(
        &self,
        list_id: ListId,
        game_id: GameId,
        request: UpdateEntryRequest,
    ) -> Result<(), ListError> {
        if self
            .store
            .get_list_entry(list_id.value(), game_id.value())
            .await?
            .is_none()
        {
            return Err(ListError::EntryNotFound { list_id, game_id });
        }

        let status = Self::parse_status(request.status.as_deref())?;
        Self::validate_score(request.score)?;

        self.store
            .update_list_entry(
                list_id.value(),
                game_id.value(),
                request.note.as_deref(),
                status.map(|s| s.as_str()),
                request.score,
            )
            .await?;
        Ok(())
    }

    async fn remove_from_list(&self, list_id: ListId, game_id: GameId) -> Result<(), ListError> {
        if self
            .store
            .remove_list_entry(list_id.value(), game_id.value())
            .await?
        {
            Ok(())
        } else {
            Err(ListError::EntryNotFound { list_id, game_id })
        }
    }

    async fn entries(&self, list_id: ListId) -> Result<Vec<ListEntry>, ListError> {
        self.require_list(list_id).await?;
        let rows = self.store.list_entries(list_id.value()).await?;
        rows.into_iter().map(Self::entry_view).collect()
    }
}
