//! Domain service for user-owned custom lists.
//!
//! Lists are scoped to their owner: names (and the slugs derived from them)
//! only need to be unique within one user's lists, and each user can hold a
//! configurable maximum number of lists.

use crate::domain::{GameId, ListId, UserId};
use crate::models::{ListEntry, ListSummary};
use serde::Deserialize;
use thiserror::Error;

/// Domain errors for list operations.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Game {game_id} is not in list {list_id}")]
    EntryNotFound { list_id: ListId, game_id: GameId },

    #[error("Game {game_id} is already in list {list_id}")]
    AlreadyInList { list_id: ListId, game_id: GameId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("List limit reached ({0} lists per user)")]
    LimitExceeded(u64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ListError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ListError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Request DTO for creating a list.
///
/// # Examples
///
/// ```
/// use ludarr::services::list_service::CreateListRequest;
/// use ludarr::domain::UserId;
///
/// let request = CreateListRequest {
///     owner: UserId::new(1),
///     name: "Backlog".to_string(),
///     description: None,
///     cover_color: Some("#ff8800".to_string()),
///     is_public: false,
/// };
///
/// assert_eq!(request.name, "Backlog");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListRequest {
    pub owner: UserId,
    pub name: String,
    pub description: Option<String>,
    pub cover_color: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Request DTO for updating a list; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_color: Option<String>,
    pub is_public: Option<bool>,
}

/// Request DTO for the optional per-entry fields when adding a game.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddToListRequest {
    pub note: Option<String>,
    pub status: Option<String>,
    pub score: Option<i32>,
}

/// Request DTO for updating an entry; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntryRequest {
    pub note: Option<String>,
    pub status: Option<String>,
    pub score: Option<i32>,
}

/// Domain service trait for custom list operations.
#[async_trait::async_trait]
pub trait ListService: Send + Sync {
    /// Creates a list for its owner, deriving a per-owner unique slug from
    /// the name (counter-suffixed on collision).
    ///
    /// # Errors
    ///
    /// - [`ListError::Validation`] on an empty or over-long name/description.
    /// - [`ListError::LimitExceeded`] when the owner is at the list cap.
    /// - [`ListError::Database`] on store failures.
    async fn create_list(&self, request: CreateListRequest) -> Result<ListSummary, ListError>;

    /// Applies partial updates to a list. Renaming recomputes the slug,
    /// again unique among the owner's other lists.
    ///
    /// # Errors
    ///
    /// - [`ListError::ListNotFound`] if the list does not exist.
    /// - [`ListError::Validation`] on an empty or over-long name/description.
    /// - [`ListError::Database`] on store failures.
    async fn update_list(
        &self,
        list_id: ListId,
        request: UpdateListRequest,
    ) -> Result<(), ListError>;

    /// Deletes a list along with its membership rows.
    ///
    /// # Errors
    ///
    /// - [`ListError::ListNotFound`] if the list does not exist.
    /// - [`ListError::Database`] on store failures.
    async fn delete_list(&self, list_id: ListId) -> Result<(), ListError>;

    /// Returns all lists of one owner with derived game counts and cover
    /// images, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Database`] on store failures.
    async fn lists_for_owner(&self, owner: UserId) -> Result<Vec<ListSummary>, ListError>;

    /// Appends a game to the end of a list (highest position plus one).
    ///
    /// # Errors
    ///
    /// - [`ListError::ListNotFound`] if the list does not exist.
    /// - [`ListError::AlreadyInList`] if the game is already a member.
    /// - [`ListError::Validation`] on an unknown status or a score outside
    ///   1 through 10.
    /// - [`ListError::Database`] on store failures.
    async fn add_game_to_list(
        &self,
        list_id: ListId,
        game_id: GameId,
        request: AddToListRequest,
    ) -> Result<ListEntry, ListError>;

    /// Applies partial updates to one membership row.
    ///
    /// # Errors
    ///
    /// - [`ListError::EntryNotFound`] if the pair does not exist.
    /// - [`ListError::Validation`] on an unknown status or a score outside
    ///   1 through 10.
    /// - [`ListError::Database`] on store failures.
    async fn update_list_entry(
        &self,
        list_id: ListId,
        game_id: GameId,
        request: UpdateEntryRequest,
    ) -> Result<(), ListError>;

    /// Removes a game from a list. Positions of the remaining entries are
    /// left as they are; gaps in the sequence are fine.
    ///
    /// # Errors
    ///
    /// - [`ListError::EntryNotFound`] if the pair does not exist.
    /// - [`ListError::Database`] on store failures.
    async fn remove_from_list(&self, list_id: ListId, game_id: GameId) -> Result<(), ListError>;

    /// Returns a list's entries ordered by position.
    ///
    /// # Errors
    ///
    /// - [`ListError::ListNotFound`] if the list does not exist.
    /// - [`ListError::Database`] on store failures.
    async fn entries(&self, list_id: ListId) -> Result<Vec<ListEntry>, ListError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_error_display() {
        let err = ListError::ListNotFound(ListId::new(9));
        assert_eq!(err.to_string(), "List not found: 9");

        let err = ListError::AlreadyInList {
            list_id: ListId::new(9),
            game_id: GameId::new(3),
        };
        assert_eq!(err.to_string(), "Game 3 is already in list 9");

        let err = ListError::LimitExceeded(50);
        assert_eq!(err.to_string(), "List limit reached (50 lists per user)");
    }
}
