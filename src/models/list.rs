use crate::domain::{EntryStatus, GameId, ListId, UserId};
use serde::Serialize;

/// Read-side view of a custom list for the owner's overview page.
///
/// `game_count` and `cover_images` are derived at query time, not stored.
#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub id: ListId,
    pub owner: UserId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_color: Option<String>,
    pub is_public: bool,
    pub game_count: i64,
    pub cover_images: Vec<String>,
}

/// One membership row of a custom list.
#[derive(Debug, Clone, Serialize)]
pub struct ListEntry {
    pub list_id: ListId,
    pub game_id: GameId,
    pub position: i32,
    pub note: Option<String>,
    pub status: Option<EntryStatus>,
    pub score: Option<i32>,
    pub added_at: String,
}

/// One row of a user's plain collection, joined with game display fields.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionEntry {
    pub game_id: GameId,
    pub game_name: String,
    pub game_slug: String,
    pub game_image: Option<String>,
    pub status: EntryStatus,
    pub score: Option<i32>,
    pub added_at: String,
}
