//! Domain types for the game catalog with strong typing.
//!
//! This module provides type-safe wrappers and domain primitives for the
//! catalog subsystem. It follows the Newtype pattern to prevent ID mixing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a canonical Game row.
///
/// This newtype wrapper prevents mixing game IDs with other entity IDs
/// (e.g. [`ListId`]).
///
/// # Examples
///
/// ```rust
/// use ludarr::domain::GameId;
///
/// let id = GameId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GameId(i32);

impl GameId {
    /// Creates a new `GameId` from a raw i32 value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "GameId should be non-negative");
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GameId> for i32 {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl From<i32> for GameId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for GameId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Unique identifier for a user, as handed down by the (external) auth layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user-owned custom list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListId(i32);

impl ListId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four catalog sub-entity categories a game can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Genre,
    Platform,
    Publisher,
    Developer,
}

impl EntityKind {
    pub const ALL: [Self; 4] = [Self::Genre, Self::Platform, Self::Publisher, Self::Developer];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Platform => "platform",
            Self::Publisher => "publisher",
            Self::Developer => "developer",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized status: {0}")]
pub struct UnknownStatus(pub String);

/// Closed set of per-entry statuses for collection and list entries.
///
/// Caller-supplied status strings are parsed through [`FromStr`]; anything
/// outside the five recognized values is rejected with [`UnknownStatus`]
/// rather than stored verbatim.
///
/// # Examples
///
/// ```rust
/// use ludarr::domain::EntryStatus;
///
/// let status: EntryStatus = "plan_to_play".parse().unwrap();
/// assert_eq!(status, EntryStatus::PlanToPlay);
/// assert!("binge_watching".parse::<EntryStatus>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Playing,
    Completed,
    PlanToPlay,
    OnHold,
    Dropped,
}

impl EntryStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Completed => "completed",
            Self::PlanToPlay => "plan_to_play",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(Self::Playing),
            "completed" => Ok(Self::Completed),
            "plan_to_play" => Ok(Self::PlanToPlay),
            "on_hold" => Ok(Self::OnHold),
            "dropped" => Ok(Self::Dropped),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_id_conversions() {
        let id = GameId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(GameId::from(42), id);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            EntryStatus::Playing,
            EntryStatus::Completed,
            EntryStatus::PlanToPlay,
            EntryStatus::OnHold,
            EntryStatus::Dropped,
        ] {
            assert_eq!(status.as_str().parse::<EntryStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unrecognized_status_is_rejected() {
        let err = "speedrunning".parse::<EntryStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("speedrunning".to_string()));
        assert_eq!(err.to_string(), "unrecognized status: speedrunning");
    }

    #[test]
    fn entity_kind_names() {
        let names: Vec<&str> = EntityKind::ALL.iter().map(EntityKind::as_str).collect();
        assert_eq!(names, vec!["genre", "platform", "publisher", "developer"]);
    }

    #[test]
    fn game_id_serialization() {
        let id = GameId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: GameId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }
}
