pub mod catalog_entity;
pub mod collection;
pub mod game;
pub mod list;

use sea_orm::{DbErr, SqlErr};

/// Returns the backend's message when `err` is a uniqueness violation.
///
/// The message names the violated constraint (sqlite reports
/// `UNIQUE constraint failed: games.slug`), which lets callers tell a slug
/// collision apart from a lost external-id/name insert race.
pub(crate) fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
        _ => None,
    }
}
