pub mod game;
pub mod list;

pub use game::{GameRecord, NamedRef};
pub use list::{CollectionEntry, ListEntry, ListSummary};
