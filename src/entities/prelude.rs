pub use super::custom_list_entries::Entity as CustomListEntries;
pub use super::custom_lists::Entity as CustomLists;
pub use super::developers::Entity as Developers;
pub use super::game_developers::Entity as GameDevelopers;
pub use super::game_genres::Entity as GameGenres;
pub use super::game_platforms::Entity as GamePlatforms;
pub use super::game_publishers::Entity as GamePublishers;
pub use super::games::Entity as Games;
pub use super::genres::Entity as Genres;
pub use super::platforms::Entity as Platforms;
pub use super::publishers::Entity as Publishers;
pub use super::user_games::Entity as UserGames;
