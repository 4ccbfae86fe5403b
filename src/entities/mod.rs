pub mod prelude;

pub mod custom_list_entries;
pub mod custom_lists;
pub mod developers;
pub mod game_developers;
pub mod game_genres;
pub mod game_platforms;
pub mod game_publishers;
pub mod games;
pub mod genres;
pub mod platforms;
pub mod publishers;
pub mod user_games;
