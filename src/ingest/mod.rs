pub mod csv_games;
pub mod types;

pub use csv_games::{list_games, load_game, load_season, GameFile, LoadedGame};
pub use types::{EventRecord, PlayTags, Role};
