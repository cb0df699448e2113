//! Game sheets on disk: one CSV per game in a season folder.

use super::types::{EventRecord, PlayTags, Role};
use crate::config::ColumnConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFile {
    /// File stem, used as the game id in filters.
    pub id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoadedGame {
    pub id: String,
    pub events: Vec<EventRecord>,
    /// Rows dropped because their role cell could not be read.
    pub skipped_rows: usize,
}

/// `.csv` files in `folder`, sorted by file name.
pub fn list_games(folder: &Path) -> Result<Vec<GameFile>> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Failed to list game folder: {}", folder.display()))?;

    let mut games = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping game file with non-UTF-8 name");
            continue;
        };
        games.push(GameFile {
            id: id.to_string(),
            path,
        });
    }
    games.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(games)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn cell<'r>(row: &'r csv::StringRecord, idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Parse one game sheet from any reader. Lineup, result and role columns are
/// required; the play-type columns are optional.
pub fn read_game<R: std::io::Read>(
    game_id: &str,
    rdr: R,
    columns: &ColumnConfig,
) -> Result<LoadedGame> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader.headers()?.clone();
    let required = |name: &str| {
        column_index(&headers, name)
            .with_context(|| format!("missing column {:?} in game {}", name, game_id))
    };
    let lineup_idx = required(&columns.lineup)?;
    let result_idx = required(&columns.result)?;
    let role_idx = required(&columns.role)?;
    let action_idx = column_index(&headers, &columns.action);
    let transition_idx = column_index(&headers, &columns.transition);

    let mut events = Vec::new();
    let mut skipped_rows = 0;
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("bad CSV row {} in game {}", line + 2, game_id))?;

        let Some(role) = cell(&row, Some(role_idx)).and_then(Role::parse) else {
            skipped_rows += 1;
            continue;
        };

        events.push(EventRecord {
            game: game_id.to_string(),
            lineup_raw: cell(&row, Some(lineup_idx)).map(str::to_string),
            role,
            result_code: cell(&row, Some(result_idx)).unwrap_or_default().to_string(),
            tags: PlayTags {
                action: cell(&row, action_idx).map(str::to_string),
                transition: cell(&row, transition_idx).map(str::to_string),
            },
        });
    }

    if skipped_rows > 0 {
        tracing::warn!(game = game_id, skipped_rows, "rows without a readable role were skipped");
    }

    Ok(LoadedGame {
        id: game_id.to_string(),
        events,
        skipped_rows,
    })
}

pub fn load_game(game: &GameFile, columns: &ColumnConfig) -> Result<LoadedGame> {
    let file = std::fs::File::open(&game.path)
        .with_context(|| format!("Failed to open game file: {}", game.path.display()))?;
    read_game(&game.id, file, columns)
}

/// Load every game in `folder`. A game that fails to load is logged and
/// left out; only an unreadable folder is an error.
pub fn load_season(folder: &Path, columns: &ColumnConfig) -> Result<Vec<LoadedGame>> {
    let files = list_games(folder)?;
    let mut games = Vec::with_capacity(files.len());
    for file in &files {
        match load_game(file, columns) {
            Ok(game) => {
                tracing::debug!(game = %game.id, events = game.events.len(), "loaded game");
                games.push(game);
            }
            Err(e) => tracing::warn!(game = %file.id, error = %format!("{:#}", e), "failed to load game"),
        }
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Time,ON COURT,O/D,Result,Half Court Action,Transition
19:40,\"12, 4, 23, 1, 8\",O,O3,Horns,No
19:10,\"12, 4, 23, 1, 8\",D,X2,,
18:55,,O,TO,,Yes
18:30,\"4, 12, 23, 1, 8\",?,O2,,
18:02,\"4, 12, 23, 1, 8\",Offense,Dunk,,";

    #[test]
    fn test_reads_rows_and_tags() {
        let game = read_game("g1", SHEET.as_bytes(), &ColumnConfig::default()).unwrap();
        assert_eq!(game.id, "g1");
        assert_eq!(game.events.len(), 4);
        assert_eq!(game.skipped_rows, 1);

        let first = &game.events[0];
        assert_eq!(first.lineup_raw.as_deref(), Some("12, 4, 23, 1, 8"));
        assert_eq!(first.role, Role::Offense);
        assert_eq!(first.result_code, "O3");
        assert_eq!(first.tags.action.as_deref(), Some("Horns"));
        assert_eq!(first.tags.transition.as_deref(), Some("No"));

        assert_eq!(game.events[1].role, Role::Defense);
        assert_eq!(game.events[1].tags, PlayTags::default());
    }

    #[test]
    fn test_empty_lineup_is_missing() {
        let game = read_game("g1", SHEET.as_bytes(), &ColumnConfig::default()).unwrap();
        assert_eq!(game.events[2].lineup_raw, None);
        assert_eq!(game.events[2].tags.transition.as_deref(), Some("Yes"));
    }

    #[test]
    fn test_unknown_result_codes_are_kept_verbatim() {
        let game = read_game("g1", SHEET.as_bytes(), &ColumnConfig::default()).unwrap();
        assert_eq!(game.events[3].result_code, "Dunk");
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let sheet = "ON COURT,Result\n\"1, 2\",O2";
        let err = read_game("g9", sheet.as_bytes(), &ColumnConfig::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("O/D"));
    }

    #[test]
    fn test_tag_columns_are_optional() {
        let sheet = "ON COURT,O/D,Result\n\"1, 2\",D,O2";
        let game = read_game("g1", sheet.as_bytes(), &ColumnConfig::default()).unwrap();
        assert_eq!(game.events.len(), 1);
        assert_eq!(game.events[0].tags, PlayTags::default());
    }

    #[test]
    fn test_custom_column_names() {
        let columns = ColumnConfig {
            role: "Side".to_string(),
            ..ColumnConfig::default()
        };
        let sheet = "ON COURT,Side,Result\n\"1, 2\",def,FT - MK";
        let game = read_game("g1", sheet.as_bytes(), &columns).unwrap();
        assert_eq!(game.events[0].role, Role::Defense);
        assert_eq!(game.events[0].result_code, "FT - MK");
    }
}
