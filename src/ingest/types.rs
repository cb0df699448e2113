use serde::Serialize;
use std::fmt;

/// Whose possession an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Offense,
    Defense,
}

impl Role {
    /// Parse the role cell of a game sheet. Accepts `O`/`OFF`/`OFFENSE`
    /// and `D`/`DEF`/`DEFENSE` in any case.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "O" | "OFF" | "OFFENSE" => Some(Role::Offense),
            "D" | "DEF" | "DEFENSE" => Some(Role::Defense),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Offense => write!(f, "Offense"),
            Role::Defense => write!(f, "Defense"),
        }
    }
}

/// Play-type tags. Only used for filtering, never for stat computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayTags {
    pub action: Option<String>,
    pub transition: Option<String>,
}

/// One row of a game sheet, as handed over by the loader.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub game: String,
    pub lineup_raw: Option<String>,
    pub role: Role,
    pub result_code: String,
    pub tags: PlayTags,
}

impl EventRecord {
    pub fn new(game: &str, lineup_raw: Option<&str>, role: Role, result_code: &str) -> Self {
        Self {
            game: game.to_string(),
            lineup_raw: lineup_raw.map(str::to_string),
            role,
            result_code: result_code.to_string(),
            tags: PlayTags::default(),
        }
    }

    pub fn with_tags(mut self, action: Option<&str>, transition: Option<&str>) -> Self {
        self.tags = PlayTags {
            action: action.map(str::to_string),
            transition: transition.map(str::to_string),
        };
        self
    }
}
