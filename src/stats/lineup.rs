//! Canonical lineup keys.
//!
//! The "on court" cell of a game sheet lists players in whatever order the
//! scorer typed them. Two cells naming the same players must group together,
//! so every cell is rewritten into one canonical form before aggregation.

use serde::Serialize;
use std::fmt;

const SEPARATOR: &str = ", ";

/// Order-independent lineup identifier, e.g. `"1, 4, 8, 12, 23"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineupKey(String);

impl LineupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Player tokens in key order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|p| !p.is_empty())
    }
}

impl fmt::Display for LineupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First run of ASCII digits in a token, parsed as the player number.
fn player_number(token: &str) -> Option<u64> {
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &token[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Canonicalize a raw lineup cell: split on commas, trim, sort by player number.
///
/// Tokens keep their text (a `#12` stays `#12`); only the ordering looks at
/// the digits. Tokens without a number go last, in input order.
pub fn normalize(raw: &str) -> LineupKey {
    normalize_parts(&[raw])
}

/// Same as [`normalize`] for a lineup already split into player entries.
pub fn normalize_parts<S: AsRef<str>>(parts: &[S]) -> LineupKey {
    let mut tokens: Vec<&str> = parts
        .iter()
        .flat_map(|p| p.as_ref().split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    // Stable sort: None sorts after every Some via the (is_none, n) pair.
    tokens.sort_by_key(|t| {
        let n = player_number(t);
        (n.is_none(), n.unwrap_or(0))
    });
    LineupKey(tokens.join(SEPARATOR))
}

/// Missing cells pass through as a null key.
pub fn normalize_opt(raw: Option<&str>) -> Option<LineupKey> {
    raw.map(normalize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_numerically_not_lexically() {
        assert_eq!(normalize("12, 4, 23").as_str(), "4, 12, 23");
        assert_eq!(normalize("23, 12, 4").as_str(), "4, 12, 23");
        assert_eq!(normalize("3,21,10,1,5").as_str(), "1, 3, 5, 10, 21");
    }

    #[test]
    fn test_permutations_share_a_key() {
        let a = normalize("12, 4, 23, 1, 8");
        let b = normalize("8,1 ,23, 12,4");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "1, 4, 8, 12, 23");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["12, 4, 23, 1, 8", "#5, 10, 2", "", "  ", "7", "a, 3, b, 1"] {
            let once = normalize(raw);
            assert_eq!(normalize(once.as_str()), once, "raw={raw:?}");
        }
    }

    #[test]
    fn test_decorations_are_kept_but_ignored_for_order() {
        assert_eq!(normalize("#12, 4 (C), 23").as_str(), "4 (C), #12, 23");
    }

    #[test]
    fn test_tokens_without_numbers_go_last() {
        assert_eq!(normalize("sub, 3, ?, 1").as_str(), "1, 3, sub, ?");
    }

    #[test]
    fn test_empty_and_missing() {
        assert_eq!(normalize("").as_str(), "");
        assert_eq!(normalize(" , ,").as_str(), "");
        assert_eq!(normalize_opt(None), None);
        assert_eq!(normalize_opt(Some("2, 1")).unwrap().as_str(), "1, 2");
    }

    #[test]
    fn test_parts_match_joined_text() {
        let parts = ["23", " #12", "4", ""];
        assert_eq!(normalize_parts(&parts), normalize("23, #12, 4"));
        assert_eq!(normalize_parts(&parts).as_str(), "4, #12, 23");

        let owned = vec!["8".to_string(), "1".to_string()];
        assert_eq!(normalize_parts(&owned).as_str(), "1, 8");
        assert_eq!(normalize_parts::<&str>(&[]).as_str(), "");
    }

    #[test]
    fn test_players_iterates_in_key_order() {
        let key = normalize("10, 2, 33");
        assert_eq!(key.players().collect::<Vec<_>>(), vec!["2", "10", "33"]);
    }
}
