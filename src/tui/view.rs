//! Presentation rules that don't touch the terminal: which rows show, in
//! what order, and how values read.

use crate::config::Band;
use crate::pipeline::LineupRow;
use crate::stats::DifferentialRecord;

/// Rows with at least `min_possessions`, most possessions first. Ties fall
/// back to lineup key so the table doesn't jitter between runs.
pub fn visible_rows(rows: &[LineupRow], min_possessions: u32) -> Vec<&LineupRow> {
    let mut out: Vec<&LineupRow> = rows
        .iter()
        .filter(|r| r.metrics.possessions >= min_possessions)
        .collect();
    out.sort_by(|a, b| {
        b.metrics
            .possessions
            .cmp(&a.metrics.possessions)
            .then_with(|| a.aggregate.lineup.cmp(&b.aggregate.lineup))
    });
    out
}

/// Differentials, best plus/minus first.
pub fn ranked_differentials(records: &[DifferentialRecord]) -> Vec<&DifferentialRecord> {
    let mut out: Vec<&DifferentialRecord> = records.iter().collect();
    out.sort_by(|a, b| b.plus_minus.cmp(&a.plus_minus).then_with(|| a.lineup.cmp(&b.lineup)));
    out
}

/// Undefined rates show as an em dash, never as zero.
pub fn format_rate(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "\u{2014}".to_string(),
    }
}

pub fn format_made_attempted(made: u32, attempted: u32) -> String {
    format!("{}-{}", made, attempted)
}

pub fn format_plus_minus(value: Option<i64>) -> String {
    match value {
        Some(v) => format!("{:+}", v),
        None => "\u{2014}".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
    Missing,
}

/// Classify a rate against its band. With `lower_is_better` the band reads
/// the other way round (turnover %).
pub fn tone(value: Option<f64>, band: &Band, lower_is_better: bool) -> Tone {
    let Some(v) = value else {
        return Tone::Missing;
    };
    if lower_is_better {
        if v <= band.good {
            Tone::Good
        } else if v >= band.bad {
            Tone::Bad
        } else {
            Tone::Neutral
        }
    } else if v >= band.good {
        Tone::Good
    } else if v <= band.bad {
        Tone::Bad
    } else {
        Tone::Neutral
    }
}

/// Shorten to `max` chars, marking the cut with an ellipsis.
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 1 {
        return "\u{2026}".to_string();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{}\u{2026}", kept)
}
