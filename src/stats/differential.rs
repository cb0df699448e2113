use super::aggregate::LineupAggregate;
use super::lineup::LineupKey;
use serde::Serialize;
use std::collections::HashMap;

/// Offense vs defense point totals for a lineup seen on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifferentialRecord {
    pub lineup: Option<LineupKey>,
    pub offense_points: u32,
    pub defense_points: u32,
    pub plus_minus: i64,
}

/// Inner join of the offense and defense tables on lineup key.
///
/// Keys present on only one side produce no record. Output follows the
/// order of `offense`.
pub fn differentials(
    offense: &[LineupAggregate],
    defense: &[LineupAggregate],
) -> Vec<DifferentialRecord> {
    let defense_points: HashMap<&Option<LineupKey>, u32> = defense
        .iter()
        .map(|d| (&d.lineup, d.totals.points))
        .collect();

    offense
        .iter()
        .filter_map(|o| {
            let against = *defense_points.get(&o.lineup)?;
            Some(DifferentialRecord {
                lineup: o.lineup.clone(),
                offense_points: o.totals.points,
                defense_points: against,
                plus_minus: i64::from(o.totals.points) - i64::from(against),
            })
        })
        .collect()
}
