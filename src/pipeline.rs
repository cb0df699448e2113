//! One analysis run: classified events in, offense/defense tables and
//! plus/minus out.
//!
//! A run is a pure function of (events, filter). Nothing is cached between
//! runs; changing a filter means calling [`run`] again.

use crate::ingest::types::{PlayTags, Role};
use crate::stats::{
    aggregate, differentials, ClassifiedEvent, DifferentialRecord, LineupAggregate, LineupKey,
    LineupMetrics,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Play-type filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub action: Option<String>,
    pub transition: Option<String>,
}

fn tag_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.is_some_and(|a| a.trim().eq_ignore_ascii_case(w.trim())),
    }
}

impl TagFilter {
    pub fn matches(&self, tags: &PlayTags) -> bool {
        tag_matches(self.action.as_deref(), tags.action.as_deref())
            && tag_matches(self.transition.as_deref(), tags.transition.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.transition.is_none()
    }
}

/// Everything that scopes a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisFilter {
    /// Game ids to include; `None` means every loaded game.
    pub games: Option<BTreeSet<String>>,
    pub tags: TagFilter,
}

impl AnalysisFilter {
    pub fn includes_game(&self, game: &str) -> bool {
        self.games.as_ref().is_none_or(|g| g.contains(game))
    }
}

/// Aggregate plus its derived rates, the unit handed to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupRow {
    #[serde(flatten)]
    pub aggregate: LineupAggregate,
    #[serde(flatten)]
    pub metrics: LineupMetrics,
    /// Set only when the lineup appears on both offense and defense.
    pub plus_minus: Option<i64>,
}

impl LineupRow {
    pub fn lineup_label(&self) -> String {
        self.aggregate
            .lineup
            .as_ref()
            .map(LineupKey::to_string)
            .unwrap_or_else(|| "\u{2014}".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub offense: Vec<LineupRow>,
    pub defense: Vec<LineupRow>,
    pub differentials: Vec<DifferentialRecord>,
    /// Events that survived the game and tag filters.
    pub events_used: usize,
}

fn to_rows(
    aggs: Vec<LineupAggregate>,
    plus_minus: &HashMap<Option<LineupKey>, i64>,
) -> Vec<LineupRow> {
    aggs.into_iter()
        .map(|aggregate| {
            let metrics = LineupMetrics::compute(&aggregate);
            let plus_minus = plus_minus.get(&aggregate.lineup).copied();
            LineupRow {
                aggregate,
                metrics,
                plus_minus,
            }
        })
        .collect()
}

pub fn run(events: &[ClassifiedEvent], filter: &AnalysisFilter) -> AnalysisReport {
    let selected: Vec<&ClassifiedEvent> = events
        .iter()
        .filter(|e| filter.includes_game(&e.game) && filter.tags.matches(&e.tags))
        .collect();

    let offense = aggregate(selected.iter().copied(), Some(Role::Offense), |_| true);
    let defense = aggregate(selected.iter().copied(), Some(Role::Defense), |_| true);
    let differentials = differentials(&offense, &defense);

    let plus_minus: HashMap<Option<LineupKey>, i64> = differentials
        .iter()
        .map(|d| (d.lineup.clone(), d.plus_minus))
        .collect();

    tracing::debug!(
        events = selected.len(),
        offense = offense.len(),
        defense = defense.len(),
        joined = differentials.len(),
        "analysis run complete"
    );

    AnalysisReport {
        offense: to_rows(offense, &plus_minus),
        defense: to_rows(defense, &plus_minus),
        differentials,
        events_used: selected.len(),
    }
}

/// Observed tag values, offered as filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagChoices {
    pub actions: Vec<String>,
    pub transitions: Vec<String>,
}

pub fn distinct_tags(events: &[ClassifiedEvent]) -> TagChoices {
    let mut actions = BTreeSet::new();
    let mut transitions = BTreeSet::new();
    for ev in events {
        if let Some(a) = ev.tags.action.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            actions.insert(a.to_string());
        }
        if let Some(t) = ev.tags.transition.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            transitions.insert(t.to_string());
        }
    }
    TagChoices {
        actions: actions.into_iter().collect(),
        transitions: transitions.into_iter().collect(),
    }
}

/// Distinct game ids in load order.
pub fn game_ids(events: &[ClassifiedEvent]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    events
        .iter()
        .filter(|e| seen.insert(e.game.as_str()))
        .map(|e| e.game.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::EventRecord;
    use crate::stats::aggregate::classify_all;

    fn rec(game: &str, lineup: &str, role: Role, code: &str) -> EventRecord {
        EventRecord::new(game, Some(lineup), role, code)
    }

    fn sample() -> Vec<ClassifiedEvent> {
        classify_all(&[
            rec("g1", "1, 2, 3, 4, 5", Role::Offense, "O3")
                .with_tags(Some("Horns"), Some("No")),
            rec("g1", "5, 4, 3, 2, 1", Role::Offense, "X2")
                .with_tags(Some("Pick and Roll"), Some("No")),
            rec("g1", "1, 2, 3, 4, 5", Role::Defense, "O2"),
            rec("g2", "1, 2, 3, 4, 5", Role::Offense, "O2").with_tags(None, Some("Yes")),
            rec("g2", "6, 7, 8, 9, 10", Role::Offense, "TO"),
        ])
    }

    #[test]
    fn test_run_without_filters() {
        let report = run(&sample(), &AnalysisFilter::default());
        assert_eq!(report.events_used, 5);
        assert_eq!(report.offense.len(), 2);
        assert_eq!(report.defense.len(), 1);
        assert_eq!(report.differentials.len(), 1);

        let starters = &report.offense[0];
        assert_eq!(starters.lineup_label(), "1, 2, 3, 4, 5");
        assert_eq!(starters.aggregate.totals.points, 5);
        assert_eq!(starters.metrics.possessions, 3);
        assert_eq!(starters.plus_minus, Some(3));

        let bench = &report.offense[1];
        assert_eq!(bench.plus_minus, None);
        assert_eq!(report.defense[0].plus_minus, Some(3));
    }

    #[test]
    fn test_game_selection() {
        let filter = AnalysisFilter {
            games: Some(BTreeSet::from(["g2".to_string()])),
            ..Default::default()
        };
        let report = run(&sample(), &filter);
        assert_eq!(report.events_used, 2);
        assert!(report.defense.is_empty());
        assert!(report.differentials.is_empty());
    }

    #[test]
    fn test_tag_filter_is_case_insensitive() {
        let filter = AnalysisFilter {
            tags: TagFilter {
                action: Some("horns".to_string()),
                transition: None,
            },
            ..Default::default()
        };
        let report = run(&sample(), &filter);
        assert_eq!(report.events_used, 1);
        assert_eq!(report.offense[0].aggregate.totals.points, 3);
    }

    #[test]
    fn test_missing_tag_fails_a_set_filter() {
        let filter = TagFilter {
            action: None,
            transition: Some("Yes".to_string()),
        };
        assert!(!filter.matches(&PlayTags::default()));
        assert!(TagFilter::default().matches(&PlayTags::default()));
    }

    #[test]
    fn test_distinct_tags_and_games() {
        let events = sample();
        let choices = distinct_tags(&events);
        assert_eq!(choices.actions, vec!["Horns", "Pick and Roll"]);
        assert_eq!(choices.transitions, vec!["No", "Yes"]);
        assert_eq!(game_ids(&events), vec!["g1", "g2"]);
    }

    #[test]
    fn test_report_serializes_undefined_rates_as_null() {
        let report = run(&sample(), &AnalysisFilter::default());
        let json = serde_json::to_value(&report).unwrap();
        let bench = &json["offense"][1];
        assert_eq!(bench["lineup"], "6, 7, 8, 9, 10");
        assert_eq!(bench["role"], "offense");
        assert!(bench["fg_pct"].is_null());
        assert_eq!(bench["turnover_pct"], 100.0);
    }
}
