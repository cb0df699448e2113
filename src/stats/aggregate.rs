//! Grouping of classified events into per-lineup totals.

use super::classify::{classify, EventFlags};
use super::lineup::{normalize_opt, LineupKey};
use crate::ingest::types::{EventRecord, PlayTags, Role};
use serde::Serialize;
use std::collections::BTreeMap;

/// An event after normalization and classification. Built once per record,
/// never mutated.
#[derive(Debug, Clone)]
pub struct ClassifiedEvent {
    pub game: String,
    pub lineup: Option<LineupKey>,
    pub role: Role,
    pub tags: PlayTags,
    pub flags: EventFlags,
}

impl ClassifiedEvent {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            game: record.game.clone(),
            lineup: normalize_opt(record.lineup_raw.as_deref()),
            role: record.role,
            tags: record.tags.clone(),
            flags: classify(&record.result_code),
        }
    }
}

pub fn classify_all(records: &[EventRecord]) -> Vec<ClassifiedEvent> {
    records.iter().map(ClassifiedEvent::from_record).collect()
}

/// Summed counting stats for one lineup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineupTotals {
    pub points: u32,
    pub shots: u32,
    pub fg_made: u32,
    pub fg_attempted: u32,
    pub three_made: u32,
    pub three_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
    pub turnovers: u32,
    pub own_off_rebounds: u32,
    pub opp_off_rebounds: u32,
}

impl LineupTotals {
    pub fn add(&mut self, f: &EventFlags) {
        self.points += f.points;
        self.shots += f.shots;
        self.fg_made += f.fg_made;
        self.fg_attempted += f.fg_attempted;
        self.three_made += f.three_made;
        self.three_attempted += f.three_attempted;
        self.ft_made += f.ft_made;
        self.ft_attempted += f.ft_attempted;
        self.turnovers += f.turnovers;
        self.own_off_rebounds += f.own_off_rebounds;
        self.opp_off_rebounds += f.opp_off_rebounds;
    }

    pub fn merge(&mut self, other: &LineupTotals) {
        self.points += other.points;
        self.shots += other.shots;
        self.fg_made += other.fg_made;
        self.fg_attempted += other.fg_attempted;
        self.three_made += other.three_made;
        self.three_attempted += other.three_attempted;
        self.ft_made += other.ft_made;
        self.ft_attempted += other.ft_attempted;
        self.turnovers += other.turnovers;
        self.own_off_rebounds += other.own_off_rebounds;
        self.opp_off_rebounds += other.opp_off_rebounds;
    }

    /// Offensive rebounds that matter for `role`: ours on offense, theirs on defense.
    pub fn off_rebounds_for(&self, role: Role) -> u32 {
        match role {
            Role::Offense => self.own_off_rebounds,
            Role::Defense => self.opp_off_rebounds,
        }
    }

    /// Possessions for `role`. Shots already count turnovers; an offensive
    /// rebound continues the same possession so it is taken back out.
    pub fn possessions_for(&self, role: Role) -> u32 {
        self.shots.saturating_sub(self.off_rebounds_for(role))
    }
}

impl<'a> FromIterator<&'a EventFlags> for LineupTotals {
    fn from_iter<I: IntoIterator<Item = &'a EventFlags>>(iter: I) -> Self {
        let mut totals = LineupTotals::default();
        for f in iter {
            totals.add(f);
        }
        totals
    }
}

/// Per-lineup, per-role summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineupAggregate {
    pub lineup: Option<LineupKey>,
    pub role: Role,
    pub events: u32,
    #[serde(flatten)]
    pub totals: LineupTotals,
}

impl LineupAggregate {
    pub fn possessions(&self) -> u32 {
        self.totals.possessions_for(self.role)
    }

    pub fn off_rebounds(&self) -> u32 {
        self.totals.off_rebounds_for(self.role)
    }
}

/// Group events by (role, lineup) and sum their flags.
///
/// `role` drops rows of the other side when set. `keep` is the play-type
/// predicate; rows it rejects are discarded before grouping. Only observed
/// groups are produced, ordered by role then lineup key.
pub fn aggregate<'a, I, F>(events: I, role: Option<Role>, keep: F) -> Vec<LineupAggregate>
where
    I: IntoIterator<Item = &'a ClassifiedEvent>,
    F: Fn(&PlayTags) -> bool,
{
    let mut groups: BTreeMap<(Role, Option<LineupKey>), LineupAggregate> = BTreeMap::new();

    for ev in events {
        if role.is_some_and(|r| r != ev.role) || !keep(&ev.tags) {
            continue;
        }
        let entry = groups
            .entry((ev.role, ev.lineup.clone()))
            .or_insert_with(|| LineupAggregate {
                lineup: ev.lineup.clone(),
                role: ev.role,
                events: 0,
                totals: LineupTotals::default(),
            });
        entry.events += 1;
        entry.totals.add(&ev.flags);
    }

    groups.into_values().collect()
}
