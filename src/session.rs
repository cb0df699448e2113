//! Dashboard session: owns the loaded events and the filter choices, turns
//! commands into a fresh analysis run, and publishes what the UI draws.
//!
//! Filters live here as plain values and are passed into
//! [`pipeline::run`] on every change; the core keeps no state between runs.

use crate::config::Config;
use crate::ingest::LoadedGame;
use crate::pipeline::{self, AnalysisFilter, TagChoices, TagFilter};
use crate::stats::aggregate::classify_all;
use crate::stats::ClassifiedEvent;
use crate::tui::state::{AppState, GameEntry, Tab};
use crate::tui::view;
use crate::tui::TuiCommand;
use std::collections::BTreeSet;

pub struct Session {
    events: Vec<ClassifiedEvent>,
    choices: TagChoices,
    possession_step: u32,
    state: AppState,
}

/// Step through `None -> choices[0] -> ... -> None`.
fn cycle(current: Option<&str>, choices: &[String]) -> Option<String> {
    match current {
        None => choices.first().cloned(),
        Some(c) => {
            let pos = choices.iter().position(|x| x == c)?;
            choices.get(pos + 1).cloned()
        }
    }
}

impl Session {
    pub fn new(games: Vec<LoadedGame>, config: &Config) -> Self {
        let mut state = AppState::new(
            config.thresholds.clone(),
            config.dashboard.min_possessions,
        );
        let mut events = Vec::new();
        for game in &games {
            state.games.push(GameEntry {
                id: game.id.clone(),
                events: game.events.len(),
                selected: true,
            });
            events.extend(classify_all(&game.events));
        }
        let choices = pipeline::distinct_tags(&events);
        state.push_log(
            "INFO",
            format!("loaded {} games, {} events", games.len(), events.len()),
        );

        let mut session = Self {
            events,
            choices,
            possession_step: config.dashboard.possession_step.max(1),
            state,
        };
        session.recompute();
        session
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    /// Filter built from the current selections. All games selected means
    /// no game restriction.
    pub fn filter(&self) -> AnalysisFilter {
        let games = if self.state.games.iter().all(|g| g.selected) {
            None
        } else {
            Some(
                self.state
                    .games
                    .iter()
                    .filter(|g| g.selected)
                    .map(|g| g.id.clone())
                    .collect::<BTreeSet<String>>(),
            )
        };
        AnalysisFilter {
            games,
            tags: TagFilter {
                action: self.state.action_filter.clone(),
                transition: self.state.transition_filter.clone(),
            },
        }
    }

    fn recompute(&mut self) {
        let filter = self.filter();
        self.state.report = pipeline::run(&self.events, &filter);
        self.state.scroll_offset = 0;
        tracing::info!(
            games = ?filter.games.as_ref().map(|g| g.len()),
            action = ?filter.tags.action,
            transition = ?filter.tags.transition,
            events = self.state.report.events_used,
            "recomputed lineup tables"
        );
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn apply(&mut self, cmd: TuiCommand) -> bool {
        match cmd {
            TuiCommand::Quit => return false,
            TuiCommand::NextTab => self.set_tab(self.state.tab.next()),
            TuiCommand::PrevTab => self.set_tab(self.state.tab.prev()),
            TuiCommand::SelectTab(tab) => self.set_tab(tab),
            TuiCommand::Up => {
                if self.state.tab == Tab::Games {
                    self.state.game_cursor = self.state.game_cursor.saturating_sub(1);
                } else {
                    self.state.scroll_offset = self.state.scroll_offset.saturating_sub(1);
                }
            }
            TuiCommand::Down => {
                if self.state.tab == Tab::Games {
                    let last = self.state.games.len().saturating_sub(1);
                    self.state.game_cursor = (self.state.game_cursor + 1).min(last);
                } else {
                    let last = self.row_count().saturating_sub(1);
                    self.state.scroll_offset = (self.state.scroll_offset + 1).min(last);
                }
            }
            // Game selection only reacts where the cursor is visible.
            TuiCommand::ToggleGame | TuiCommand::SelectAllGames
                if self.state.tab != Tab::Games => {}
            TuiCommand::ToggleGame => {
                let cursor = self.state.game_cursor;
                if let Some(game) = self.state.games.get_mut(cursor) {
                    game.selected = !game.selected;
                    let msg = format!(
                        "{} {}",
                        if game.selected { "selected" } else { "deselected" },
                        game.id
                    );
                    self.state.push_log("INFO", msg);
                    self.recompute();
                }
            }
            TuiCommand::SelectAllGames => {
                let everything = self.state.games.iter().all(|g| g.selected);
                for g in &mut self.state.games {
                    g.selected = !everything;
                }
                self.recompute();
            }
            TuiCommand::CycleAction => {
                self.state.action_filter =
                    cycle(self.state.action_filter.as_deref(), &self.choices.actions);
                self.recompute();
            }
            TuiCommand::CycleTransition => {
                self.state.transition_filter = cycle(
                    self.state.transition_filter.as_deref(),
                    &self.choices.transitions,
                );
                self.recompute();
            }
            TuiCommand::ClearFilters => {
                self.state.action_filter = None;
                self.state.transition_filter = None;
                self.recompute();
            }
            TuiCommand::RaiseMinPossessions => {
                self.state.min_possessions =
                    self.state.min_possessions.saturating_add(self.possession_step);
                self.state.scroll_offset = 0;
            }
            TuiCommand::LowerMinPossessions => {
                self.state.min_possessions =
                    self.state.min_possessions.saturating_sub(self.possession_step);
                self.state.scroll_offset = 0;
            }
        }
        true
    }

    /// Rows the current table tab can scroll through.
    fn row_count(&self) -> usize {
        let report = &self.state.report;
        match self.state.tab {
            Tab::Offense => view::visible_rows(&report.offense, self.state.min_possessions).len(),
            Tab::Defense => view::visible_rows(&report.defense, self.state.min_possessions).len(),
            Tab::PlusMinus => report.differentials.len(),
            Tab::Games => self.state.games.len(),
        }
    }

    fn set_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
        self.state.scroll_offset = 0;
    }
}
