use crate::config::ThresholdConfig;
use crate::pipeline::AnalysisReport;
use std::collections::VecDeque;
use std::time::Instant;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Offense,
    Defense,
    PlusMinus,
    Games,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Offense, Tab::Defense, Tab::PlusMinus, Tab::Games];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Offense => "Offense",
            Tab::Defense => "Defense",
            Tab::PlusMinus => "Plus/Minus",
            Tab::Games => "Games",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntry {
    pub id: String,
    pub events: usize,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

/// Everything the dashboard draws. Produced by the session, read-only here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub start_time: Instant,
    pub tab: Tab,
    pub report: AnalysisReport,
    pub games: Vec<GameEntry>,
    pub game_cursor: usize,
    pub action_filter: Option<String>,
    pub transition_filter: Option<String>,
    pub min_possessions: u32,
    pub scroll_offset: usize,
    pub thresholds: ThresholdConfig,
    pub logs: VecDeque<LogEntry>,
}

impl AppState {
    pub fn new(thresholds: ThresholdConfig, min_possessions: u32) -> Self {
        Self {
            start_time: Instant::now(),
            tab: Tab::Offense,
            report: AnalysisReport::default(),
            games: Vec::new(),
            game_cursor: 0,
            action_filter: None,
            transition_filter: None,
            min_possessions,
            scroll_offset: 0,
            thresholds,
            logs: VecDeque::with_capacity(MAX_LOGS),
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn selected_games(&self) -> usize {
        self.games.iter().filter(|g| g.selected).count()
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }
}
