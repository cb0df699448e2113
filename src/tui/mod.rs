pub mod render;
pub mod state;
pub mod view;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::{AppState, Tab};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::watch;

/// Commands the TUI can send back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiCommand {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    Up,
    Down,
    ToggleGame,
    SelectAllGames,
    CycleAction,
    CycleTransition,
    ClearFilters,
    RaiseMinPossessions,
    LowerMinPossessions,
}

pub fn map_key(code: KeyCode) -> Option<TuiCommand> {
    let cmd = match code {
        KeyCode::Char('q') | KeyCode::Esc => TuiCommand::Quit,
        KeyCode::Tab | KeyCode::Right => TuiCommand::NextTab,
        KeyCode::BackTab | KeyCode::Left => TuiCommand::PrevTab,
        KeyCode::Char('1') => TuiCommand::SelectTab(Tab::Offense),
        KeyCode::Char('2') => TuiCommand::SelectTab(Tab::Defense),
        KeyCode::Char('3') => TuiCommand::SelectTab(Tab::PlusMinus),
        KeyCode::Char('4') | KeyCode::Char('g') => TuiCommand::SelectTab(Tab::Games),
        KeyCode::Up | KeyCode::Char('k') => TuiCommand::Up,
        KeyCode::Down | KeyCode::Char('j') => TuiCommand::Down,
        KeyCode::Char(' ') | KeyCode::Enter => TuiCommand::ToggleGame,
        KeyCode::Char('A') => TuiCommand::SelectAllGames,
        KeyCode::Char('a') => TuiCommand::CycleAction,
        KeyCode::Char('t') => TuiCommand::CycleTransition,
        KeyCode::Char('c') => TuiCommand::ClearFilters,
        KeyCode::Char('+') | KeyCode::Char('=') => TuiCommand::RaiseMinPossessions,
        KeyCode::Char('-') => TuiCommand::LowerMinPossessions,
        _ => return None,
    };
    Some(cmd)
}

/// Run the TUI. Reads state from `state_rx`, sends commands on `cmd_tx`.
pub async fn run_tui(
    state_rx: watch::Receiver<AppState>,
    cmd_tx: tokio::sync::mpsc::Sender<TuiCommand>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx, cmd_tx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state_rx: watch::Receiver<AppState>,
    cmd_tx: tokio::sync::mpsc::Sender<TuiCommand>,
) -> Result<()> {
    loop {
        let state = state_rx.borrow().clone();
        terminal.draw(|f| render::draw(f, &state))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = map_key(key.code) {
                    let quit = cmd == TuiCommand::Quit;
                    if cmd_tx.send(cmd).await.is_err() || quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
