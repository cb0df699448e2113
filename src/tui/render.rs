use super::state::{AppState, Tab};
use super::view::{self, Tone};
use crate::config::Band;
use crate::pipeline::LineupRow;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    draw_tabs(f, state, chunks[1]);
    match state.tab {
        Tab::Offense => draw_lineups(f, state, &state.report.offense, " Offense ", chunks[2]),
        Tab::Defense => draw_lineups(f, state, &state.report.defense, " Defense ", chunks[2]),
        Tab::PlusMinus => draw_plus_minus(f, state, chunks[2]),
        Tab::Games => draw_games(f, state, chunks[2]),
    }
    draw_logs(f, state, chunks[3]);
    draw_footer(f, state, chunks[4]);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Neutral => Color::Yellow,
        Tone::Missing => Color::DarkGray,
    }
}

fn rate_cell(value: Option<f64>, decimals: usize, band: &Band, lower_is_better: bool) -> Cell<'static> {
    let color = tone_color(view::tone(value, band, lower_is_better));
    Cell::from(view::format_rate(value, decimals)).style(Style::default().fg(color))
}

fn plus_minus_color(value: Option<i64>) -> Color {
    match value {
        Some(v) if v > 0 => Color::Green,
        Some(v) if v < 0 => Color::Red,
        Some(_) => Color::White,
        None => Color::DarkGray,
    }
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let filter_text = |v: &Option<String>| v.clone().unwrap_or_else(|| "All".to_string());
    let games = format!("{}/{}", state.selected_games(), state.games.len());

    let line = Line::from(vec![
        Span::raw(" Games: "),
        Span::styled(games, Style::default().fg(Color::Cyan)),
        Span::raw(" | Action: "),
        Span::styled(filter_text(&state.action_filter), Style::default().fg(Color::Cyan)),
        Span::raw(" | Transition: "),
        Span::styled(filter_text(&state.transition_filter), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" | Min Poss: {}", state.min_possessions)),
        Span::raw(format!(" | Events: {}", state.report.events_used)),
        Span::styled(
            format!(" | Up: {}", state.uptime()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .title(Span::styled(
            " Lineup Dashboard ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_tabs(f: &mut Frame, state: &AppState, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn empty_panel(f: &mut Frame, title: &str, message: &str, hint: String, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(para, area);
}

/// Apply the scroll offset and build the `[shown/total]` title.
fn window<T>(items: Vec<T>, state: &AppState, area: Rect, title: &str) -> (Vec<T>, String) {
    let visible_lines = area.height.saturating_sub(4) as usize; // borders + header row + padding
    let total = items.len();
    let offset = state.scroll_offset.min(total.saturating_sub(visible_lines));
    let shown: Vec<T> = items.into_iter().skip(offset).take(visible_lines).collect();
    let title = format!(
        "{}[{}/{} rows] ",
        title,
        (offset + shown.len()).min(total),
        total
    );
    (shown, title)
}

fn draw_lineups(f: &mut Frame, state: &AppState, rows: &[LineupRow], title: &str, area: Rect) {
    let visible = view::visible_rows(rows, state.min_possessions);
    if visible.is_empty() {
        let hint = format!(
            "{} lineups below {} possessions",
            rows.len(),
            state.min_possessions
        );
        empty_panel(f, title, "No lineups to show", hint, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let th = &state.thresholds;

    // Poss Pts PPP FG FG% 3P 3P% OReb OReb% TO TO% FT FT% +/-
    let fixed_full: usize = 5 + 5 + 6 + 7 + 6 + 7 + 6 + 5 + 6 + 4 + 6 + 7 + 6 + 5;
    let show_ft = inner_width >= fixed_full + 16;
    let fixed = if show_ft { fixed_full } else { fixed_full - 13 };
    let lineup_w = inner_width.saturating_sub(fixed).max(8);

    let mut headers = vec![
        "Lineup", "Poss", "Pts", "PPP", "FG", "FG%", "3P", "3P%", "OReb", "OReb%", "TO", "TO%",
    ];
    let mut constraints = vec![
        Constraint::Length(lineup_w as u16),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(6),
    ];
    if show_ft {
        headers.extend_from_slice(&["FT", "FT%"]);
        constraints.extend_from_slice(&[Constraint::Length(7), Constraint::Length(6)]);
    }
    headers.push("+/-");
    constraints.push(Constraint::Length(5));

    let header = Row::new(headers).style(Style::default().add_modifier(Modifier::BOLD));

    let table_rows: Vec<Row> = visible
        .iter()
        .map(|r| {
            let t = &r.aggregate.totals;
            let m = &r.metrics;
            let mut cells = vec![
                Cell::from(view::truncate_with_ellipsis(&r.lineup_label(), lineup_w)),
                Cell::from(m.possessions.to_string()),
                Cell::from(t.points.to_string()),
                rate_cell(m.ppp, 3, &th.ppp, false),
                Cell::from(view::format_made_attempted(t.fg_made, t.fg_attempted)),
                rate_cell(m.fg_pct, 1, &th.fg_pct, false),
                Cell::from(view::format_made_attempted(t.three_made, t.three_attempted)),
                rate_cell(m.three_pct, 1, &th.three_pct, false),
                Cell::from(r.aggregate.off_rebounds().to_string()),
                rate_cell(m.off_reb_pct, 1, &th.off_reb_pct, false),
                Cell::from(t.turnovers.to_string()),
                rate_cell(m.turnover_pct, 1, &th.turnover_pct, true),
            ];
            if show_ft {
                cells.push(Cell::from(view::format_made_attempted(t.ft_made, t.ft_attempted)));
                cells.push(rate_cell(m.ft_pct, 1, &th.ft_pct, false));
            }
            cells.push(
                Cell::from(view::format_plus_minus(r.plus_minus))
                    .style(Style::default().fg(plus_minus_color(r.plus_minus))),
            );
            Row::new(cells)
        })
        .collect();

    let (table_rows, title) = window(table_rows, state, area, title);
    let table = Table::new(table_rows, constraints)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}

fn draw_plus_minus(f: &mut Frame, state: &AppState, area: Rect) {
    let title = " Plus/Minus ";
    let ranked = view::ranked_differentials(&state.report.differentials);
    if ranked.is_empty() {
        let hint = "Lineups need both offensive and defensive rows".to_string();
        empty_panel(f, title, "No lineups on both ends", hint, area);
        return;
    }

    let lineup_w = (area.width.saturating_sub(2) as usize)
        .saturating_sub(8 + 8 + 6)
        .max(8);
    let header = Row::new(vec!["Lineup", "Off Pts", "Def Pts", "+/-"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = ranked
        .iter()
        .map(|d| {
            let label = d
                .lineup
                .as_ref()
                .map(|k| k.to_string())
                .unwrap_or_else(|| "\u{2014}".to_string());
            let pm = Some(d.plus_minus);
            Row::new(vec![
                Cell::from(view::truncate_with_ellipsis(&label, lineup_w)),
                Cell::from(d.offense_points.to_string()),
                Cell::from(d.defense_points.to_string()),
                Cell::from(view::format_plus_minus(pm))
                    .style(Style::default().fg(plus_minus_color(pm))),
            ])
        })
        .collect();

    let (rows, title) = window(rows, state, area, title);
    let table = Table::new(
        rows,
        [
            Constraint::Length(lineup_w as u16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}

fn draw_games(f: &mut Frame, state: &AppState, area: Rect) {
    if state.games.is_empty() {
        empty_panel(
            f,
            " Games ",
            "No game files loaded",
            "Check data.folder in config.toml".to_string(),
            area,
        );
        return;
    }

    let visible_lines = area.height.saturating_sub(2) as usize;
    let offset = state
        .game_cursor
        .saturating_sub(visible_lines.saturating_sub(1));

    let lines: Vec<Line> = state
        .games
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_lines)
        .map(|(i, g)| {
            let mark = if g.selected { "[x]" } else { "[ ]" };
            let style = if i == state.game_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if g.selected {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(
                format!(" {} {}  ({} events)", mark, g.id, g.events),
                style,
            ))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Games [{}/{} selected] ", state.selected_games(), state.games.len()))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let visible_lines = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible_lines)
        .rev()
        .map(|entry| {
            let color = match entry.level.as_str() {
                "WARN" => Color::Yellow,
                "ERROR" => Color::Red,
                _ => Color::DarkGray,
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<5} ", entry.level), Style::default().fg(color)),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();
    let block = Block::default().title(" Log ").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let keys = if state.tab == Tab::Games {
        " [q]uit  [Tab] view  [\u{2191}\u{2193}] move  [space] toggle  [A]ll games"
    } else {
        " [q]uit  [Tab] view  [\u{2191}\u{2193}] scroll  [a]ction  [t]ransition  [c]lear  [+/-] min poss"
    };
    let para = Paragraph::new(Line::from(Span::styled(
        keys,
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(para, area);
}
