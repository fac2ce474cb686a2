use promdash::dashboard::format_value;
use promdash::prom::Snapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::App;

mod panel;

pub fn draw(f: &mut Frame, app: &App, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(f.size());
    draw_status(f, chunks[0], app, snapshot);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(chunks[1]);
    draw_panel_list(f, body[0], app, snapshot);

    let detail = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body[1]);
    match app.selected_panel() {
        Some(selected) => {
            let rows = app.selected_rows(snapshot);
            panel::draw(f, detail[0], detail[1], selected, &rows);
        }
        None => panel::draw_empty(f, body[1], "No panel selected"),
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let updated = snapshot
        .last_success
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let mut spans = vec![
        Span::styled(app.endpoint, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "  every {}s  updated {}  families {}  ",
            app.scrape_interval,
            updated,
            snapshot.families.len()
        )),
    ];
    if let Some(err) = &snapshot.last_error {
        spans.push(Span::styled(err.clone(), Style::default().fg(Color::Red)));
    }
    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("promdash (q quit, r refresh, ↑/↓ select)"),
    );
    f.render_widget(status, area);
}

fn draw_panel_list(f: &mut Frame, area: Rect, app: &App, snapshot: &Snapshot) {
    let items: Vec<ListItem> = app
        .dashboard
        .panels
        .iter()
        .map(|panel| {
            let rows = panel.evaluate(&snapshot.families, &app.dashboard.names);
            let summary = match rows.as_slice() {
                [] => "-".to_string(),
                [single] => format_value(single.value),
                many => format!("{} rows", many.len()),
            };
            ListItem::new(format!("{:<24} {summary}", panel.title))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Panels"))
        .highlight_style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = app.panel_list_state.clone();
    f.render_stateful_widget(list, area, &mut state);
}
