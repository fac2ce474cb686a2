use promdash::dashboard::{format_value, Panel, PanelView, Row as PanelRow};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, chart_area: Rect, table_area: Rect, panel: &Panel, rows: &[PanelRow]) {
    if rows.is_empty() {
        draw_empty(f, chart_area, &panel.title);
    } else {
        match &panel.view {
            PanelView::GroupBy { .. } => draw_bar_chart(f, chart_area, panel, rows),
            PanelView::Scalar => draw_scalar(f, chart_area, panel, rows),
        }
    }
    draw_table(f, table_area, panel, rows);
}

pub fn draw_empty(f: &mut Frame, area: Rect, title: &str) {
    let p = Paragraph::new("no data")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(p, area);
}

fn draw_table(f: &mut Frame, area: Rect, panel: &Panel, rows: &[PanelRow]) {
    let header = match &panel.view {
        PanelView::GroupBy { label, .. } => label.clone(),
        PanelView::Scalar => "Series".to_string(),
    };
    let title = format!("{} ({})", panel.metric, rows.len());

    let table_rows = rows
        .iter()
        .map(|row| Row::new(vec![row.key.clone(), format_value(row.value)]));

    let t = Table::new(
        table_rows,
        &[Constraint::Percentage(70), Constraint::Percentage(30)],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .header(
        Row::new(vec![header, "Value".to_string()])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(t, area);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_bar_chart(f: &mut Frame, area: Rect, panel: &Panel, rows: &[PanelRow]) {
    // bars only take whole, non-negative numbers
    let data: Vec<(&str, u64)> = rows
        .iter()
        .map(|row| {
            let value = if row.value.is_finite() && row.value > 0.0 {
                row.value.round() as u64
            } else {
                0
            };
            (row.key.as_str(), value)
        })
        .collect();
    let bar_width = (area.width / (data.len() as u16 + 1)).max(1);
    let t = BarChart::default()
        .block(Block::default().title(panel.title.clone()).borders(Borders::ALL))
        .data(&data)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightGreen))
        .value_style(Style::default().fg(Color::Black).bg(Color::LightGreen));
    f.render_widget(t, area);
}

fn draw_scalar(f: &mut Frame, area: Rect, panel: &Panel, rows: &[PanelRow]) {
    let text = rows
        .iter()
        .map(|row| format_value(row.value))
        .collect::<Vec<_>>()
        .join("  ");
    let p = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(panel.title.clone()));
    f.render_widget(p, area);
}
