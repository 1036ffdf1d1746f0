use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the dashboard with the session summary.
///
pub fn dashboard(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(size);

    let name = state
        .session()
        .map(|s| s.display_name.to_owned())
        .unwrap_or_default();
    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome, {}", name),
            styling::banner_style(theme),
        )),
        Line::from(Span::styled(
            format!("{} Integrated Tourism Monitoring", state.city()),
            styling::muted_text_style(theme),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(styling::normal_block_border_style(theme)));
    frame.render_widget(welcome, chunks[0]);

    let visits = state.visits();
    let visitors = state.visitor_total();
    let stat = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<22}", label), styling::normal_text_style(theme)),
            Span::styled(value, styling::active_block_title_style(theme)),
        ])
    };
    let mut lines = vec![
        stat("Landmarks", state.landmarks().len().to_string()),
        stat("Landmark types", state.landmark_types().len().to_string()),
        stat("Visits recorded", visits.len().to_string()),
        stat("Visitors recorded", visitors.to_string()),
        Line::from(""),
    ];
    if let Some(last) = visits.last() {
        lines.push(Line::from(Span::styled(
            format!(
                "Last visit: {} ({}, {} visitors)",
                last.landmark_name,
                last.allocation.label(),
                last.counts.total()
            ),
            styling::muted_text_style(theme),
        )));
    }
    lines.push(Line::from(Span::styled(
        "t: record a tourist visit",
        styling::muted_text_style(theme),
    )));

    let summary = Paragraph::new(lines).block(
        Block::default()
            .title("Session Summary")
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(summary, chunks[1]);
}
