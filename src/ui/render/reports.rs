use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

const HEADERS: [&str; 9] = [
    "Landmark", "Visits", "Local M", "Local F", "Prov. M", "Prov. F", "Foreign M", "Foreign F", "Total",
];

/// Render the per-landmark tally of this session's visits.
///
pub fn reports(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .title(Span::styled("Reports", styling::active_block_title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));

    let tallies = state.visit_tallies();
    if tallies.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No visits recorded this session.",
            styling::muted_text_style(theme),
        ))
        .block(block);
        frame.render_widget(empty, size);
        return;
    }

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(styling::active_block_title_style(theme))
        .bottom_margin(1);
    let mut rows: Vec<Row> = tallies
        .iter()
        .map(|t| {
            Row::new(vec![
                t.landmark_name.to_owned(),
                t.visits.to_string(),
                t.local_male.to_string(),
                t.local_female.to_string(),
                t.province_male.to_string(),
                t.province_female.to_string(),
                t.foreign_male.to_string(),
                t.foreign_female.to_string(),
                t.total().to_string(),
            ])
            .style(styling::normal_text_style(theme))
        })
        .collect();
    let grand_total = tallies.iter().fold(0u32, |sum, t| sum.saturating_add(t.total()));
    rows.push(
        Row::new(vec![
            "All landmarks".to_string(),
            tallies.iter().map(|t| t.visits).sum::<usize>().to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            grand_total.to_string(),
        ])
        .style(styling::banner_style(theme))
        .top_margin(1),
    );

    let mut widths = vec![Constraint::Percentage(28)];
    widths.extend([Constraint::Percentage(9); 8]);
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, size);
}
