use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the banner with the app name, the session and the request spinner.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mut title = vec![
        Span::styled(state.app_name().to_owned(), styling::banner_style(theme)),
        Span::styled(format!("  {}", state.city()), styling::muted_text_style(theme)),
    ];
    if state.is_offline() {
        title.push(Span::styled("  [offline]", styling::error_text_style(theme)));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), chunks[0]);

    let mut status = vec![];
    if state.is_loading() {
        status.push(Span::styled(
            format!("{} ", spinner::frame(state)),
            styling::active_block_title_style(theme),
        ));
    }
    if let Some(session) = state.session() {
        status.push(Span::styled(
            format!("{} ({})", session.display_name, session.role.as_str()),
            styling::normal_text_style(theme),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Right),
        chunks[1],
    );
}
