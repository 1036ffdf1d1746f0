use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Specify the spinner animation frames.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Return the current spinner frame.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[state.get_spinner_index() % FRAMES.len()]
}

/// Return a paragraph with the spinner vertically centered in `height` rows.
///
pub fn widget<'a>(state: &State, theme: &Theme, height: u16) -> Paragraph<'a> {
    let padding = height.saturating_sub(2) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        format!("{} Loading...", frame(state)),
        styling::active_block_title_style(theme),
    )));
    Paragraph::new(lines).alignment(Alignment::Center)
}
