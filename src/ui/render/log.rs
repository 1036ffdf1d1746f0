use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .title("Log (Ctrl+L to hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let rows = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .log_entries(rows)
        .into_iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![Span::styled(
                entry,
                styling::normal_text_style(theme),
            )]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);
    frame.render_widget(list, size);
}
