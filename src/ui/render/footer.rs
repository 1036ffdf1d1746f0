use super::Frame;
use crate::state::{Screen, State, NAV_BAR};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the navigation bar and the key hints for the current screen.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styling::normal_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let screen = state.current_screen();
    if screen != Screen::Login {
        let mut tabs = vec![];
        for (index, (route, label)) in NAV_BAR.iter().enumerate() {
            let style = if route == state.current_route() {
                styling::active_list_item_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            tabs.push(Span::styled(format!(" {} {} ", index + 1, label), style));
            tabs.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(hints(state, screen), styling::muted_text_style(theme))),
        chunks[1],
    );
}

/// Return the key hints for the screen.
///
fn hints(state: &State, screen: Screen) -> &'static str {
    if state.alert().is_some() {
        return "Enter/Esc: dismiss";
    }
    if state.delete_confirmation().is_some() {
        return "y/Enter: delete  n/Esc: cancel";
    }
    match screen {
        Screen::Login => "Tab: switch field  Ctrl+P: privacy consent  Enter: sign in  Ctrl+C: quit",
        Screen::Landmarks if state.is_search_mode() => "Type to search  Enter: done  Esc: clear",
        Screen::Landmarks => {
            "j/k: move  /: search  f/F: type filter  a: add  e: edit  d: delete  r: refresh  o: sign out  q: quit"
        }
        Screen::AddLandmark | Screen::EditLandmark | Screen::TouristForm => "Ctrl+L: log  Ctrl+C: quit",
        Screen::QrCode => "y: copy link  t: tourist form  Tab: next tab  o: sign out  q: quit",
        Screen::Dashboard | Screen::Reports => {
            "1-4/Tab: switch tab  t: tourist form  Ctrl+L: log  o: sign out  q: quit"
        }
    }
}
