use super::Frame;
use crate::api::Landmark;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "Landmarks";

/// Render the searchable landmark list and the selected landmark's card.
///
pub fn landmarks(frame: &mut Frame, size: Rect, state: &mut State, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(size);

    let mut title = BLOCK_TITLE.to_string();
    if state.is_search_mode() || !state.search_query().is_empty() {
        title.push_str(&format!(" /{}", state.search_query()));
    }
    if let Some(filter) = state.type_filter() {
        title.push_str(&format!(" [{}]", filter.type_name));
    }
    let block = Block::default()
        .title(Span::styled(title, styling::active_block_title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));

    if state.landmarks().is_empty() && state.is_loading() {
        frame.render_widget(spinner::widget(state, theme, chunks[0].height).block(block), chunks[0]);
        return;
    }

    let filtered = state.filtered_landmarks();
    let items: Vec<ListItem> = if filtered.is_empty() {
        let message = if state.landmarks().is_empty() {
            "No landmarks yet"
        } else {
            "No results found"
        };
        vec![ListItem::new(Span::styled(message, styling::muted_text_style(theme)))]
    } else {
        filtered
            .iter()
            .map(|l| {
                ListItem::new(Line::from(vec![
                    Span::raw(l.name.to_owned()),
                    Span::styled(
                        format!("  {}", state.type_name(l.landmark_type)),
                        styling::muted_text_style(theme),
                    ),
                ]))
            })
            .collect()
    };
    let card = state
        .selected_landmark()
        .map(|l| card_lines(l, state.type_name(l.landmark_type), theme));

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::active_list_item_style(theme))
        .block(block);
    frame.render_stateful_widget(list, chunks[0], state.get_landmarks_list_state());

    let details = Paragraph::new(card.unwrap_or_default())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(details, chunks[1]);
}

fn card_lines(landmark: &Landmark, type_name: &str, theme: &Theme) -> Vec<Line<'static>> {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<17}", label), styling::muted_text_style(theme)),
            Span::styled(value, styling::normal_text_style(theme)),
        ])
    };
    let mut lines = vec![
        Line::from(Span::styled(landmark.name.to_owned(), styling::banner_style(theme))),
        Line::from(""),
        row("Type", type_name.to_owned()),
        row("Address", landmark.address.to_owned()),
    ];
    if let Some(rooms) = landmark.total_rooms {
        lines.push(row("Total rooms", rooms.to_string()));
    }
    if let Some(code) = landmark.attraction_code.as_ref().filter(|c| !c.is_empty()) {
        lines.push(row("Attraction code", code.to_owned()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Contacts",
        styling::active_block_title_style(theme),
    )));
    if landmark.contacts.is_empty() {
        lines.push(Line::from(Span::styled("None", styling::muted_text_style(theme))));
    }
    for contact in &landmark.contacts {
        lines.push(Line::from(Span::styled(
            contact.label(),
            styling::normal_text_style(theme),
        )));
    }
    lines
}
