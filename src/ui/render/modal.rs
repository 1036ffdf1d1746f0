use super::{centered_rect, Frame};
use crate::state::{AlertKind, State, DELETE_CONFIRMATION_MESSAGE};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the blocking alert on top of everything.
///
pub fn alert(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let alert = match state.alert() {
        Some(alert) => alert,
        None => return,
    };
    let color = match alert.kind {
        AlertKind::Info => theme.info,
        AlertKind::Success => theme.success,
        AlertKind::Error => theme.error,
    }
    .to_color();

    let mut text: Vec<Line> = vec![Line::from("")];
    text.extend(alert.message.lines().map(|line| {
        Line::from(Span::styled(line.to_owned(), styling::normal_text_style(theme)))
    }));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("Enter: OK", styling::muted_text_style(theme))));

    popup(frame, size, &alert.title, text, Style::default().fg(color));
}

/// Render the delete confirmation dialog.
///
pub fn delete_confirmation(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let name = state
        .delete_confirmation()
        .and_then(|id| state.landmark(id).ok())
        .map(|l| l.name.to_owned())
        .unwrap_or_else(|| "this landmark".to_string());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete \"{}\"?", name),
            styling::normal_text_style(theme).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            DELETE_CONFIRMATION_MESSAGE,
            Style::default().fg(theme.warning.to_color()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y/Enter: delete, n/Esc: cancel",
            styling::muted_text_style(theme),
        )),
    ];
    popup(
        frame,
        size,
        "Confirm Delete",
        text,
        Style::default().fg(theme.error.to_color()),
    );
}

fn popup(frame: &mut Frame, size: Rect, title: &str, text: Vec<Line>, accent: Style) {
    let area = centered_rect(60, 30, size);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    title.to_owned(),
                    accent.add_modifier(Modifier::BOLD),
                ))
                .border_style(accent.add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
