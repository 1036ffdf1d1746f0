use super::{centered_rect, Frame};
use crate::state::{LoginField, State};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "Sign In";
const CONSENT_TEXT: &str =
    "I agree to the collection and processing of my personal data under the Data Privacy Act of 2012.";

/// Render the login form according to state.
///
pub fn login(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let area = centered_rect(60, 80, size);
    let form = state.login_form();

    let field = |label: &str, value: String, focused: bool| -> Vec<Line<'static>> {
        let style = if focused {
            styling::active_block_title_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        let cursor = if focused { "_" } else { "" };
        vec![
            Line::from(Span::styled(label.to_owned(), style)),
            Line::from(Span::styled(
                format!("> {}{}", value, cursor),
                styling::normal_text_style(theme),
            )),
            Line::from(""),
        ]
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Welcome to {}", state.app_name()),
            styling::banner_style(theme),
        )),
        Line::from(""),
    ];
    lines.extend(field(
        "Username",
        form.username.to_owned(),
        form.focus == LoginField::Username,
    ));
    lines.extend(field(
        "Password",
        "*".repeat(form.password.chars().count()),
        form.focus == LoginField::Password,
    ));
    let checkbox = if form.consent { "[x]" } else { "[ ]" };
    lines.push(Line::from(Span::styled(
        format!("{} {}", checkbox, CONSENT_TEXT),
        styling::normal_text_style(theme),
    )));
    lines.push(Line::from(""));
    let hint = if form.pending {
        "Signing in..."
    } else if form.consent {
        "Enter: sign in"
    } else {
        "Accept the privacy notice (Ctrl+P) to sign in"
    };
    lines.push(Line::from(Span::styled(hint, styling::muted_text_style(theme))));

    let block = Block::default()
        .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
