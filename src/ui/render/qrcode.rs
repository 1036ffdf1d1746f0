use super::{centered_rect, Frame};
use crate::state::State;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the tourist form link for visitors to scan or open.
///
pub fn qrcode(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let area = centered_rect(70, 60, size);
    let lines = vec![
        Line::from(Span::styled(
            "Scan or open this link to fill in the tourist form",
            styling::normal_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            state.qr_code_url().to_owned(),
            styling::banner_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: copy link  t: open the tourist form here",
            styling::muted_text_style(theme),
        )),
    ];
    let block = Block::default()
        .title(Span::styled("QR Code", styling::active_block_title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
