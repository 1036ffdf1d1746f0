use super::landmark_form::field_lines;
use super::Frame;
use crate::state::{Field, State, TouristForm};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "Tourist Form";

/// Render the tourist visit form according to state.
///
pub fn tourist_form(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let form = state.tourist_form();
    let focused = form.focused_field();

    let mut lines = vec![];
    for field in form.fields() {
        lines.extend(field_lines(
            field,
            display_value(form, field),
            focused == Some(field),
            form.visible_error(field),
            theme,
        ));
    }
    let checkbox = if form.consent { "[x]" } else { "[ ]" };
    lines.push(Line::from(Span::styled(
        format!(
            "{} I consent to the {} tourism office recording this visit (Ctrl+P)",
            checkbox,
            state.city()
        ),
        styling::normal_text_style(theme),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab/Shift+Tab: move  Left/Right: choose  Enter: submit  Esc: back",
        styling::muted_text_style(theme),
    )));

    let block = Block::default()
        .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        size,
    );
}

fn display_value(form: &TouristForm, field: Field) -> String {
    match field {
        Field::Allocation => form.allocation.map(|a| a.label().to_owned()).unwrap_or_default(),
        Field::Nationality => form.nationality.to_owned(),
        Field::Male => form.male.to_owned(),
        Field::Female => form.female.to_owned(),
        Field::ForeignMale => form.foreign_male.to_owned(),
        Field::ForeignFemale => form.foreign_female.to_owned(),
        Field::VisitedLandmark => form.landmark_name.to_owned(),
        Field::StayDuration => form.stay_duration.to_owned(),
        _ => String::new(),
    }
}
