use super::Frame;
use crate::state::{Field, LandmarkForm, LandmarkFormMode, RouteParams, State};
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the add or edit landmark form according to state.
///
pub fn landmark_form(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let form = match state.landmark_form() {
        Some(form) => form,
        None => {
            let empty = Paragraph::new("No landmark selected.")
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, size);
            return;
        }
    };
    let title = match form.mode {
        LandmarkFormMode::Add => "Add Landmark".to_string(),
        LandmarkFormMode::Edit { info_id } => match state.route_params() {
            Some(RouteParams::Landmark(landmark)) => format!("Edit Landmark: {}", landmark.name),
            None => format!("Edit Landmark #{}", info_id),
        },
    };

    let focused = form.focused_field();
    let mut lines = vec![];
    for field in form.fields() {
        lines.extend(field_lines(
            *field,
            display_value(form, *field),
            focused == Some(*field),
            form.visible_error(*field),
            theme,
        ));
    }
    lines.push(Line::from(Span::styled(
        "Tab/Shift+Tab: move  Left/Right: choose  Enter: save  Esc: cancel",
        styling::muted_text_style(theme),
    )));

    let block = Block::default()
        .title(Span::styled(title, styling::active_block_title_style(theme)))
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        size,
    );
}

fn display_value(form: &LandmarkForm, field: Field) -> String {
    match field {
        Field::Name => form.name.to_owned(),
        Field::LandmarkType => form.type_name.to_owned().unwrap_or_default(),
        Field::Address => form.address.to_owned(),
        Field::TotalRooms => form.total_rooms.to_owned(),
        Field::AttractionCode => form.attraction_code.to_owned(),
        Field::ContactName => form.contact_name.to_owned(),
        Field::ContactKind => form.contact_kind.map(|k| k.to_string()).unwrap_or_default(),
        Field::ContactValue => form.contact_value.to_owned(),
        _ => String::new(),
    }
}

/// Return the label, value and error rows of one form field.
///
pub(super) fn field_lines(
    field: Field,
    value: String,
    focused: bool,
    error: Option<&'static str>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let label_style = if focused {
        styling::active_block_title_style(theme)
    } else {
        styling::normal_text_style(theme)
    };
    let value = match (field.is_choice(), value.is_empty(), focused) {
        (true, true, _) => "< Select >".to_string(),
        (true, false, _) => format!("< {} >", value),
        (false, _, true) => format!("{}_", value),
        (false, _, false) => value,
    };
    let mut line = vec![
        Span::styled(format!("{:<22}", field.label()), label_style),
        Span::styled(value, styling::normal_text_style(theme)),
    ];
    if let Some(error) = error {
        line.push(Span::styled(format!("  {}", error), styling::error_text_style(theme)));
    }
    vec![Line::from(line), Line::from("")]
}
