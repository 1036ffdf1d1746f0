use super::*;
use crate::state::{Screen, State};
use ratatui::layout::{Constraint, Direction, Layout};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const LOG_HEIGHT: u16 = 8;

/// Render the whole frame according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let theme = Theme::default();
    let size = frame.size();

    let mut constraints = vec![
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(5),
    ];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(FOOTER_HEIGHT));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    header(frame, chunks[0], state, &theme);
    let body = chunks[1];
    match state.current_screen() {
        Screen::Login => login(frame, body, state, &theme),
        Screen::Dashboard => dashboard(frame, body, state, &theme),
        Screen::Landmarks => landmarks(frame, body, state, &theme),
        Screen::QrCode => qrcode(frame, body, state, &theme),
        Screen::TouristForm => tourist_form(frame, body, state, &theme),
        Screen::AddLandmark | Screen::EditLandmark => landmark_form(frame, body, state, &theme),
        Screen::Reports => reports(frame, body, state, &theme),
    }
    if state.is_log_visible() {
        log(frame, chunks[2], state, &theme);
    }
    footer(frame, chunks[chunks.len() - 1], state, &theme);

    // Overlays last so they sit on top.
    if state.delete_confirmation().is_some() {
        delete_confirmation(frame, size, state, &theme);
    }
    if state.alert().is_some() {
        alert(frame, size, state, &theme);
    }
}
