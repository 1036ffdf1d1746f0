mod all;
mod dashboard;
mod footer;
mod header;
mod landmark_form;
mod landmarks;
mod log;
mod login;
mod modal;
mod qrcode;
mod reports;
mod tourist_form;

use self::log::log;
use super::*;
use dashboard::dashboard;
use footer::footer;
use header::header;
use landmark_form::landmark_form;
use landmarks::landmarks;
use login::login;
use modal::{alert, delete_confirmation};
use qrcode::qrcode;
use reports::reports;
use tourist_form::tourist_form;

pub use all::all as render;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Return a rectangle centered in `r`, sized by percentage.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
