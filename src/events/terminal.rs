use crate::state::{Route, Screen, State, NAV_BAR};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

/// Apply one key press to the state. Returns false when the user asked to
/// quit.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    // Blocking overlays take every key.
    if state.alert().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.dismiss_alert();
        }
        return true;
    }
    if state.delete_confirmation().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                state.confirm_delete_landmark();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                state.cancel_delete_confirmation();
            }
            _ => {}
        }
        return true;
    }
    if let KeyEvent {
        code: KeyCode::Char('l'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        state.toggle_log();
        return true;
    }

    match state.current_screen() {
        Screen::Login => handle_login(state, key),
        Screen::AddLandmark | Screen::EditLandmark => handle_landmark_form(state, key),
        Screen::TouristForm => handle_tourist_form(state, key),
        Screen::Landmarks if state.is_search_mode() => handle_search(state, key),
        screen => return handle_browse(state, screen, key),
    }
    true
}

/// Return the typed character, if the key is plain or shifted text.
///
fn typed(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT => {
            Some(c)
        }
        _ => None,
    }
}

fn is_consent_toggle(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('p') && key.modifiers == KeyModifiers::CONTROL
}

fn handle_login(state: &mut State, key: KeyEvent) {
    if is_consent_toggle(&key) {
        state.login_form_mut().toggle_consent();
        return;
    }
    if let Some(c) = typed(&key) {
        state.login_form_mut().input(c);
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.login_form_mut().toggle_focus();
        }
        KeyCode::Backspace => state.login_form_mut().backspace(),
        KeyCode::Enter => {
            state.submit_login();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", key),
    }
}

fn handle_landmark_form(state: &mut State, key: KeyEvent) {
    if let Some(c) = typed(&key) {
        if let Some(form) = state.landmark_form_mut() {
            form.input(c);
        }
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = state.landmark_form_mut() {
                form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = state.landmark_form_mut() {
                form.focus_previous();
            }
        }
        KeyCode::Right => {
            state.cycle_landmark_choice(true);
        }
        KeyCode::Left => {
            state.cycle_landmark_choice(false);
        }
        KeyCode::Backspace => {
            if let Some(form) = state.landmark_form_mut() {
                form.backspace();
            }
        }
        KeyCode::Enter => {
            if let Err(e) = state.submit_landmark_form() {
                warn!("Could not submit landmark form: {}", e);
            }
        }
        KeyCode::Esc => {
            state.navigate(Route::Landmarks, None);
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", key),
    }
}

fn handle_tourist_form(state: &mut State, key: KeyEvent) {
    if is_consent_toggle(&key) {
        state.tourist_form_mut().toggle_consent();
        return;
    }
    if let Some(c) = typed(&key) {
        state.tourist_form_mut().input(c);
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => state.tourist_form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => state.tourist_form_mut().focus_previous(),
        KeyCode::Right => {
            state.cycle_tourist_choice(true);
        }
        KeyCode::Left => {
            state.cycle_tourist_choice(false);
        }
        KeyCode::Backspace => state.tourist_form_mut().backspace(),
        KeyCode::Enter => {
            state.submit_tourist_form();
        }
        KeyCode::Esc => {
            state.go_back();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", key),
    }
}

fn handle_search(state: &mut State, key: KeyEvent) {
    if let Some(c) = typed(&key) {
        debug!("Processing search character '{}' event '{:?}'...", c, key);
        state.add_search_char(c);
        return;
    }
    match key.code {
        KeyCode::Backspace => {
            state.remove_search_char();
        }
        KeyCode::Enter | KeyCode::Down | KeyCode::Up => {
            state.exit_search_mode();
        }
        KeyCode::Esc => {
            state.clear_search();
        }
        _ => {}
    }
}

/// Keys for the screens without text input.
///
fn handle_browse(state: &mut State, screen: Screen, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            state.navigate(NAV_BAR[index].0.clone(), None);
            return true;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let current = NAV_BAR
                .iter()
                .position(|(route, _)| route == state.current_route())
                .unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (current + 1) % NAV_BAR.len()
            } else {
                (current + NAV_BAR.len() - 1) % NAV_BAR.len()
            };
            state.navigate(NAV_BAR[next].0.clone(), None);
            return true;
        }
        KeyCode::Char('o') => {
            info!("Signing out...");
            state.logout();
            return true;
        }
        _ => {}
    }

    match (screen, key.code) {
        (Screen::Dashboard, KeyCode::Char('t')) | (Screen::QrCode, KeyCode::Char('t')) => {
            state.navigate(Route::TouristForm, None);
        }
        (Screen::QrCode, KeyCode::Char('y')) => copy_qr_url(state),
        (Screen::Landmarks, KeyCode::Char('j')) | (Screen::Landmarks, KeyCode::Down) => {
            state.next_landmark();
        }
        (Screen::Landmarks, KeyCode::Char('k')) | (Screen::Landmarks, KeyCode::Up) => {
            state.previous_landmark();
        }
        (Screen::Landmarks, KeyCode::Char('/')) => {
            state.enter_search_mode();
        }
        (Screen::Landmarks, KeyCode::Char('f')) => {
            state.cycle_type_filter();
        }
        (Screen::Landmarks, KeyCode::Char('F')) => {
            state.clear_type_filter();
        }
        (Screen::Landmarks, KeyCode::Char('a')) => {
            state.navigate(Route::AddLandmark, None);
        }
        (Screen::Landmarks, KeyCode::Char('e')) | (Screen::Landmarks, KeyCode::Enter) => {
            state.edit_selected_landmark();
        }
        (Screen::Landmarks, KeyCode::Char('d')) => {
            state.delete_selected_landmark();
        }
        (Screen::Landmarks, KeyCode::Char('r')) => {
            state.refresh_landmarks();
        }
        (Screen::Landmarks, KeyCode::Esc) if !state.search_query().is_empty() => {
            state.clear_search();
        }
        (_, KeyCode::Esc) => {
            state.go_back();
        }
        _ => debug!("Skipping processing of terminal event '{:?}'...", key),
    }
    true
}

/// Put the tourist form URL on the system clipboard.
///
fn copy_qr_url(state: &mut State) {
    let url = state.qr_code_url().to_owned();
    match ClipboardContext::new() {
        Ok(mut ctx) => match ctx.set_contents(url) {
            Ok(_) => info!("Tourist form URL copied to clipboard"),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        },
        Err(e) => warn!("Failed to initialize clipboard: {}", e),
    }
}
