use crate::api::{
    ApiError, Allocation, Contact, ContactKind, Landmark, LandmarkType, Session, TouristVisit,
};
use crate::app::NetworkEventSender;
use crate::auth::{self, AuthState, LoginOutcome};
use crate::config::Config;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::ui::SPINNER_FRAME_COUNT;
use log::*;
use ratatui::widgets::ListState;
use std::collections::HashMap;

use super::error::{AdminAction, StateError};
use super::form::{Field, LandmarkForm, LandmarkFormMode, LoginForm, TouristForm, NATIONALITIES};
use super::navigation::{dispatch, Navigator, Route, RouteParams, Screen};
use super::report::{tally_visits, VisitTally};

pub const NOT_AUTHORIZED_TITLE: &str = "Not Authorized";
pub const NO_CHANGES_MESSAGE: &str = "No changes have been made.";
pub const VALIDATION_MESSAGE: &str = "Please fill all required fields";
pub const LANDMARK_GONE_MESSAGE: &str = "This landmark no longer exists.";
pub const DELETE_CONFIRMATION_MESSAGE: &str =
    "Are you sure you want to delete this landmark? This action cannot be undone.";

/// Severity of a blocking alert.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AlertKind {
    Info,
    Success,
    Error,
}

/// Blocking alert shown over the current screen until dismissed.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn new(kind: AlertKind, title: &str, message: &str) -> Self {
        Alert {
            title: title.to_owned(),
            message: message.to_owned(),
            kind,
        }
    }
}

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    app_name: String,
    city: String,
    qr_code_url: String,
    offline: bool,
    auth: AuthState,
    navigator: Navigator,
    initial_route: Option<Route>,
    login_form: LoginForm,
    landmark_types: Vec<LandmarkType>,
    landmarks: Vec<Landmark>,
    landmarks_list_state: ListState,
    search_query: String,
    search_mode: bool,
    type_filter: Option<i64>,
    landmark_form: Option<LandmarkForm>,
    tourist_form: TouristForm,
    visits: Vec<TouristVisit>,
    alert: Option<Alert>,
    delete_confirmation: Option<i64>,
    loading: bool,
    spinner_index: usize,
    log_buffer: Option<LogBuffer>,
    show_log: bool,
}

impl Default for State {
    fn default() -> Self {
        State {
            net_sender: None,
            app_name: "SIGHT-Lipa".to_string(),
            city: "Lipa City".to_string(),
            qr_code_url: String::new(),
            offline: false,
            auth: AuthState::default(),
            navigator: Navigator::default(),
            initial_route: None,
            login_form: LoginForm::default(),
            landmark_types: vec![],
            landmarks: vec![],
            landmarks_list_state: ListState::default(),
            search_query: String::new(),
            search_mode: false,
            type_filter: None,
            landmark_form: None,
            tourist_form: TouristForm::new(),
            visits: vec![],
            alert: None,
            delete_confirmation: None,
            loading: false,
            spinner_index: 0,
            log_buffer: None,
            show_log: false,
        }
    }
}

impl State {
    pub fn new(
        net_sender: NetworkEventSender,
        config: &Config,
        initial_route: Option<Route>,
        log_buffer: Option<LogBuffer>,
    ) -> Self {
        State {
            net_sender: Some(net_sender),
            app_name: config.app_name.to_owned(),
            city: config.city.to_owned(),
            qr_code_url: config.qr_code_url.to_owned(),
            offline: config.data_source == crate::config::DataSource::Memory,
            initial_route,
            log_buffer,
            ..State::default()
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn qr_code_url(&self) -> &str {
        &self.qr_code_url
    }

    /// Whether landmark data lives in memory for this run.
    ///
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
        self
    }

    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Whether a request is in flight.
    ///
    pub fn is_loading(&self) -> bool {
        self.loading || self.login_form.pending
    }

    // Session

    pub fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.auth.is_admin()
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login_form
    }

    /// Check the login form and hand the credentials to the network thread.
    /// Does nothing until the privacy consent is given.
    ///
    pub fn submit_login(&mut self) -> &mut Self {
        if self.login_form.pending {
            return self;
        }
        if !self.login_form.consent {
            debug!("Login requires privacy consent");
            return self;
        }
        if let Err(message) =
            auth::check_credentials_present(&self.login_form.username, &self.login_form.password)
        {
            self.show_alert(Alert::new(AlertKind::Error, "Error", message));
            return self;
        }
        self.login_form.pending = true;
        self.dispatch(NetworkEvent::Login {
            username: self.login_form.username.trim().to_owned(),
            password: self.login_form.password.to_owned(),
        });
        self
    }

    /// Apply the result of a login attempt.
    ///
    pub fn apply_login(&mut self, outcome: LoginOutcome) -> &mut Self {
        self.login_form.pending = false;
        match self.auth.apply(outcome) {
            None => {
                self.login_form = LoginForm::default();
                let route = self.initial_route.take().unwrap_or(Route::Dashboard);
                self.navigator.set_route(Route::Dashboard, None);
                self.navigate(route, None);
                self.dispatch(NetworkEvent::LandmarkTypes);
                self.dispatch(NetworkEvent::Landmarks);
            }
            Some(_) => {
                self.login_form.password.clear();
                self.show_alert(Alert::new(
                    AlertKind::Error,
                    "Login Failed",
                    auth::LOGIN_FAILED_MESSAGE,
                ));
            }
        }
        self
    }

    /// End the session and return to the login screen.
    ///
    pub fn logout(&mut self) -> &mut Self {
        self.auth.logout();
        self.navigator.go_back();
        self.landmark_form = None;
        self.delete_confirmation = None;
        self
    }

    // Navigation

    /// Return the screen for the current session and route.
    ///
    pub fn current_screen(&self) -> Screen {
        dispatch(self.auth.session(), self.navigator.current_route())
    }

    pub fn current_route(&self) -> &Route {
        self.navigator.current_route()
    }

    pub fn route_params(&self) -> Option<&RouteParams> {
        self.navigator.route_params()
    }

    /// Return an error when the session may not perform the action.
    ///
    pub fn check_admin(&self, action: AdminAction) -> Result<(), StateError> {
        match self.auth.session() {
            None => Err(StateError::NotAuthenticated),
            Some(session) if session.is_admin() => Ok(()),
            Some(_) => Err(StateError::NotAuthorized { action }),
        }
    }

    fn alert_not_authorized(&mut self, action: AdminAction) {
        let error = StateError::NotAuthorized { action };
        warn!("{}", error);
        self.show_alert(Alert::new(
            AlertKind::Error,
            NOT_AUTHORIZED_TITLE,
            &error.to_string(),
        ));
    }

    /// Change route. Admin routes are refused for staff, leaving the route
    /// as it was.
    ///
    pub fn navigate(&mut self, route: Route, params: Option<RouteParams>) -> &mut Self {
        let action = match route {
            Route::AddLandmark => Some(AdminAction::Add),
            Route::EditLandmark => Some(AdminAction::Edit),
            _ => None,
        };
        if let Some(action) = action {
            if self.check_admin(action).is_err() {
                self.alert_not_authorized(action);
                return self;
            }
        }

        match (&route, &params) {
            (Route::AddLandmark, _) => self.landmark_form = Some(LandmarkForm::add()),
            (Route::EditLandmark, Some(RouteParams::Landmark(landmark))) => {
                let landmark_type = self.landmark_type(landmark.landmark_type).cloned();
                self.landmark_form = Some(LandmarkForm::edit(landmark, landmark_type.as_ref()));
                self.dispatch(NetworkEvent::LandmarkDetail {
                    info_id: landmark.info_id,
                });
            }
            (Route::EditLandmark, None) => {
                warn!("Edit route opened without a landmark");
                self.landmark_form = None;
            }
            _ => self.landmark_form = None,
        }
        self.navigator.set_route(route, params);
        self
    }

    /// Reset to the dashboard.
    ///
    pub fn go_back(&mut self) -> &mut Self {
        self.navigator.go_back();
        self.landmark_form = None;
        self.search_mode = false;
        self
    }

    // Landmarks

    pub fn landmark_types(&self) -> &[LandmarkType] {
        &self.landmark_types
    }

    pub fn landmark_type(&self, type_id: i64) -> Option<&LandmarkType> {
        self.landmark_types.iter().find(|t| t.type_id == type_id)
    }

    /// Return the type name of the landmark, or a placeholder.
    ///
    pub fn type_name(&self, type_id: i64) -> &str {
        self.landmark_type(type_id)
            .map(|t| t.type_name.as_str())
            .unwrap_or("Unknown")
    }

    pub fn set_landmark_types(&mut self, landmark_types: Vec<LandmarkType>) -> &mut Self {
        self.landmark_types = landmark_types;
        if let Some(form) = self.landmark_form.as_mut() {
            if let Some(landmark_type) = form
                .landmark_type
                .and_then(|id| self.landmark_types.iter().find(|t| t.type_id == id))
            {
                form.type_name = Some(landmark_type.type_name.to_owned());
            }
        }
        self
    }

    /// Set the landmark list, attaching each landmark's contacts.
    ///
    pub fn set_landmarks(&mut self, landmarks: Vec<Landmark>, contacts: Vec<Contact>) -> &mut Self {
        let mut by_landmark: HashMap<i64, Vec<Contact>> = HashMap::new();
        for contact in contacts {
            by_landmark.entry(contact.landmark_info).or_default().push(contact);
        }
        self.landmarks = landmarks
            .into_iter()
            .map(|mut landmark| {
                landmark.contacts = by_landmark.remove(&landmark.info_id).unwrap_or_default();
                landmark
            })
            .collect();
        self.loading = false;
        self.clamp_landmark_selection();
        self
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn landmark(&self, info_id: i64) -> Result<&Landmark, StateError> {
        self.landmarks
            .iter()
            .find(|l| l.info_id == info_id)
            .ok_or(StateError::LandmarkNotFound { info_id })
    }

    fn is_editing(&self, info_id: i64) -> bool {
        self.landmark_form
            .as_ref()
            .map_or(false, |form| form.mode == LandmarkFormMode::Edit { info_id })
    }

    /// Take a freshly fetched copy of the landmark being edited. Its contact
    /// becomes the form's original contact unless the user already changed
    /// it. Ignored once the form was closed.
    ///
    pub fn set_edit_detail(&mut self, landmark: Landmark) -> &mut Self {
        if !self.is_editing(landmark.info_id) {
            return self;
        }
        if let Some(form) = self.landmark_form.as_mut() {
            form.rebase_contact(landmark.contacts.first());
        }
        if let Some(listed) = self.landmarks.iter_mut().find(|l| l.info_id == landmark.info_id) {
            *listed = landmark.clone();
        }
        self.navigator
            .set_route(Route::EditLandmark, Some(RouteParams::Landmark(landmark)));
        self
    }

    /// Close the edit form of a landmark the backend no longer has.
    ///
    pub fn apply_edit_missing(&mut self, info_id: i64) -> &mut Self {
        if !self.is_editing(info_id) {
            return self;
        }
        warn!("{}", StateError::LandmarkNotFound { info_id });
        self.landmark_form = None;
        self.landmarks.retain(|l| l.info_id != info_id);
        self.clamp_landmark_selection();
        self.navigator.set_route(Route::Landmarks, None);
        self.show_alert(Alert::new(AlertKind::Error, "Error", LANDMARK_GONE_MESSAGE));
        self
    }

    /// Request a fresh landmark list.
    ///
    pub fn refresh_landmarks(&mut self) -> &mut Self {
        self.loading = true;
        self.dispatch(NetworkEvent::Landmarks);
        self
    }

    /// Return landmarks matching the search query (name or type name,
    /// case-insensitive) and the type filter.
    ///
    pub fn filtered_landmarks(&self) -> Vec<&Landmark> {
        let query = self.search_query.trim().to_lowercase();
        self.landmarks
            .iter()
            .filter(|l| self.type_filter.map_or(true, |id| l.landmark_type == id))
            .filter(|l| {
                query.is_empty()
                    || l.name.to_lowercase().contains(&query)
                    || self.type_name(l.landmark_type).to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn get_landmarks_list_state(&mut self) -> &mut ListState {
        &mut self.landmarks_list_state
    }

    fn clamp_landmark_selection(&mut self) {
        let count = self.filtered_landmarks().len();
        let selected = match self.landmarks_list_state.selected() {
            _ if count == 0 => None,
            Some(i) if i < count => Some(i),
            _ => Some(0),
        };
        self.landmarks_list_state.select(selected);
    }

    /// Activate the next landmark.
    ///
    pub fn next_landmark(&mut self) -> &mut Self {
        let count = self.filtered_landmarks().len();
        let next = match self.landmarks_list_state.selected() {
            _ if count == 0 => None,
            Some(i) => Some((i + 1) % count),
            None => Some(0),
        };
        self.landmarks_list_state.select(next);
        self
    }

    /// Activate the previous landmark.
    ///
    pub fn previous_landmark(&mut self) -> &mut Self {
        let count = self.filtered_landmarks().len();
        let previous = match self.landmarks_list_state.selected() {
            _ if count == 0 => None,
            Some(i) => Some((i + count - 1) % count),
            None => Some(count - 1),
        };
        self.landmarks_list_state.select(previous);
        self
    }

    pub fn selected_landmark(&self) -> Option<&Landmark> {
        let index = self.landmarks_list_state.selected()?;
        self.filtered_landmarks().get(index).copied()
    }

    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn enter_search_mode(&mut self) -> &mut Self {
        self.search_mode = true;
        self
    }

    pub fn exit_search_mode(&mut self) -> &mut Self {
        self.search_mode = false;
        self
    }

    pub fn clear_search(&mut self) -> &mut Self {
        self.search_query.clear();
        self.search_mode = false;
        self.clamp_landmark_selection();
        self
    }

    pub fn add_search_char(&mut self, c: char) -> &mut Self {
        self.search_query.push(c);
        self.clamp_landmark_selection();
        self
    }

    pub fn remove_search_char(&mut self) -> &mut Self {
        self.search_query.pop();
        self.clamp_landmark_selection();
        self
    }

    pub fn type_filter(&self) -> Option<&LandmarkType> {
        self.type_filter.and_then(|id| self.landmark_type(id))
    }

    /// Step the type filter through every type, then back to none.
    ///
    pub fn cycle_type_filter(&mut self) -> &mut Self {
        let position = self
            .type_filter
            .and_then(|id| self.landmark_types.iter().position(|t| t.type_id == id));
        self.type_filter = match position {
            None => self.landmark_types.first().map(|t| t.type_id),
            Some(i) => self.landmark_types.get(i + 1).map(|t| t.type_id),
        };
        self.clamp_landmark_selection();
        self
    }

    pub fn clear_type_filter(&mut self) -> &mut Self {
        self.type_filter = None;
        self.clamp_landmark_selection();
        self
    }

    /// Open the edit form for the selected landmark.
    ///
    pub fn edit_selected_landmark(&mut self) -> &mut Self {
        if let Some(landmark) = self.selected_landmark().cloned() {
            self.navigate(Route::EditLandmark, Some(RouteParams::Landmark(landmark)));
        }
        self
    }

    /// Ask for confirmation before deleting the selected landmark.
    ///
    pub fn delete_selected_landmark(&mut self) -> &mut Self {
        if self.check_admin(AdminAction::Delete).is_err() {
            self.alert_not_authorized(AdminAction::Delete);
            return self;
        }
        self.delete_confirmation = self.selected_landmark().map(|l| l.info_id);
        self
    }

    pub fn delete_confirmation(&self) -> Option<i64> {
        self.delete_confirmation
    }

    pub fn cancel_delete_confirmation(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }

    pub fn confirm_delete_landmark(&mut self) -> &mut Self {
        if let Some(info_id) = self.delete_confirmation.take() {
            self.loading = true;
            self.dispatch(NetworkEvent::DeleteLandmark { info_id });
        }
        self
    }

    /// Apply the result of a delete request.
    ///
    pub fn apply_delete(&mut self, info_id: i64, result: Result<(), ApiError>) -> &mut Self {
        self.loading = false;
        match result {
            Ok(()) => {
                if let Ok(landmark) = self.landmark(info_id) {
                    info!("Deleted landmark '{}'", landmark.name);
                }
                self.landmarks.retain(|l| l.info_id != info_id);
                self.clamp_landmark_selection();
                self.show_alert(Alert::new(AlertKind::Success, "Success", "Landmark Deleted"));
            }
            Err(e) => {
                error!("Failed to delete landmark {}: {}", info_id, e);
                let message = if e.is_network() {
                    "Network error.".to_string()
                } else {
                    with_reason("Failed to delete landmark.", &e)
                };
                self.show_alert(Alert::new(AlertKind::Error, "Error", &message));
            }
        }
        self
    }

    // Landmark form

    pub fn landmark_form(&self) -> Option<&LandmarkForm> {
        self.landmark_form.as_ref()
    }

    pub fn landmark_form_mut(&mut self) -> Option<&mut LandmarkForm> {
        self.landmark_form.as_mut()
    }

    /// Pick the next or previous option of the focused choice field.
    ///
    pub fn cycle_landmark_choice(&mut self, forward: bool) -> &mut Self {
        let types = self.landmark_types.clone();
        let form = match self.landmark_form.as_mut() {
            Some(form) => form,
            None => return self,
        };
        match form.focused_field() {
            Some(Field::LandmarkType) => {
                let current = form
                    .landmark_type
                    .and_then(|id| types.iter().position(|t| t.type_id == id));
                if let Some(index) = step(current, types.len(), forward) {
                    form.set_landmark_type(&types[index]);
                }
            }
            Some(Field::ContactKind) => {
                let current = form
                    .contact_kind
                    .and_then(|k| ContactKind::ALL.iter().position(|c| *c == k));
                if let Some(index) = step(current, ContactKind::ALL.len(), forward) {
                    form.set_contact_kind(ContactKind::ALL[index]);
                }
            }
            _ => {}
        }
        self
    }

    /// Validate the landmark form and send it. An edit that changes nothing
    /// is stopped before validation.
    ///
    pub fn submit_landmark_form(&mut self) -> Result<(), StateError> {
        let form = self.landmark_form.as_mut().ok_or(StateError::NoActiveForm)?;
        if !form.has_changes() {
            self.show_alert(Alert::new(AlertKind::Info, "No Changes", NO_CHANGES_MESSAGE));
            return Ok(());
        }
        if !form.submit() {
            self.show_alert(Alert::new(
                AlertKind::Error,
                "Validation Error",
                VALIDATION_MESSAGE,
            ));
            return Ok(());
        }
        let (mode, draft) = match form.to_draft() {
            Some(draft) => (form.mode, draft),
            None => return Err(StateError::NoActiveForm),
        };
        self.loading = true;
        match mode {
            LandmarkFormMode::Add => self.dispatch(NetworkEvent::CreateLandmark { draft }),
            LandmarkFormMode::Edit { info_id } => {
                self.dispatch(NetworkEvent::UpdateLandmark { info_id, draft })
            }
        }
        Ok(())
    }

    /// Apply the result of a create or update request. Success closes the
    /// form and shows the landmark list.
    ///
    pub fn apply_landmark_write(
        &mut self,
        mode: LandmarkFormMode,
        result: Result<(), ApiError>,
    ) -> &mut Self {
        self.loading = false;
        match result {
            Ok(()) => {
                self.landmark_form = None;
                self.navigator.set_route(Route::Landmarks, None);
                self.refresh_landmarks();
            }
            Err(e) => {
                error!("Landmark write failed: {}", e);
                let message = write_failure_message(mode, &e);
                self.show_alert(Alert::new(AlertKind::Error, "Error", &message));
            }
        }
        self
    }

    // Tourist form

    pub fn tourist_form(&self) -> &TouristForm {
        &self.tourist_form
    }

    pub fn tourist_form_mut(&mut self) -> &mut TouristForm {
        &mut self.tourist_form
    }

    /// Pick the next or previous option of the focused choice field.
    ///
    pub fn cycle_tourist_choice(&mut self, forward: bool) -> &mut Self {
        let form = &mut self.tourist_form;
        match form.focused_field() {
            Some(Field::Allocation) => {
                let current = form
                    .allocation
                    .and_then(|a| Allocation::ALL.iter().position(|x| *x == a));
                if let Some(index) = step(current, Allocation::ALL.len(), forward) {
                    form.set_allocation(Allocation::ALL[index]);
                }
            }
            Some(Field::Nationality) => {
                let current = NATIONALITIES.iter().position(|n| *n == form.nationality);
                if let Some(index) = step(current, NATIONALITIES.len(), forward) {
                    form.set_nationality(NATIONALITIES[index]);
                }
            }
            Some(Field::VisitedLandmark) => {
                let current = form
                    .visited_landmark
                    .and_then(|id| self.landmarks.iter().position(|l| l.info_id == id));
                if let Some(index) = step(current, self.landmarks.len(), forward) {
                    let landmark = &self.landmarks[index];
                    let landmark_type = self
                        .landmark_types
                        .iter()
                        .find(|t| t.type_id == landmark.landmark_type);
                    form.set_visited_landmark(landmark, landmark_type);
                }
            }
            _ => {}
        }
        self
    }

    /// Validate and record the visit, then reset to the dashboard. Does
    /// nothing until the privacy consent is given.
    ///
    pub fn submit_tourist_form(&mut self) -> &mut Self {
        if !self.tourist_form.consent {
            debug!("Tourist form requires privacy consent");
            return self;
        }
        if !self.tourist_form.submit() {
            self.show_alert(Alert::new(
                AlertKind::Error,
                "Validation Error",
                VALIDATION_MESSAGE,
            ));
            return self;
        }
        if let Some(visit) = self.tourist_form.to_visit() {
            info!(
                "Recorded visit of {} to '{}'",
                visit.counts.total(),
                visit.landmark_name
            );
            self.visits.push(visit);
        }
        self.tourist_form = TouristForm::new();
        self.go_back();
        self
    }

    pub fn visits(&self) -> &[TouristVisit] {
        &self.visits
    }

    /// Visitors over every recorded visit, saturating at `u32::MAX`.
    ///
    pub fn visitor_total(&self) -> u32 {
        self.visits
            .iter()
            .fold(0, |sum, visit| sum.saturating_add(visit.counts.total()))
    }

    pub fn visit_tallies(&self) -> Vec<VisitTally> {
        tally_visits(&self.visits)
    }

    // Alerts and log

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn show_alert(&mut self, alert: Alert) -> &mut Self {
        self.alert = Some(alert);
        self
    }

    pub fn dismiss_alert(&mut self) -> &mut Self {
        self.alert = None;
        self
    }

    /// Record a failed background request.
    ///
    pub fn apply_request_failure(&mut self, error: &ApiError) -> &mut Self {
        self.loading = false;
        let message = if error.is_network() {
            "Network error."
        } else {
            "The server could not complete the request."
        };
        self.show_alert(Alert::new(AlertKind::Error, "Error", message));
        self
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    /// Return the newest `count` log lines, oldest first.
    ///
    pub fn log_entries(&self, count: usize) -> Vec<String> {
        match self.log_buffer.as_ref().and_then(|b| b.lock().ok()) {
            Some(buffer) => {
                let skip = buffer.len().saturating_sub(count);
                buffer.iter().skip(skip).cloned().collect()
            }
            None => vec![],
        }
    }

    /// Send a network event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}

/// Return the option index after `current`, wrapping around.
///
fn step(current: Option<usize>, count: usize, forward: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => (i + count - 1) % count,
    })
}

fn with_reason(message: &str, error: &ApiError) -> String {
    match error.details() {
        Some(details) => format!("{}\nReason: {}", message, details),
        None => message.to_owned(),
    }
}

/// Return the alert text for a failed landmark write.
///
pub fn write_failure_message(mode: LandmarkFormMode, error: &ApiError) -> String {
    if error.is_network() {
        return "Network error.".to_string();
    }
    let message = match mode {
        LandmarkFormMode::Add => "Failed to add landmark.",
        LandmarkFormMode::Edit { .. } => "Failed to update landmark.",
    };
    with_reason(message, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use fake::{Fake, Faker};
    use std::sync::mpsc;

    fn state_with(role: Option<Role>) -> (State, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut state = State {
            net_sender: Some(tx),
            landmark_types: vec![
                LandmarkType {
                    type_id: 1,
                    type_name: "Hotels".to_string(),
                },
                LandmarkType {
                    type_id: 3,
                    type_name: "Churches".to_string(),
                },
            ],
            ..State::default()
        };
        if let Some(role) = role {
            let mut session: Session = Faker.fake();
            session.role = role;
            state.auth.apply(LoginOutcome::Success(session));
        }
        state.set_landmarks(
            vec![
                landmark(1, "The Farm at San Benito", 1),
                landmark(2, "San Sebastian Cathedral", 3),
            ],
            vec![Contact {
                contact_id: 2,
                landmark_info: 2,
                name: "Jane Smith".to_string(),
                kind: Some(ContactKind::Phone),
                value: "555-1234".to_string(),
            }],
        );
        (state, rx)
    }

    fn landmark(info_id: i64, name: &str, landmark_type: i64) -> Landmark {
        Landmark {
            info_id,
            name: name.to_string(),
            landmark_type,
            address: "Lipa, Batangas".to_string(),
            total_rooms: None,
            attraction_code: None,
            contacts: vec![],
        }
    }

    fn drain(rx: &mpsc::Receiver<NetworkEvent>) -> Vec<NetworkEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn unauthenticated_state_shows_login() {
        let (mut state, _rx) = state_with(None);
        state.navigate(Route::Reports, None);
        assert_eq!(state.current_screen(), Screen::Login);
    }

    #[test]
    fn submit_login_checks_blank_fields() {
        let (mut state, rx) = state_with(None);
        state.submit_login();
        assert!(state.alert().is_none());

        state.login_form_mut().toggle_consent();
        state.submit_login();
        assert_eq!(state.alert().unwrap().message, auth::BOTH_BLANK_MESSAGE);
        state.dismiss_alert();

        state.login_form_mut().username = "admin".to_string();
        state.submit_login();
        assert_eq!(state.alert().unwrap().message, auth::PASSWORD_BLANK_MESSAGE);
        assert!(drain(&rx).is_empty());

        state.dismiss_alert();
        state.login_form_mut().password = "secret".to_string();
        state.submit_login();
        assert!(state.is_loading());
        assert!(matches!(
            drain(&rx).as_slice(),
            [NetworkEvent::Login { username, .. }] if username == "admin"
        ));
    }

    #[test]
    fn login_success_goes_to_initial_route() {
        let (mut state, rx) = state_with(None);
        state.initial_route = Some(Route::parse("reports"));
        state.navigate(Route::QrCode, None);
        let session = Session {
            username: "admin".to_string(),
            display_name: "Admin".to_string(),
            role: Role::Admin,
        };
        state.apply_login(LoginOutcome::Success(session));
        assert_eq!(state.current_screen(), Screen::Reports);
        assert!(!state.is_loading());
        let events = drain(&rx);
        assert!(events.iter().any(|e| matches!(e, NetworkEvent::Landmarks)));
        assert!(events.iter().any(|e| matches!(e, NetworkEvent::LandmarkTypes)));
    }

    #[test]
    fn login_failure_raises_alert() {
        let (mut state, _rx) = state_with(None);
        state.login_form_mut().password = "wrong".to_string();
        state.apply_login(LoginOutcome::Failure("Invalid credentials".to_string()));
        let alert = state.alert().unwrap();
        assert_eq!(alert.title, "Login Failed");
        assert_eq!(alert.message, "Invalid username or password. Please try again.");
        assert!(state.login_form().password.is_empty());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn staff_navigation_to_add_is_refused() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        state.navigate(Route::Landmarks, None);
        state.navigate(Route::AddLandmark, None);
        assert_eq!(state.current_route(), &Route::Landmarks);
        let alert = state.alert().unwrap();
        assert_eq!(alert.title, "Not Authorized");
        assert_eq!(alert.message, "Staff is not authorized to add landmarks.");
        assert!(state.landmark_form().is_none());
    }

    #[test]
    fn staff_cannot_delete() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        state.delete_selected_landmark();
        assert!(state.delete_confirmation().is_none());
        assert_eq!(
            state.alert().unwrap().message,
            "Staff is not authorized to delete landmarks."
        );
    }

    #[test]
    fn unknown_route_shows_dashboard() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        state.navigate(Route::parse("settings"), None);
        assert_eq!(state.current_screen(), Screen::Dashboard);
    }

    #[test]
    fn contacts_attach_to_their_landmark() {
        let (state, _rx) = state_with(Some(Role::Admin));
        assert!(state.landmark(1).unwrap().contacts.is_empty());
        assert_eq!(state.landmark(2).unwrap().contacts[0].label(), "Jane Smith (555-1234)");
        assert!(matches!(
            state.landmark(9),
            Err(StateError::LandmarkNotFound { info_id: 9 })
        ));
    }

    #[test]
    fn search_matches_name_and_type_case_insensitively() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        "HOTEL".chars().for_each(|c| {
            state.add_search_char(c);
        });
        let names: Vec<_> = state.filtered_landmarks().iter().map(|l| l.name.clone()).collect();
        assert_eq!(names, vec!["The Farm at San Benito"]);

        state.clear_search();
        "cathedral".chars().for_each(|c| {
            state.add_search_char(c);
        });
        assert_eq!(state.filtered_landmarks()[0].info_id, 2);
        assert_eq!(state.selected_landmark().map(|l| l.info_id), Some(2));
    }

    #[test]
    fn type_filter_cycles_then_clears() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        state.cycle_type_filter();
        assert_eq!(state.type_filter().unwrap().type_name, "Hotels");
        assert_eq!(state.filtered_landmarks().len(), 1);
        state.cycle_type_filter();
        assert_eq!(state.filtered_landmarks()[0].info_id, 2);
        state.cycle_type_filter();
        assert!(state.type_filter().is_none());
        assert_eq!(state.filtered_landmarks().len(), 2);
    }

    #[test]
    fn edit_without_changes_sends_nothing() {
        let (mut state, rx) = state_with(Some(Role::Admin));
        assert_eq!(state.selected_landmark().map(|l| l.info_id), Some(1));
        state.next_landmark();
        state.edit_selected_landmark();
        assert_eq!(state.current_screen(), Screen::EditLandmark);
        assert!(matches!(
            drain(&rx).as_slice(),
            [NetworkEvent::LandmarkDetail { info_id: 2 }]
        ));
        assert!(matches!(
            state.route_params(),
            Some(RouteParams::Landmark(landmark)) if landmark.info_id == 2
        ));

        state.submit_landmark_form().unwrap();
        assert_eq!(state.alert().unwrap().title, "No Changes");
        assert_eq!(state.alert().unwrap().message, NO_CHANGES_MESSAGE);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn edit_detail_rebases_contact() {
        let (mut state, _rx) = state_with(Some(Role::Admin));
        state.edit_selected_landmark();
        assert!(state.landmark_form().unwrap().contact_name.is_empty());

        let mut fresh = state.landmark(1).unwrap().clone();
        fresh.contacts = vec![Contact {
            contact_id: 5,
            landmark_info: 1,
            name: "Front Desk".to_string(),
            kind: Some(ContactKind::Email),
            value: "desk@thefarm.ph".to_string(),
        }];
        state.set_edit_detail(fresh);

        let form = state.landmark_form().unwrap();
        assert_eq!(form.contact_name, "Front Desk");
        assert!(!form.has_changes());
        assert_eq!(state.landmark(1).unwrap().contacts.len(), 1);
        assert!(matches!(
            state.route_params(),
            Some(RouteParams::Landmark(landmark)) if landmark.contacts.len() == 1
        ));
    }

    #[test]
    fn edit_detail_for_closed_form_is_ignored() {
        let (mut state, _rx) = state_with(Some(Role::Admin));
        state.edit_selected_landmark();
        state.navigate(Route::Landmarks, None);
        assert!(state.landmark_form().is_none());

        let mut fresh = state.landmark(1).unwrap().clone();
        fresh.name = "Renamed".to_string();
        state.set_edit_detail(fresh);
        state.apply_edit_missing(1);
        assert_eq!(state.landmark(1).unwrap().name, "The Farm at San Benito");
        assert!(state.alert().is_none());
    }

    #[test]
    fn edit_of_missing_landmark_closes_form() {
        let (mut state, _rx) = state_with(Some(Role::Admin));
        state.edit_selected_landmark();
        state.apply_edit_missing(1);
        assert!(state.landmark_form().is_none());
        assert_eq!(state.current_route(), &Route::Landmarks);
        assert_eq!(state.alert().unwrap().message, LANDMARK_GONE_MESSAGE);
        assert!(state.landmark(1).is_err());
    }

    #[test]
    fn add_form_submit_flow() {
        let (mut state, rx) = state_with(Some(Role::Admin));
        state.navigate(Route::AddLandmark, None);
        state.submit_landmark_form().unwrap();
        assert_eq!(state.alert().unwrap().message, VALIDATION_MESSAGE);
        assert!(drain(&rx).is_empty());
        state.dismiss_alert();

        {
            let form = state.landmark_form_mut().unwrap();
            form.name = "Lipa Grand Hotel".to_string();
            form.address = "Ayala Highway".to_string();
            form.contact_name = "Desk".to_string();
        }
        state.landmark_form_mut().unwrap().focus_next();
        state.cycle_landmark_choice(true);
        assert_eq!(state.landmark_form().unwrap().type_name.as_deref(), Some("Hotels"));
        for _ in 0..5 {
            state.landmark_form_mut().unwrap().focus_next();
        }
        state.cycle_landmark_choice(true);
        state.landmark_form_mut().unwrap().focus_next();
        "0917 111 2222".chars().for_each(|c| state.landmark_form_mut().unwrap().input(c));

        // Hotels need a room count.
        state.submit_landmark_form().unwrap();
        assert_eq!(
            state.landmark_form().unwrap().visible_error(Field::TotalRooms),
            Some("Required")
        );
        state.dismiss_alert();
        state.landmark_form_mut().unwrap().total_rooms = "80".to_string();
        state.submit_landmark_form().unwrap();
        assert!(state.alert().is_none());
        match drain(&rx).as_slice() {
            [NetworkEvent::CreateLandmark { draft }] => {
                assert_eq!(draft.total_rooms, Some(80));
                assert_eq!(draft.contact_person.as_ref().unwrap().contact_type, ContactKind::Phone);
            }
            other => panic!("unexpected events {:?}", other),
        }

        state.apply_landmark_write(LandmarkFormMode::Add, Ok(()));
        assert!(state.landmark_form().is_none());
        assert_eq!(state.current_route(), &Route::Landmarks);
        assert!(matches!(drain(&rx).as_slice(), [NetworkEvent::Landmarks]));
    }

    #[test]
    fn write_failures_carry_reason() {
        let error = ApiError::Status {
            status: 400,
            details: Some("Address too long".to_string()),
        };
        assert_eq!(
            write_failure_message(LandmarkFormMode::Add, &error),
            "Failed to add landmark.\nReason: Address too long"
        );
        let error = ApiError::Status {
            status: 500,
            details: None,
        };
        assert_eq!(
            write_failure_message(LandmarkFormMode::Edit { info_id: 1 }, &error),
            "Failed to update landmark."
        );
        let error = ApiError::InvalidUrl {
            url: String::new(),
            message: String::new(),
        };
        assert_eq!(write_failure_message(LandmarkFormMode::Add, &error), "Network error.");
    }

    #[test]
    fn delete_flow() {
        let (mut state, rx) = state_with(Some(Role::Admin));
        state.delete_selected_landmark();
        assert_eq!(state.delete_confirmation(), Some(1));
        state.confirm_delete_landmark();
        assert!(matches!(
            drain(&rx).as_slice(),
            [NetworkEvent::DeleteLandmark { info_id: 1 }]
        ));
        state.apply_delete(1, Ok(()));
        assert_eq!(state.alert().unwrap().message, "Landmark Deleted");
        assert!(state.landmark(1).is_err());
        assert_eq!(state.landmarks().len(), 1);
    }

    #[test]
    fn tourist_submit_records_visit_and_goes_back() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        state.navigate(Route::TouristForm, None);
        state.cycle_tourist_choice(true);
        {
            let form = state.tourist_form_mut();
            form.male = "2".to_string();
            form.toggle_consent();
            while form.focused_field() != Some(Field::VisitedLandmark) {
                form.focus_next();
            }
        }
        state.cycle_tourist_choice(true);
        state.cycle_tourist_choice(true);
        assert_eq!(state.tourist_form().visited_landmark, Some(2));

        state.submit_tourist_form();
        assert!(state.alert().is_none());
        assert_eq!(state.current_route(), &Route::Dashboard);
        assert_eq!(state.visits().len(), 1);
        assert_eq!(state.visit_tallies()[0].local_male, 2);
        assert_eq!(state.visitor_total(), 2);
        assert!(state.tourist_form().allocation.is_none());
    }

    #[test]
    fn visitor_total_saturates() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        let mut visit: TouristVisit = Faker.fake();
        visit.counts.male = u32::MAX;
        state.visits = vec![visit.clone(), visit];
        assert_eq!(state.visitor_total(), u32::MAX);
    }

    #[test]
    fn tourist_submit_refuses_visit_with_only_hidden_counts() {
        let (mut state, _rx) = state_with(Some(Role::Staff));
        state.navigate(Route::TouristForm, None);
        {
            let form = state.tourist_form_mut();
            form.set_allocation(Allocation::ForeignResidency);
            form.foreign_male = "3".to_string();
            form.set_allocation(Allocation::LipaResidency);
            form.visited_landmark = Some(2);
            form.toggle_consent();
        }

        state.submit_tourist_form();
        assert_eq!(state.alert().unwrap().message, VALIDATION_MESSAGE);
        assert!(state.visits().is_empty());
        assert_eq!(state.current_route(), &Route::TouristForm);
    }

    #[test]
    fn step_wraps() {
        assert_eq!(step(None, 3, true), Some(0));
        assert_eq!(step(None, 3, false), Some(2));
        assert_eq!(step(Some(2), 3, true), Some(0));
        assert_eq!(step(Some(0), 3, false), Some(2));
        assert_eq!(step(None, 0, true), None);
    }
}
