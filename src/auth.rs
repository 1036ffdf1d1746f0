//! Authentication: credential checks and the session holder.

use crate::api::{ApiError, Role, Session, SightApi};
use crate::config::{AuthProvider, Config, Credential};
use log::*;

pub const BOTH_BLANK_MESSAGE: &str = "Please enter both username and password";
pub const USERNAME_BLANK_MESSAGE: &str = "Please enter your username";
pub const PASSWORD_BLANK_MESSAGE: &str = "Please enter your password";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password. Please try again.";

const NETWORK_ERROR_MESSAGE: &str = "Network error";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const TABLE_MISMATCH_MESSAGE: &str = "Invalid username or password";

/// Result of a login attempt. Exactly one of session or error exists.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(Session),
    Failure(String),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoginOutcome::Success(_) => None,
            LoginOutcome::Failure(message) => Some(message),
        }
    }
}

/// Check credentials for presence before any authenticator is asked.
///
pub fn check_credentials_present(username: &str, password: &str) -> Result<(), &'static str> {
    match (username.trim().is_empty(), password.trim().is_empty()) {
        (true, true) => Err(BOTH_BLANK_MESSAGE),
        (true, false) => Err(USERNAME_BLANK_MESSAGE),
        (false, true) => Err(PASSWORD_BLANK_MESSAGE),
        (false, false) => Ok(()),
    }
}

/// Checks credentials against the backend or against a fixed user table.
///
#[derive(Clone)]
pub enum Authenticator {
    Remote(SightApi),
    Table(Vec<Credential>),
}

impl Authenticator {
    /// Return the authenticator named in the configuration. An empty table
    /// falls back to one admin and one staff account.
    ///
    pub fn from_config(config: &Config) -> Result<Authenticator, ApiError> {
        Ok(match config.auth.provider {
            AuthProvider::Remote => Authenticator::Remote(SightApi::new(&config.api_url)?),
            AuthProvider::Table if config.auth.users.is_empty() => {
                warn!("No users configured for table authentication, using built-in accounts");
                Authenticator::Table(default_users())
            }
            AuthProvider::Table => Authenticator::Table(config.auth.users.clone()),
        })
    }

    /// Return the outcome of checking the credentials. Never fails: transport
    /// problems become a failure outcome.
    ///
    pub async fn authenticate(&self, username: &str, password: &str) -> LoginOutcome {
        match self {
            Authenticator::Remote(api) => match api.login(username, password).await {
                Ok(response) => match (response.success, response.user) {
                    (true, Some(user)) => LoginOutcome::Success(Session::from(user)),
                    _ => LoginOutcome::Failure(
                        response
                            .message
                            .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()),
                    ),
                },
                Err(e) => {
                    error!("Login request failed: {}", e);
                    LoginOutcome::Failure(NETWORK_ERROR_MESSAGE.to_string())
                }
            },
            Authenticator::Table(users) => users
                .iter()
                .find(|u| u.username == username && u.password == password)
                .map(|u| {
                    LoginOutcome::Success(Session {
                        username: u.username.to_owned(),
                        display_name: u.name.clone().unwrap_or_else(|| u.username.to_owned()),
                        role: u.role,
                    })
                })
                .unwrap_or_else(|| LoginOutcome::Failure(TABLE_MISMATCH_MESSAGE.to_string())),
        }
    }
}

fn default_users() -> Vec<Credential> {
    vec![
        Credential {
            username: "admin".to_string(),
            password: "admin".to_string(),
            role: Role::Admin,
            name: Some("Administrator".to_string()),
        },
        Credential {
            username: "staff".to_string(),
            password: "staff".to_string(),
            role: Role::Staff,
            name: Some("Staff".to_string()),
        },
    ]
}

/// Holds the session for the life of the process.
///
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    session: Option<Session>,
}

impl AuthState {
    /// Store the session of a successful outcome. Returns the error of a
    /// failed one.
    ///
    pub fn apply(&mut self, outcome: LoginOutcome) -> Option<String> {
        match outcome {
            LoginOutcome::Success(session) => {
                info!("Signed in as '{}' ({})", session.username, session.role);
                self.session = Some(session);
                None
            }
            LoginOutcome::Failure(message) => {
                warn!("Login failed: {}", message);
                Some(message)
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Signed out '{}'", session.username);
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().map_or(false, Session::is_admin)
    }
}
