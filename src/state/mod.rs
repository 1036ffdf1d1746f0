//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Routes, screens and the router (`navigation`)
//! - Form models and the rule-table validator (`form`)
//! - Visit tallies for the reports screen (`report`)
//! - State error handling

mod error;
mod form;
mod navigation;
mod report;

pub use error::{AdminAction, StateError};
pub use form::{
    is_valid_email, validate, validate_field, Check, Condition, Editor, Field, FieldRule,
    FormErrors, FormModel, FormStatus, LandmarkForm, LandmarkFormMode, LoginField, LoginForm,
    Requirement, TouristForm, LANDMARK_RULES, NATIONALITIES, TOURIST_RULES,
};
pub use navigation::{dispatch, Navigator, Route, RouteParams, Screen, NAV_BAR};
pub use report::{tally_visits, VisitTally};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{
    write_failure_message, Alert, AlertKind, State, DELETE_CONFIRMATION_MESSAGE,
    LANDMARK_GONE_MESSAGE, NOT_AUTHORIZED_TITLE, NO_CHANGES_MESSAGE, VALIDATION_MESSAGE,
};
