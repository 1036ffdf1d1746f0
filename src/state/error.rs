//! State management-specific error types.

use std::fmt;

/// Actions reserved for admins.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AdminAction {
    Add,
    Edit,
    Delete,
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AdminAction::Add => "add",
            AdminAction::Edit => "edit",
            AdminAction::Delete => "delete",
        })
    }
}

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Staff session attempted an admin action
    #[error("Staff is not authorized to {action} landmarks.")]
    NotAuthorized { action: AdminAction },

    /// No session present
    #[error("Not signed in")]
    NotAuthenticated,

    /// Landmark not found in state
    #[error("Landmark not found: {info_id}")]
    LandmarkNotFound { info_id: i64 },

    /// Form operation without an open form
    #[error("No form is open")]
    NoActiveForm,
}
