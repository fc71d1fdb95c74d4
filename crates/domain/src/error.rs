use crate::{EmailError, NameError, PasswordError, PlanError};

/// Failure of a call against the remote API.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained.
    #[error("no connection: {0}")]
    Network(String),
    /// A response was obtained, but it signals a failure or could not be decoded.
    #[error("{message}")]
    Request { status: u16, message: String },
    /// The server rejected the credentials and they could not be refreshed.
    #[error("session expired")]
    SessionExpired,
    /// The response was received, but the session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::SessionExpired | ApiError::Storage(_) => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{field} must be {expected}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
}
