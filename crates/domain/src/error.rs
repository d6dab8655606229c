use std::error::Error as StdError;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::validation::{ValidationFailure, Violation};

/// Machine-readable error code exposed to clients
///
/// Every code the system can emit is listed here, so a new failure condition
/// means a new member and the compiler points at every `match` that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UserNotFound,
    EmailConflict,
    UsernameConflict,
    TeamNotFound,
    InvitationConflict,
    InvitationNotFound,
    ProjectNotFound,
    Unauthorized,
    ValidationError,
    UnknownError,
}

impl ErrorCode {
    /// Every code, in declaration order
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::UserNotFound,
        ErrorCode::EmailConflict,
        ErrorCode::UsernameConflict,
        ErrorCode::TeamNotFound,
        ErrorCode::InvitationConflict,
        ErrorCode::InvitationNotFound,
        ErrorCode::ProjectNotFound,
        ErrorCode::Unauthorized,
        ErrorCode::ValidationError,
        ErrorCode::UnknownError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::EmailConflict => "EMAIL_CONFLICT",
            ErrorCode::UsernameConflict => "USERNAME_CONFLICT",
            ErrorCode::TeamNotFound => "TEAM_NOT_FOUND",
            ErrorCode::InvitationConflict => "INVITATION_CONFLICT",
            ErrorCode::InvitationNotFound => "INVITATION_NOT_FOUND",
            ErrorCode::ProjectNotFound => "PROJECT_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// HTTP status fixed for this code
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::UserNotFound
            | ErrorCode::TeamNotFound
            | ErrorCode::InvitationNotFound
            | ErrorCode::ProjectNotFound => 404,
            ErrorCode::EmailConflict
            | ErrorCode::UsernameConflict
            | ErrorCode::InvitationConflict => 409,
            ErrorCode::UnknownError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by domain logic
///
/// Constructor arguments only feed the message; status and code are fixed
/// per variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Email is already used by another account")]
    EmailAlreadyUsed,

    #[error("Username is already used by another account")]
    UsernameAlreadyUsed,

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("A pending invitation was already sent to this address")]
    InvitationAlreadySent,

    #[error("Invitation not found: {0}")]
    InvitationNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Authentication required")]
    Unauthorized,
}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::EmailAlreadyUsed => ErrorCode::EmailConflict,
            DomainError::UsernameAlreadyUsed => ErrorCode::UsernameConflict,
            DomainError::TeamNotFound(_) => ErrorCode::TeamNotFound,
            DomainError::InvitationAlreadySent => ErrorCode::InvitationConflict,
            DomainError::InvitationNotFound(_) => ErrorCode::InvitationNotFound,
            DomainError::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            DomainError::Unauthorized => ErrorCode::Unauthorized,
        }
    }

    pub fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// The variant raised when a uniqueness rule with `code` is broken
    pub fn from_conflict(code: ErrorCode) -> Option<Self> {
        match code {
            ErrorCode::EmailConflict => Some(DomainError::EmailAlreadyUsed),
            ErrorCode::UsernameConflict => Some(DomainError::UsernameAlreadyUsed),
            ErrorCode::InvitationConflict => Some(DomainError::InvitationAlreadySent),
            _ => None,
        }
    }
}

/// Contract shared by every failure the HTTP boundary knows how to render
pub trait ErrorContract {
    fn code(&self) -> ErrorCode;

    fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// Message safe to show to API consumers
    fn message(&self) -> String;

    /// Field-level violations, empty for everything but validation failures
    fn violations(&self) -> &[Violation] {
        &[]
    }
}

impl ErrorContract for DomainError {
    fn code(&self) -> ErrorCode {
        DomainError::code(self)
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

impl ErrorContract for ValidationFailure {
    fn code(&self) -> ErrorCode {
        ErrorCode::ValidationError
    }

    fn message(&self) -> String {
        "Validation failed".to_string()
    }

    fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// Find the first taxonomy member in an error's source chain
///
/// Returns `None` for anything the taxonomy does not recognize; callers
/// treat that as [`ErrorCode::UnknownError`].
pub fn classify<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a dyn ErrorContract> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(domain) = err.downcast_ref::<DomainError>() {
            return Some(domain);
        }
        if let Some(validation) = err.downcast_ref::<ValidationFailure>() {
            return Some(validation);
        }
        current = err.source();
    }
    None
}

/// Failures raised by persistence adapters
///
/// Not part of the client-facing taxonomy. `Conflict` carries the code of a
/// violated uniqueness rule and is turned into the matching [`DomainError`]
/// by [`StoreError::into_domain`]; everything else surfaces as
/// `UNKNOWN_ERROR`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Uniqueness rule violated: {0}")]
    Conflict(ErrorCode),

    #[error("Corrupt row in {table}: {reason}")]
    CorruptRow {
        table: &'static str,
        reason: String,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Resolve a conflict into its domain error, handing back anything else
    pub fn into_domain(self) -> Result<DomainError, StoreError> {
        match self {
            StoreError::Conflict(code) => {
                DomainError::from_conflict(code).ok_or(StoreError::Conflict(code))
            }
            other => Err(other),
        }
    }
}
