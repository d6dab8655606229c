//! Postgres adapters for the store ports.
//!
//! Queries are built with sea-query and bound through sea-query-binder.

mod invitations;
mod projects;
mod teams;
mod users;

pub use invitations::PgInvitationRepository;
pub use projects::PgProjectRepository;
pub use teams::PgTeamRepository;
pub use users::PgUserRepository;

use crate::{ErrorCode, StoreError};

/// Unique constraints from `migrations/` and the conflict each one reports
const UNIQUE_CONFLICTS: [(&str, ErrorCode); 3] = [
    ("users_email_key", ErrorCode::EmailConflict),
    ("users_username_key", ErrorCode::UsernameConflict),
    ("invitations_pending_target", ErrorCode::InvitationConflict),
];

fn corrupt(table: &'static str, column: &str, value: &str) -> StoreError {
    StoreError::CorruptRow {
        table,
        reason: format!("unexpected {column} value {value:?}"),
    }
}

/// Conflict code for a violated unique constraint, if it is a known one
pub(crate) fn conflict_for(constraint: &str) -> Option<ErrorCode> {
    UNIQUE_CONFLICTS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, code)| *code)
}

/// Map unique violations of known constraints to [`StoreError::Conflict`]
fn unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            if let Some(code) = db.constraint().and_then(conflict_for) {
                return StoreError::Conflict(code);
            }
        }
    }
    StoreError::Database(err)
}
