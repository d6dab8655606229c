//! HTTP handlers, one module per resource.
//!
//! Request bodies are read as raw bytes and decoded through the validation
//! layer so malformed input reports every violation, not the first serde error.

pub mod invitations;
pub mod projects;
pub mod teams;
pub mod users;

/// Health check handler
pub async fn health() -> &'static str {
    "OK"
}
