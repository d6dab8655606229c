use std::sync::Arc;

use domain::postgres::{
    PgInvitationRepository, PgProjectRepository, PgTeamRepository, PgUserRepository,
};
use domain::{InvitationStore, ProjectStore, TeamStore, UserStore};
use sqlx::PgPool;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub teams: Arc<dyn TeamStore>,
    pub invitations: Arc<dyn InvitationStore>,
    pub projects: Arc<dyn ProjectStore>,
    /// Off unless a gateway in front of the server owns the token payload header
    pub trust_token_header: bool,
}

impl AppState {
    /// State backed by the Postgres adapters
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            invitations: Arc::new(PgInvitationRepository::new(pool.clone())),
            projects: Arc::new(PgProjectRepository::new(pool)),
            trust_token_header: false,
        }
    }

    /// State where a single store serves every port
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserStore + TeamStore + InvitationStore + ProjectStore + 'static,
    {
        Self {
            users: store.clone(),
            teams: store.clone(),
            invitations: store.clone(),
            projects: store,
            trust_token_header: false,
        }
    }

    pub fn trusting_token_header(mut self, trust: bool) -> Self {
        self.trust_token_header = trust;
        self
    }
}
