pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};

pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Build the HTTP router over the given stores
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .merge(routes::users::router())
        .merge(routes::teams::router())
        .merge(routes::invitations::router())
        .merge(routes::projects::router())
        .with_state(state)
}
