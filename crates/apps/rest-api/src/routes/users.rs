use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use domain::validation::{parse_id, parse_json};
use domain::{DomainError, REGISTER_SCHEMA, RENAME_SCHEMA, RegisterUser, RenameUser};
use serde_json::Value;
use user_feature::UserService;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the claims of an already verified access token
///
/// The value is not signed. It is only read when
/// [`AppState::trust_token_header`] is set, which requires a gateway in front
/// of the server that verifies the token, sets this header from it, and strips
/// any copy sent by the client.
pub const TOKEN_PAYLOAD_HEADER: &str = "x-token-payload";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(register))
        .route("/users/{id}", get(show).patch(rename))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: RegisterUser = parse_json(&REGISTER_SCHEMA, &body)?;
    let user = UserService::register(state.users.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(UserService::list(state.users.as_ref()).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(UserService::get(state.users.as_ref(), id).await?))
}

async fn rename(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    let input: RenameUser = parse_json(&RENAME_SCHEMA, &body)?;
    Ok(Json(UserService::rename(state.users.as_ref(), id, input).await?))
}

async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if !state.trust_token_header {
        return Err(DomainError::Unauthorized.into());
    }
    let claims: Value = headers
        .get(TOKEN_PAYLOAD_HEADER)
        .and_then(|raw| serde_json::from_slice(raw.as_bytes()).ok())
        .ok_or(DomainError::Unauthorized)?;
    Ok(Json(
        UserService::resolve_principal(state.users.as_ref(), &claims).await?,
    ))
}
