use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use domain::validation::{parse_id, parse_json};
use domain::{INVITATION_DATA_SCHEMA, InvitationData};
use serde_json::json;
use team_feature::InvitationService;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invitations", post(send))
        .route("/invitations/{id}", get(show))
        .route("/invitations/{id}/accept", post(accept))
        .route("/invitations/{id}/decline", post(decline))
}

async fn send(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let data: InvitationData = parse_json(&INVITATION_DATA_SCHEMA, &body)?;
    let invitation = InvitationService::send(
        state.users.as_ref(),
        state.teams.as_ref(),
        state.invitations.as_ref(),
        data,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(InvitationService::get(state.invitations.as_ref(), id).await?))
}

async fn accept(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    let (invitation, member) = InvitationService::accept(
        state.users.as_ref(),
        state.teams.as_ref(),
        state.invitations.as_ref(),
        id,
    )
    .await?;
    Ok(Json(json!({ "invitation": invitation, "member": member })))
}

async fn decline(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(
        InvitationService::decline(state.invitations.as_ref(), id).await?,
    ))
}
