use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use domain::validation::{parse_id, parse_json};
use domain::{TEAM_DATA_SCHEMA, TEAM_MEMBER_DATA_SCHEMA, TeamData, TeamMemberData};
use team_feature::{InvitationService, ProjectService, TeamService};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list).post(create))
        .route("/teams/{id}", get(show).put(update))
        .route("/teams/{id}/members", get(members).post(add_member))
        .route("/teams/{id}/invitations", get(invitations))
        .route("/teams/{id}/projects", get(projects))
}

async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let data: TeamData = parse_json(&TEAM_DATA_SCHEMA, &body)?;
    let team = TeamService::create(state.users.as_ref(), state.teams.as_ref(), data).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(TeamService::list(state.teams.as_ref()).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(TeamService::get(state.teams.as_ref(), id).await?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    let data: TeamData = parse_json(&TEAM_DATA_SCHEMA, &body)?;
    let team =
        TeamService::update(state.users.as_ref(), state.teams.as_ref(), id, data).await?;
    Ok(Json(team))
}

async fn members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(TeamService::members(state.teams.as_ref(), id).await?))
}

async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    let data: TeamMemberData = parse_json(&TEAM_MEMBER_DATA_SCHEMA, &body)?;
    let member =
        TeamService::add_member(state.users.as_ref(), state.teams.as_ref(), id, data).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

async fn invitations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    let invitations =
        InvitationService::list_for_team(state.teams.as_ref(), state.invitations.as_ref(), id)
            .await?;
    Ok(Json(invitations))
}

async fn projects(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    let projects =
        ProjectService::list_for_team(state.teams.as_ref(), state.projects.as_ref(), id).await?;
    Ok(Json(projects))
}
