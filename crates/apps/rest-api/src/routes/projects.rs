use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use domain::validation::{parse_id, parse_json};
use domain::{PROJECT_DATA_SCHEMA, ProjectData};
use team_feature::ProjectService;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create))
        .route("/projects/{id}", get(show))
}

async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let data: ProjectData = parse_json(&PROJECT_DATA_SCHEMA, &body)?;
    let project =
        ProjectService::create(state.teams.as_ref(), state.projects.as_ref(), data).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id("id", &id)?;
    Ok(Json(ProjectService::get(state.projects.as_ref(), id).await?))
}
