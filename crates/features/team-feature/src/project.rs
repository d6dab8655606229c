use domain::{DomainError, Project, ProjectData, ProjectStore, TeamStore};
use tracing::info;
use uuid::Uuid;

use crate::error::TeamFeatureError;
use crate::team::TeamService;

/// Service for team projects
pub struct ProjectService;

impl ProjectService {
    /// Create a project inside an existing team
    pub async fn create(
        teams: &dyn TeamStore,
        projects: &dyn ProjectStore,
        data: ProjectData,
    ) -> Result<Project, TeamFeatureError> {
        TeamService::get(teams, data.team_id).await?;

        let project = projects.insert(data).await?;

        info!(project_id = %project.id, team_id = %project.team_id, "Created project");

        Ok(project)
    }

    /// Get a project by ID
    pub async fn get(projects: &dyn ProjectStore, id: Uuid) -> Result<Project, TeamFeatureError> {
        projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ProjectNotFound(id.to_string()).into())
    }

    /// Projects of a team, newest first
    pub async fn list_for_team(
        teams: &dyn TeamStore,
        projects: &dyn ProjectStore,
        team_id: Uuid,
    ) -> Result<Vec<Project>, TeamFeatureError> {
        TeamService::get(teams, team_id).await?;
        Ok(projects.list_for_team(team_id).await?)
    }
}
