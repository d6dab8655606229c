use domain::{
    DomainError, Team, TeamData, TeamMember, TeamMemberData, TeamRole, TeamStore, User,
    UserStore,
};
use tracing::info;
use uuid::Uuid;

use crate::error::TeamFeatureError;

/// Look up a user that another record is about to reference
pub(crate) async fn require_user(
    users: &dyn UserStore,
    id: Uuid,
) -> Result<User, TeamFeatureError> {
    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::UserNotFound(id.to_string()).into())
}

/// Service for teams and their memberships
pub struct TeamService;

impl TeamService {
    /// Create a team; its leader, if any, joins as owner
    pub async fn create(
        users: &dyn UserStore,
        teams: &dyn TeamStore,
        data: TeamData,
    ) -> Result<Team, TeamFeatureError> {
        if let Some(leader_id) = data.leader_id {
            require_user(users, leader_id).await?;
        }

        let team = teams.insert(data).await?;

        if let Some(leader_id) = team.leader_id {
            teams.add_member(team.id, leader_id, TeamRole::Owner).await?;
        }

        info!(team_id = %team.id, name = %team.name, "Created team");

        Ok(team)
    }

    /// Get a team by ID
    pub async fn get(teams: &dyn TeamStore, id: Uuid) -> Result<Team, TeamFeatureError> {
        teams
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::TeamNotFound(id.to_string()).into())
    }

    /// List all teams
    pub async fn list(teams: &dyn TeamStore) -> Result<Vec<Team>, TeamFeatureError> {
        Ok(teams.list().await?)
    }

    /// Replace a team's caller-editable fields
    pub async fn update(
        users: &dyn UserStore,
        teams: &dyn TeamStore,
        id: Uuid,
        data: TeamData,
    ) -> Result<Team, TeamFeatureError> {
        let existing = Self::get(teams, id).await?;

        if let Some(leader_id) = data.leader_id {
            require_user(users, leader_id).await?;
        }

        let team = teams
            .update(id, data)
            .await?
            .ok_or_else(|| DomainError::TeamNotFound(id.to_string()))?;

        if let Some(leader_id) = team.leader_id {
            if existing.leader_id != Some(leader_id) {
                teams.add_member(team.id, leader_id, TeamRole::Owner).await?;
            }
        }

        info!(team_id = %team.id, "Updated team");

        Ok(team)
    }

    /// Add a user to a team, or change the role of an existing member
    pub async fn add_member(
        users: &dyn UserStore,
        teams: &dyn TeamStore,
        team_id: Uuid,
        data: TeamMemberData,
    ) -> Result<TeamMember, TeamFeatureError> {
        Self::get(teams, team_id).await?;
        require_user(users, data.user_id).await?;

        let member = teams.add_member(team_id, data.user_id, data.role).await?;

        info!(
            team_id = %team_id,
            user_id = %member.user_id,
            role = member.role.as_str(),
            "Added team member"
        );

        Ok(member)
    }

    /// Members of a team, oldest first
    pub async fn members(
        teams: &dyn TeamStore,
        team_id: Uuid,
    ) -> Result<Vec<TeamMember>, TeamFeatureError> {
        Self::get(teams, team_id).await?;
        Ok(teams.members(team_id).await?)
    }
}
