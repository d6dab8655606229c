use domain::{
    DomainError, Invitation, InvitationData, InvitationStatus, InvitationStore, TeamMember,
    TeamRole, TeamStore, UserStore,
};
use tracing::info;
use uuid::Uuid;

use crate::error::TeamFeatureError;
use crate::team::{TeamService, require_user};

/// Service for inviting people into teams
pub struct InvitationService;

impl InvitationService {
    /// Invite an email address into a team
    ///
    /// Only one pending invitation may exist per team and address.
    pub async fn send(
        users: &dyn UserStore,
        teams: &dyn TeamStore,
        invitations: &dyn InvitationStore,
        data: InvitationData,
    ) -> Result<Invitation, TeamFeatureError> {
        TeamService::get(teams, data.team_id).await?;
        require_user(users, data.invited_by).await?;

        let email = data.email.to_lowercase();
        if invitations
            .find_pending(data.team_id, &email)
            .await?
            .is_some()
        {
            return Err(DomainError::InvitationAlreadySent.into());
        }

        let invitation = invitations
            .insert(InvitationData { email, ..data })
            .await?;

        info!(
            invitation_id = %invitation.id,
            team_id = %invitation.team_id,
            invited_by = %invitation.invited_by,
            "Sent invitation"
        );

        Ok(invitation)
    }

    /// Get an invitation by ID
    pub async fn get(
        invitations: &dyn InvitationStore,
        id: Uuid,
    ) -> Result<Invitation, TeamFeatureError> {
        invitations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InvitationNotFound(id.to_string()).into())
    }

    /// Invitations of a team, newest first
    pub async fn list_for_team(
        teams: &dyn TeamStore,
        invitations: &dyn InvitationStore,
        team_id: Uuid,
    ) -> Result<Vec<Invitation>, TeamFeatureError> {
        TeamService::get(teams, team_id).await?;
        Ok(invitations.list_for_team(team_id).await?)
    }

    /// Accept a pending invitation on behalf of the invited account
    ///
    /// Existing members keep their role. The membership and the status are
    /// written separately, not in one transaction. If the status write fails
    /// the invitation stays pending with the membership in place, and calling
    /// `accept` again completes it without a second membership.
    pub async fn accept(
        users: &dyn UserStore,
        teams: &dyn TeamStore,
        invitations: &dyn InvitationStore,
        id: Uuid,
    ) -> Result<(Invitation, TeamMember), TeamFeatureError> {
        let invitation = Self::pending(invitations, id).await?;

        let user = users
            .find_by_email(&invitation.email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(invitation.email.clone()))?;

        let member = match teams.find_member(invitation.team_id, user.id).await? {
            Some(existing) => existing,
            None => {
                teams
                    .add_member(invitation.team_id, user.id, TeamRole::Member)
                    .await?
            }
        };

        let accepted = Self::answer(invitations, id, InvitationStatus::Accepted).await?;

        info!(
            invitation_id = %id,
            team_id = %member.team_id,
            user_id = %member.user_id,
            "Accepted invitation"
        );

        Ok((accepted, member))
    }

    /// Decline a pending invitation
    pub async fn decline(
        invitations: &dyn InvitationStore,
        id: Uuid,
    ) -> Result<Invitation, TeamFeatureError> {
        Self::pending(invitations, id).await?;
        let declined = Self::answer(invitations, id, InvitationStatus::Declined).await?;

        info!(invitation_id = %id, "Declined invitation");

        Ok(declined)
    }

    /// Answered invitations are treated as gone
    async fn pending(
        invitations: &dyn InvitationStore,
        id: Uuid,
    ) -> Result<Invitation, TeamFeatureError> {
        let invitation = Self::get(invitations, id).await?;
        if invitation.status != InvitationStatus::Pending {
            return Err(DomainError::InvitationNotFound(id.to_string()).into());
        }
        Ok(invitation)
    }

    async fn answer(
        invitations: &dyn InvitationStore,
        id: Uuid,
        status: InvitationStatus,
    ) -> Result<Invitation, TeamFeatureError> {
        invitations
            .set_status(id, status)
            .await?
            .ok_or_else(|| DomainError::InvitationNotFound(id.to_string()).into())
    }
}
