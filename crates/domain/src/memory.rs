//! In-memory store adapters for tests.
//!
//! Unique constraints from `migrations/` are enforced the same way, so a
//! duplicate insert fails with [`StoreError::Conflict`].

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{ErrorCode, StoreError};
use crate::invitation::{Invitation, InvitationData, InvitationStatus, InvitationStore};
use crate::project::{Project, ProjectData, ProjectStore};
use crate::team::{Team, TeamData, TeamMember, TeamRole, TeamStore};
use crate::user::{NewUser, User, UserStore};

/// Every port backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    teams: RwLock<HashMap<Uuid, Team>>,
    members: RwLock<Vec<TeamMember>>,
    invitations: RwLock<HashMap<Uuid, Invitation>>,
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("poisoned lock".to_string()))
}

/// Newest first, matching the Postgres adapters
fn newest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> OffsetDateTime) -> Vec<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = write(&self.users)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(ErrorCode::EmailConflict));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(ErrorCode::UsernameConflict));
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            username: user.username,
            role: user.role,
            provider: user.provider,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users)?
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = read(&self.users)?.values().cloned().collect();
        Ok(newest_first(users, |user: &User| user.created_at))
    }

    async fn update_username(
        &self,
        id: Uuid,
        username: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut users = write(&self.users)?;
        if users
            .values()
            .any(|u| u.id != id && u.username == username)
        {
            return Err(StoreError::Conflict(ErrorCode::UsernameConflict));
        }
        Ok(users.get_mut(&id).map(|user| {
            user.username = username.to_string();
            user.updated_at = OffsetDateTime::now_utc();
            user.clone()
        }))
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn insert(&self, data: TeamData) -> Result<Team, StoreError> {
        let now = OffsetDateTime::now_utc();
        let team = Team {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            leader_id: data.leader_id,
            created_at: now,
            updated_at: now,
        };
        write(&self.teams)?.insert(team.id, team.clone());
        Ok(team)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, StoreError> {
        Ok(read(&self.teams)?.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Team>, StoreError> {
        let teams = read(&self.teams)?.values().cloned().collect();
        Ok(newest_first(teams, |team: &Team| team.created_at))
    }

    async fn update(&self, id: Uuid, data: TeamData) -> Result<Option<Team>, StoreError> {
        let mut teams = write(&self.teams)?;
        Ok(teams.get_mut(&id).map(|team| {
            team.name = data.name;
            team.description = data.description;
            team.leader_id = data.leader_id;
            team.updated_at = OffsetDateTime::now_utc();
            team.clone()
        }))
    }

    async fn add_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, StoreError> {
        let mut members = write(&self.members)?;
        if let Some(existing) = members
            .iter_mut()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
        {
            existing.role = role;
            return Ok(existing.clone());
        }

        let member = TeamMember {
            team_id,
            user_id,
            role,
            joined_at: OffsetDateTime::now_utc(),
        };
        members.push(member.clone());
        Ok(member)
    }

    async fn find_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>, StoreError> {
        Ok(read(&self.members)?
            .iter()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
            .cloned())
    }

    async fn members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, StoreError> {
        Ok(read(&self.members)?
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InvitationStore for MemoryStore {
    async fn insert(&self, data: InvitationData) -> Result<Invitation, StoreError> {
        let mut invitations = write(&self.invitations)?;
        if invitations.values().any(|i| {
            i.team_id == data.team_id && i.email == data.email && i.status == InvitationStatus::Pending
        }) {
            return Err(StoreError::Conflict(ErrorCode::InvitationConflict));
        }

        let now = OffsetDateTime::now_utc();
        let invitation = Invitation {
            id: Uuid::new_v4(),
            team_id: data.team_id,
            email: data.email,
            invited_by: data.invited_by,
            status: InvitationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        invitations.insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invitation>, StoreError> {
        Ok(read(&self.invitations)?.get(&id).cloned())
    }

    async fn find_pending(
        &self,
        team_id: Uuid,
        email: &str,
    ) -> Result<Option<Invitation>, StoreError> {
        Ok(read(&self.invitations)?
            .values()
            .find(|i| {
                i.team_id == team_id && i.email == email && i.status == InvitationStatus::Pending
            })
            .cloned())
    }

    async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Invitation>, StoreError> {
        let invitations = read(&self.invitations)?
            .values()
            .filter(|i| i.team_id == team_id)
            .cloned()
            .collect();
        Ok(newest_first(invitations, |i: &Invitation| i.created_at))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> Result<Option<Invitation>, StoreError> {
        let mut invitations = write(&self.invitations)?;
        Ok(invitations.get_mut(&id).map(|invitation| {
            invitation.status = status;
            invitation.updated_at = OffsetDateTime::now_utc();
            invitation.clone()
        }))
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert(&self, data: ProjectData) -> Result<Project, StoreError> {
        let now = OffsetDateTime::now_utc();
        let project = Project {
            id: Uuid::new_v4(),
            team_id: data.team_id,
            name: data.name,
            description: data.description,
            created_at: now,
            updated_at: now,
        };
        write(&self.projects)?.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(read(&self.projects)?.get(&id).cloned())
    }

    async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Project>, StoreError> {
        let projects = read(&self.projects)?
            .values()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        Ok(newest_first(projects, |p: &Project| p.created_at))
    }
}
