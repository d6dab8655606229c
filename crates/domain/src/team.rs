use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::StoreError;
use crate::validation::{Field, Schema};

const NAME: Field = Field::bounded("name", 50, "name must be at most 50 characters");
const DESCRIPTION: Field = Field::text("description");
const LEADER_ID: Field = Field::id("leaderId").nullable();
const USER_ID: Field = Field::id("userId");
const MEMBER_ROLE: Field = Field::one_of("role", "team role", TeamRole::NAMES);

/// Persisted team row
pub const TEAM_SCHEMA: Schema = Schema {
    name: "team",
    fields: &[
        Field::id("id"),
        NAME,
        DESCRIPTION,
        LEADER_ID,
        Field::timestamp("createdAt"),
        Field::timestamp("updatedAt"),
    ],
};

/// Caller-supplied team fields for create and update
pub const TEAM_DATA_SCHEMA: Schema = Schema {
    name: "teamData",
    fields: &[NAME, DESCRIPTION, LEADER_ID],
};

/// Persisted membership record
pub const TEAM_MEMBER_SCHEMA: Schema = Schema {
    name: "teamMember",
    fields: &[
        Field::id("teamId"),
        USER_ID,
        MEMBER_ROLE,
        Field::timestamp("joinedAt"),
    ],
};

/// Membership payload; the team comes from the route
pub const TEAM_MEMBER_DATA_SCHEMA: Schema = Schema {
    name: "teamMemberData",
    fields: &[USER_ID, MEMBER_ROLE],
};

/// Role of a user inside a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamRole {
    Owner,
    Admin,
    Member,
}

impl TeamRole {
    pub const ALL: [TeamRole; 3] = [TeamRole::Owner, TeamRole::Admin, TeamRole::Member];
    pub const NAMES: &'static [&'static str] = &["OWNER", "ADMIN", "MEMBER"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Owner => "OWNER",
            TeamRole::Admin => "ADMIN",
            TeamRole::Member => "MEMBER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OWNER" => Some(TeamRole::Owner),
            "ADMIN" => Some(TeamRole::Admin),
            "MEMBER" => Some(TeamRole::Member),
            _ => None,
        }
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub leader_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated team input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    pub name: String,
    pub description: String,
    pub leader_id: Option<Uuid>,
}

/// Membership of a user in a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: TeamRole,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

/// Validated membership input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberData {
    pub user_id: Uuid,
    pub role: TeamRole,
}

/// Persistence port for teams and their memberships
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn insert(&self, data: TeamData) -> Result<Team, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, StoreError>;

    async fn list(&self) -> Result<Vec<Team>, StoreError>;

    async fn update(&self, id: Uuid, data: TeamData) -> Result<Option<Team>, StoreError>;

    async fn add_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<TeamMember, StoreError>;

    async fn find_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<TeamMember>, StoreError>;

    async fn members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, StoreError>;
}
