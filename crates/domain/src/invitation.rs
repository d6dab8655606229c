use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::StoreError;
use crate::user::EMAIL;
use crate::validation::{Field, Schema};

const TEAM_ID: Field = Field::id("teamId");
const INVITED_BY: Field = Field::id("invitedBy");

/// Persisted invitation row
pub const INVITATION_SCHEMA: Schema = Schema {
    name: "invitation",
    fields: &[
        Field::id("id"),
        TEAM_ID,
        EMAIL,
        INVITED_BY,
        Field::one_of("status", "invitation status", InvitationStatus::NAMES),
        Field::timestamp("createdAt"),
        Field::timestamp("updatedAt"),
    ],
};

/// Caller-supplied invitation fields
pub const INVITATION_DATA_SCHEMA: Schema = Schema {
    name: "invitationData",
    fields: &[TEAM_ID, EMAIL, INVITED_BY],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    pub const ALL: [InvitationStatus; 3] = [
        InvitationStatus::Pending,
        InvitationStatus::Accepted,
        InvitationStatus::Declined,
    ];
    pub const NAMES: &'static [&'static str] = &["PENDING", "ACCEPTED", "DECLINED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "PENDING",
            InvitationStatus::Accepted => "ACCEPTED",
            InvitationStatus::Declined => "DECLINED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(InvitationStatus::Pending),
            "ACCEPTED" => Some(InvitationStatus::Accepted),
            "DECLINED" => Some(InvitationStatus::Declined),
            _ => None,
        }
    }
}

/// Invitation of an email address into a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: Uuid,
    pub team_id: Uuid,
    pub email: String,
    pub invited_by: Uuid,
    pub status: InvitationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated invitation input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationData {
    pub team_id: Uuid,
    pub email: String,
    pub invited_by: Uuid,
}

/// Persistence port for invitations
#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Insert a new invitation in the `PENDING` state
    async fn insert(&self, data: InvitationData) -> Result<Invitation, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invitation>, StoreError>;

    /// Pending invitation for the same team and email, if any
    async fn find_pending(
        &self,
        team_id: Uuid,
        email: &str,
    ) -> Result<Option<Invitation>, StoreError>;

    async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Invitation>, StoreError>;

    async fn set_status(
        &self,
        id: Uuid,
        status: InvitationStatus,
    ) -> Result<Option<Invitation>, StoreError>;
}
