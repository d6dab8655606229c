use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::StoreError;
use crate::validation::{Field, Schema};

const TEAM_ID: Field = Field::id("teamId");
const NAME: Field = Field::bounded("name", 50, "name must be at most 50 characters");
const DESCRIPTION: Field = Field::text("description");

/// Persisted project row
pub const PROJECT_SCHEMA: Schema = Schema {
    name: "project",
    fields: &[
        Field::id("id"),
        TEAM_ID,
        NAME,
        DESCRIPTION,
        Field::timestamp("createdAt"),
        Field::timestamp("updatedAt"),
    ],
};

/// Caller-supplied project fields
pub const PROJECT_DATA_SCHEMA: Schema = Schema {
    name: "projectData",
    fields: &[TEAM_ID, NAME, DESCRIPTION],
};

/// Project entity, owned by a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub team_id: Uuid,
    pub name: String,
    pub description: String,
}

/// Persistence port for projects
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert(&self, data: ProjectData) -> Result<Project, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    async fn list_for_team(&self, team_id: Uuid) -> Result<Vec<Project>, StoreError>;
}
