use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::StoreError;
use crate::auth::{PROVIDER, Provider, ROLE, Role};
use crate::validation::{Field, Schema};

pub(crate) const EMAIL: Field = Field::email("email", 254);
const USERNAME: Field = Field::bounded(
    "username",
    50,
    "username must be at most 50 characters",
);

/// Persisted user record
pub const USER_SCHEMA: Schema = Schema {
    name: "user",
    fields: &[
        Field::id("id"),
        EMAIL,
        USERNAME,
        ROLE,
        PROVIDER,
        Field::timestamp("createdAt"),
        Field::timestamp("updatedAt"),
    ],
};

/// Registration payload
pub const REGISTER_SCHEMA: Schema = Schema {
    name: "register",
    fields: &[EMAIL, USERNAME, PROVIDER],
};

/// Username change payload
pub const RENAME_SCHEMA: Schema = Schema {
    name: "rename",
    fields: &[USERNAME],
};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub provider: Provider,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Validated registration input
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub provider: Provider,
}

/// Validated rename input
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenameUser {
    pub username: String,
}

/// Fields a store needs to create a user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub role: Role,
    pub provider: Provider,
}

/// Persistence port for users
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn update_username(&self, id: Uuid, username: &str)
    -> Result<Option<User>, StoreError>;
}
