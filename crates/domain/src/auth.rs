use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::EMAIL;
use crate::validation::{Field, Schema};

/// Account-wide role carried in token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];
    pub const NAMES: &'static [&'static str] = &["USER", "ADMIN"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Identity provider an account signed up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    Local,
    Google,
    Github,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Local, Provider::Google, Provider::Github];
    pub const NAMES: &'static [&'static str] = &["LOCAL", "GOOGLE", "GITHUB"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "LOCAL",
            Provider::Google => "GOOGLE",
            Provider::Github => "GITHUB",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOCAL" => Some(Provider::Local),
            "GOOGLE" => Some(Provider::Google),
            "GITHUB" => Some(Provider::Github),
            _ => None,
        }
    }
}

pub(crate) const ROLE: Field = Field::one_of("role", "role", Role::NAMES);
pub(crate) const PROVIDER: Field = Field::one_of("provider", "provider", Provider::NAMES);

/// Claims an access token carries about its subject
pub const TOKEN_PAYLOAD_SCHEMA: Schema = Schema {
    name: "tokenPayload",
    fields: &[Field::id("sub"), EMAIL, ROLE, PROVIDER],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub provider: Provider,
}
