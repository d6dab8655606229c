use domain::{
    DomainError, NewUser, RegisterUser, RenameUser, Role, TOKEN_PAYLOAD_SCHEMA, TokenPayload,
    User, UserStore,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::UserFeatureError;

/// Service for user-related operations
pub struct UserService;

impl UserService {
    /// Register a new account
    ///
    /// Emails are compared case-insensitively and stored lowercased.
    pub async fn register(
        store: &dyn UserStore,
        input: RegisterUser,
    ) -> Result<User, UserFeatureError> {
        let email = input.email.to_lowercase();

        if store.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyUsed.into());
        }

        if store.find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::UsernameAlreadyUsed.into());
        }

        let user = store
            .insert(NewUser {
                email,
                username: input.username,
                role: Role::User,
                provider: input.provider,
            })
            .await?;

        info!(
            user_id = %user.id,
            username = %user.username,
            provider = user.provider.as_str(),
            "Registered user"
        );

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(store: &dyn UserStore, id: Uuid) -> Result<User, UserFeatureError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()).into())
    }

    /// Get a user by email
    pub async fn get_by_email(
        store: &dyn UserStore,
        email: &str,
    ) -> Result<Option<User>, UserFeatureError> {
        Ok(store.find_by_email(&email.to_lowercase()).await?)
    }

    /// List all users
    pub async fn list(store: &dyn UserStore) -> Result<Vec<User>, UserFeatureError> {
        Ok(store.list().await?)
    }

    /// Change a user's username
    pub async fn rename(
        store: &dyn UserStore,
        id: Uuid,
        input: RenameUser,
    ) -> Result<User, UserFeatureError> {
        let user = Self::get(store, id).await?;
        if user.username == input.username {
            return Ok(user);
        }

        if let Some(owner) = store.find_by_username(&input.username).await? {
            if owner.id != id {
                return Err(DomainError::UsernameAlreadyUsed.into());
            }
        }

        let renamed = store
            .update_username(id, &input.username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;

        info!(user_id = %renamed.id, username = %renamed.username, "Renamed user");

        Ok(renamed)
    }

    /// Claims an external issuer signs into an access token for `user`
    pub fn token_payload(user: &User) -> TokenPayload {
        TokenPayload {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            provider: user.provider,
        }
    }

    /// Resolve decoded token claims to the user they name
    pub async fn resolve_principal(
        store: &dyn UserStore,
        claims: &Value,
    ) -> Result<User, UserFeatureError> {
        let payload: TokenPayload = TOKEN_PAYLOAD_SCHEMA.parse(claims)?;
        Self::get(store, payload.sub).await
    }
}
