use domain::{DomainError, StoreError, ValidationFailure};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserFeatureError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

/// Uniqueness conflicts reported by the store are domain errors
impl From<StoreError> for UserFeatureError {
    fn from(err: StoreError) -> Self {
        match err.into_domain() {
            Ok(domain) => Self::Domain(domain),
            Err(store) => Self::Store(store),
        }
    }
}
