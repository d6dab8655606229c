use domain::{DomainError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TeamFeatureError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

/// Uniqueness conflicts reported by the store are domain errors
impl From<StoreError> for TeamFeatureError {
    fn from(err: StoreError) -> Self {
        match err.into_domain() {
            Ok(domain) => Self::Domain(domain),
            Err(store) => Self::Store(store),
        }
    }
}
