use crate::types::DbId;

/// Opaque persistence failure carried through [`CoreError::Store`].
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{entity} with id {id} does not belong to this user")]
    NotOwner { entity: &'static str, id: DbId },

    #[error("Invalid visit_status '{0}': must be to_visit or visited")]
    InvalidVisitStatus(String),

    #[error("Cafe listing {listing_id} must be marked visited before rating")]
    CafeNotVisited { listing_id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap an underlying persistence error without reinterpreting it.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
