//! Domain error taxonomy shared by every crate in the workspace.
//!
//! The API layer maps each variant to an HTTP status; see
//! `vibecoding-api::error`.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a content rule (length, charset, status transition).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with current state, e.g. the
    /// concurrent-generation guard.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but does not own the entity.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure; details are logged, not exposed.
    #[error("Internal error: {0}")]
    Internal(String),
}
