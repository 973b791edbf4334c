//! User models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vibecoding_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
///
/// `password_hash` is an Argon2id PHC string; it never leaves the backend
/// (response types in the API layer expose only public fields).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new user record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}
