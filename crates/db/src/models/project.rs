//! Project models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vibecoding_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub idea_text: Option<String>,
    pub vibe_coding_tags: Option<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub idea_text: Option<String>,
    pub vibe_coding_tags: Option<Vec<String>>,
}

/// Patch for an existing project; `None` fields are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub idea_text: Option<String>,
    pub vibe_coding_tags: Option<Vec<String>>,
}
