//! Prompt models and DTOs.
//!
//! The `status` column is TEXT; the legal values and transitions are owned
//! by `vibecoding_core::lifecycle::PromptStatus`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vibecoding_core::types::{DbId, Timestamp};

/// A prompt row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prompt {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub prompt_text: String,
    pub generated_content: Option<String>,
    pub generated_at: Option<Timestamp>,
    pub prompt_type: Option<String>,
    pub status: String,
    pub share_token: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new prompt record. The row starts in `pending`
/// with no generated content and no versions.
#[derive(Debug, Clone)]
pub struct CreatePrompt {
    pub project_id: DbId,
    pub user_id: DbId,
    pub prompt_text: String,
    pub prompt_type: Option<String>,
}

/// Changes to apply to a prompt through the versioned update path.
///
/// `prompt_text` is sanitized and validated before it gets here; a text
/// that matches the stored one creates no version snapshot.
#[derive(Debug, Clone, Default)]
pub struct PromptChanges {
    pub prompt_text: Option<String>,
    pub prompt_type: Option<String>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Request body for creating a prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromptRequest {
    pub prompt_text: String,
    pub prompt_type: Option<String>,
}

/// Request body for updating a prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePromptRequest {
    pub prompt_text: Option<String>,
    pub prompt_type: Option<String>,
    pub status: Option<String>,
}
