//! Prompt version models.
//!
//! Versions are an append-only log: rows are inserted by the snapshot
//! paths in `PromptRepo` and never updated or deleted individually (they
//! go away only when their prompt is deleted).

use serde::Serialize;
use sqlx::FromRow;
use vibecoding_core::types::{DbId, Timestamp};

/// A prompt version row from the `prompt_versions` table: an immutable
/// snapshot of a prompt's text and generated content at mutation time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptVersion {
    pub id: DbId,
    pub prompt_id: DbId,
    pub version_number: i32,
    pub prompt_text: String,
    pub generated_content: Option<String>,
    pub created_at: Timestamp,
}
