//! Repository for the `prompt_versions` table.
//!
//! The table is an append-only log. Snapshots are only ever inserted from
//! inside a `PromptRepo` transaction that holds the owning prompt row
//! locked, which serializes numbering per prompt: version numbers form a
//! contiguous run starting at 1 with no gaps or duplicates.

use sqlx::{PgExecutor, PgPool};
use vibecoding_core::types::DbId;

use crate::models::prompt::Prompt;
use crate::models::prompt_version::PromptVersion;

/// Column list for prompt_versions queries.
const COLUMNS: &str = "id, prompt_id, version_number, prompt_text, generated_content, created_at";

/// Read and append operations for prompt versions.
pub struct PromptVersionRepo;

impl PromptVersionRepo {
    /// Append a snapshot of the given prompt's current text and generated
    /// content, auto-incrementing the version number for that prompt.
    ///
    /// Callers must hold the prompt row locked (`SELECT ... FOR UPDATE`)
    /// in the same transaction; `executor` is the transaction connection.
    pub async fn insert_snapshot<'e, E>(
        executor: E,
        prompt: &Prompt,
    ) -> Result<PromptVersion, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO prompt_versions
                (prompt_id, version_number, prompt_text, generated_content)
             VALUES ($1,
                     COALESCE((SELECT MAX(version_number) FROM prompt_versions WHERE prompt_id = $1), 0) + 1,
                     $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(prompt.id)
            .bind(&prompt.prompt_text)
            .bind(&prompt.generated_content)
            .fetch_one(executor)
            .await
    }

    /// List all versions of a prompt, oldest first.
    pub async fn list_for_prompt(
        pool: &PgPool,
        prompt_id: DbId,
    ) -> Result<Vec<PromptVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_versions
             WHERE prompt_id = $1
             ORDER BY version_number ASC"
        );
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(prompt_id)
            .fetch_all(pool)
            .await
    }

    /// Find a specific version by prompt and version number.
    pub async fn find_by_prompt_and_number<'e, E>(
        executor: E,
        prompt_id: DbId,
        version_number: i32,
    ) -> Result<Option<PromptVersion>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_versions
             WHERE prompt_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, PromptVersion>(&query)
            .bind(prompt_id)
            .bind(version_number)
            .fetch_optional(executor)
            .await
    }

    /// Count the versions recorded for a prompt.
    pub async fn count_for_prompt(pool: &PgPool, prompt_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM prompt_versions WHERE prompt_id = $1")
                .bind(prompt_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
