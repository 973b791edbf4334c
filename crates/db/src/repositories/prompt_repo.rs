//! Repository for the `prompts` table and the prompt lifecycle mutations.
//!
//! Every recoverable mutation (text edit, successful generation, restore)
//! runs as a single transaction that locks the prompt row, appends the
//! pre-mutation snapshot to `prompt_versions`, and then updates the live
//! row. Entering `generating` goes through a conditional update so two
//! concurrent generation requests cannot both win.

use sqlx::{PgConnection, PgPool};
use vibecoding_core::lifecycle::{self, PromptStatus};
use vibecoding_core::types::DbId;

use crate::models::prompt::{CreatePrompt, Prompt, PromptChanges};
use crate::repositories::PromptVersionRepo;

/// Column list for prompts queries.
const COLUMNS: &str = "id, project_id, user_id, prompt_text, generated_content, generated_at, \
    prompt_type, status, share_token, created_at, updated_at";

/// CRUD and lifecycle operations for prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a new prompt in `pending` status with no versions.
    pub async fn create(pool: &PgPool, input: &CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts (project_id, user_id, prompt_text, prompt_type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(&input.prompt_text)
            .bind(&input.prompt_type)
            .fetch_one(pool)
            .await
    }

    /// Find a prompt by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a prompt by its share token.
    pub async fn find_by_share_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE share_token = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List a project's prompts in creation order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a prompt (versions cascade). Returns `true` if a row was
    /// deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock the prompt row for the remainder of the transaction.
    ///
    /// This is the per-prompt serialization point: every compound mutation
    /// acquires it before touching `prompt_versions` or the live row.
    async fn lock_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Apply a text/type/status change through the versioned path.
    ///
    /// When `prompt_text` differs from the stored text, the pre-edit state
    /// is snapshotted first and the status resets to `pending`; an
    /// unchanged text creates no version. Returns the updated row plus
    /// whether a snapshot was taken, or `None` if the prompt is missing.
    pub async fn update_versioned(
        pool: &PgPool,
        id: DbId,
        changes: &PromptChanges,
    ) -> Result<Option<(Prompt, bool)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };

        let text_changed = changes
            .prompt_text
            .as_deref()
            .is_some_and(|text| text != current.prompt_text);

        if text_changed {
            PromptVersionRepo::insert_snapshot(&mut *tx, &current).await?;
        }

        let new_text = changes
            .prompt_text
            .clone()
            .unwrap_or_else(|| current.prompt_text.clone());
        let new_type = changes
            .prompt_type
            .clone()
            .or_else(|| current.prompt_type.clone());
        let new_status = if text_changed {
            PromptStatus::Pending.as_str().to_string()
        } else {
            changes
                .status
                .clone()
                .unwrap_or_else(|| current.status.clone())
        };

        let query = format!(
            "UPDATE prompts SET
                prompt_text = $2,
                prompt_type = $3,
                status = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(&new_text)
            .bind(&new_type)
            .bind(&new_status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((updated, text_changed)))
    }

    /// Atomically move a prompt into `generating`.
    ///
    /// The condition on the current status is the concurrent-generation
    /// guard: of two racing calls, exactly one gets the row back and the
    /// other gets `None`.
    pub async fn try_begin_generation(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE prompts SET status = 'generating', updated_at = NOW()
             WHERE id = $1 AND status <> 'generating'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful generation: snapshot the pre-generation state,
    /// then write the generated content, stamp `generated_at`, and mark the
    /// prompt `completed`. Returns `None` if the prompt vanished.
    pub async fn complete_generation(
        pool: &PgPool,
        id: DbId,
        generated_text: &str,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };

        PromptVersionRepo::insert_snapshot(&mut *tx, &current).await?;

        let query = format!(
            "UPDATE prompts SET
                generated_content = $2,
                generated_at = NOW(),
                status = 'completed',
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(generated_text)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Record a failed generation: `generating -> failed`, no snapshot,
    /// prior generated content untouched. Returns `true` if the prompt was
    /// still in `generating`.
    pub async fn fail_generation(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE prompts SET status = 'failed', updated_at = NOW()
             WHERE id = $1 AND status = 'generating'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore the live prompt from a version snapshot.
    ///
    /// Snapshots the pre-restore state first (so the restore is itself
    /// undoable), then copies the target version's text and content onto
    /// the live row. No version is deleted or renumbered. Returns `None`
    /// when the prompt or the version number does not exist.
    pub async fn restore_version(
        pool: &PgPool,
        prompt_id: DbId,
        version_number: i32,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(current) = Self::lock_for_update(&mut *tx, prompt_id).await? else {
            return Ok(None);
        };

        let Some(target) =
            PromptVersionRepo::find_by_prompt_and_number(&mut *tx, prompt_id, version_number)
                .await?
        else {
            return Ok(None);
        };

        PromptVersionRepo::insert_snapshot(&mut *tx, &current).await?;

        let status = lifecycle::status_after_restore(target.generated_content.as_deref());

        // generated_at is cleared when the restored snapshot has no content,
        // stamped on a null -> non-null transition, preserved otherwise.
        let query = format!(
            "UPDATE prompts SET
                prompt_text = $2,
                generated_content = $3,
                generated_at = CASE
                    WHEN $3::text IS NULL THEN NULL
                    ELSE COALESCE(generated_at, NOW())
                END,
                status = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Prompt>(&query)
            .bind(prompt_id)
            .bind(&target.prompt_text)
            .bind(&target.generated_content)
            .bind(status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Attach a share token if the prompt has none, keeping any existing
    /// token (idempotent). Returns the row with whichever token won.
    pub async fn ensure_share_token(
        pool: &PgPool,
        id: DbId,
        candidate: &str,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE prompts SET share_token = COALESCE(share_token, $2)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(candidate)
            .fetch_optional(pool)
            .await
    }

    /// Clear a prompt's share token. The cleared token is discarded for
    /// good; a later re-share mints a fresh one. Returns `true` if a token
    /// was present.
    pub async fn clear_share_token(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE prompts SET share_token = NULL
             WHERE id = $1 AND share_token IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
