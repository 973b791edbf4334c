//! Handlers for prompt version history: list and restore.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vibecoding_core::error::CoreError;
use vibecoding_core::types::DbId;
use vibecoding_db::models::prompt::Prompt;
use vibecoding_db::models::prompt_version::PromptVersion;
use vibecoding_db::repositories::{PromptRepo, PromptVersionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::prompt::ensure_owned_prompt;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/prompts/{id}/versions
///
/// List a prompt's version history, oldest first.
pub async fn list_versions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PromptVersion>>>> {
    ensure_owned_prompt(&state, id, auth.user_id).await?;

    let versions = PromptVersionRepo::list_for_prompt(&state.pool, id).await?;

    tracing::debug!(prompt_id = id, count = versions.len(), "Listed prompt versions");

    Ok(Json(DataResponse { data: versions }))
}

/// POST /api/v1/prompts/{id}/versions/{version_number}/restore
///
/// Restore the live prompt from a version snapshot. The pre-restore state
/// is snapshotted first, so the restore is itself undoable; no version is
/// deleted or renumbered.
pub async fn restore_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, version_number)): Path<(DbId, i32)>,
) -> AppResult<(StatusCode, Json<DataResponse<Prompt>>)> {
    ensure_owned_prompt(&state, id, auth.user_id).await?;

    let restored = PromptRepo::restore_version(&state.pool, id, version_number)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PromptVersion",
            id: version_number as DbId,
        }))?;

    tracing::info!(
        prompt_id = id,
        version_number,
        user_id = auth.user_id,
        status = %restored.status,
        "Prompt restored from version"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: restored })))
}
