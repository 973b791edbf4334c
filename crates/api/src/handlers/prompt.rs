//! Handlers for prompt CRUD.
//!
//! Text edits go through the versioned update path: the pre-edit state is
//! snapshotted in the same transaction that applies the change, and the
//! status resets to `pending`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vibecoding_core::error::CoreError;
use vibecoding_core::lifecycle::{self, PromptStatus};
use vibecoding_core::prompt::{sanitize_prompt_text, validate_prompt_text, validate_prompt_type};
use vibecoding_core::types::DbId;
use vibecoding_db::models::prompt::{
    CreatePrompt, CreatePromptRequest, Prompt, PromptChanges, UpdatePromptRequest,
};
use vibecoding_db::repositories::PromptRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::ensure_owned_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load a prompt and verify the caller owns it.
///
/// Shared by every prompt-scoped handler (CRUD, generation, versions,
/// sharing).
pub async fn ensure_owned_prompt(
    state: &AppState,
    prompt_id: DbId,
    user_id: DbId,
) -> AppResult<Prompt> {
    let prompt = PromptRepo::find_by_id(&state.pool, prompt_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        }))?;

    if prompt.user_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not enough permissions".into(),
        )));
    }

    Ok(prompt)
}

/// POST /api/v1/projects/{project_id}/prompts
///
/// Create a prompt under a project the caller owns. The prompt starts in
/// `pending` with no versions.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePromptRequest>,
) -> AppResult<(StatusCode, Json<Prompt>)> {
    ensure_owned_project(&state, project_id, auth.user_id).await?;

    let text = sanitize_prompt_text(&input.prompt_text);
    validate_prompt_text(&text)?;
    if let Some(ref prompt_type) = input.prompt_type {
        validate_prompt_type(prompt_type)?;
    }

    let prompt = PromptRepo::create(
        &state.pool,
        &CreatePrompt {
            project_id,
            user_id: auth.user_id,
            prompt_text: text,
            prompt_type: input.prompt_type,
        },
    )
    .await?;

    tracing::info!(
        prompt_id = prompt.id,
        project_id,
        user_id = auth.user_id,
        "Prompt created"
    );

    Ok((StatusCode::CREATED, Json(prompt)))
}

/// GET /api/v1/projects/{project_id}/prompts
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Prompt>>> {
    ensure_owned_project(&state, project_id, auth.user_id).await?;

    let prompts = PromptRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(prompts))
}

/// GET /api/v1/prompts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Prompt>> {
    let prompt = ensure_owned_prompt(&state, id, auth.user_id).await?;
    Ok(Json(prompt))
}

/// PUT /api/v1/prompts/{id}
///
/// Update a prompt's text, type, or status. A changed text is snapshotted
/// before the write and resets the status to `pending`; a requested status
/// must be a legal manual transition.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromptRequest>,
) -> AppResult<Json<Prompt>> {
    let current = ensure_owned_prompt(&state, id, auth.user_id).await?;

    let new_text = match input.prompt_text {
        Some(ref raw) => {
            let text = sanitize_prompt_text(raw);
            validate_prompt_text(&text)?;
            Some(text)
        }
        None => None,
    };

    if let Some(ref prompt_type) = input.prompt_type {
        validate_prompt_type(prompt_type)?;
    }

    let new_status = match input.status {
        Some(ref requested) => {
            let requested = PromptStatus::parse(requested)?;
            let current_status = PromptStatus::parse(&current.status)?;
            lifecycle::can_set_status(current_status, requested)?;
            Some(requested.as_str().to_string())
        }
        None => None,
    };

    let changes = PromptChanges {
        prompt_text: new_text,
        prompt_type: input.prompt_type,
        status: new_status,
    };

    let (updated, snapshotted) = PromptRepo::update_versioned(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    if snapshotted {
        tracing::info!(prompt_id = id, user_id = auth.user_id, "Prompt text edited");
    }

    Ok(Json(updated))
}

/// DELETE /api/v1/prompts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owned_prompt(&state, id, auth.user_id).await?;

    let deleted = PromptRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(prompt_id = id, user_id = auth.user_id, "Prompt deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))
    }
}
