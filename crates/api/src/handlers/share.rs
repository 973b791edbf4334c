//! Handlers for share links: create, revoke, and public access.
//!
//! A share token grants unauthenticated read-only access to exactly one
//! prompt. Tokens are minted once and reused on repeat calls; a cleared
//! token is gone for good.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vibecoding_core::error::CoreError;
use vibecoding_core::prompt::new_share_token;
use vibecoding_core::types::DbId;
use vibecoding_db::models::prompt::Prompt;
use vibecoding_db::repositories::PromptRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::prompt::ensure_owned_prompt;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /prompts/{id}/share`.
#[derive(Debug, Serialize)]
pub struct ShareLinkResponse {
    pub prompt_id: DbId,
    pub share_token: String,
}

/// Public view of a shared prompt; omits owner and project identifiers.
#[derive(Debug, Serialize)]
pub struct SharedPrompt {
    pub prompt_text: String,
    pub generated_content: Option<String>,
    pub prompt_type: Option<String>,
    pub status: String,
    pub generated_at: Option<vibecoding_core::types::Timestamp>,
}

impl From<Prompt> for SharedPrompt {
    fn from(prompt: Prompt) -> Self {
        SharedPrompt {
            prompt_text: prompt.prompt_text,
            generated_content: prompt.generated_content,
            prompt_type: prompt.prompt_type,
            status: prompt.status,
            generated_at: prompt.generated_at,
        }
    }
}

/// POST /api/v1/prompts/{id}/share
///
/// Issue a share token, or return the existing one (idempotent).
pub async fn create_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShareLinkResponse>>> {
    ensure_owned_prompt(&state, id, auth.user_id).await?;

    let candidate = new_share_token();
    let prompt = PromptRepo::ensure_share_token(&state.pool, id, &candidate)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    let share_token = prompt
        .share_token
        .ok_or_else(|| AppError::InternalError("Share token missing after issue".into()))?;

    tracing::info!(prompt_id = id, user_id = auth.user_id, "Share link issued");

    Ok(Json(DataResponse {
        data: ShareLinkResponse {
            prompt_id: id,
            share_token,
        },
    }))
}

/// DELETE /api/v1/prompts/{id}/share
///
/// Revoke a prompt's share token. The token is never reinstated; a later
/// re-share mints a fresh one.
pub async fn revoke_share_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owned_prompt(&state, id, auth.user_id).await?;

    let cleared = PromptRepo::clear_share_token(&state.pool, id).await?;
    if cleared {
        tracing::info!(prompt_id = id, user_id = auth.user_id, "Share link revoked");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/share/{token}
///
/// Public, unauthenticated read-only access to one shared prompt.
/// Unknown and cleared tokens are indistinguishable: both 404.
pub async fn get_shared_prompt(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<SharedPrompt>>> {
    let prompt = PromptRepo::find_by_share_token(&state.pool, &token)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Shared prompt not found or token is invalid".to_string())
        })?;

    Ok(Json(DataResponse {
        data: SharedPrompt::from(prompt),
    }))
}
