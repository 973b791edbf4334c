//! Handlers for prompt generation and the status long-poll.
//!
//! Generation runs within the request: the prompt is moved to `generating`
//! by an atomic conditional update (the concurrent-generation guard), the
//! gateway is called, and the outcome lands as `completed` (with a version
//! snapshot) or `failed` (no snapshot, prior content untouched).

use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vibecoding_core::error::CoreError;
use vibecoding_core::lifecycle::{self, PromptStatus};
use vibecoding_core::types::DbId;
use vibecoding_db::models::prompt::Prompt;
use vibecoding_db::repositories::PromptRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::prompt::ensure_owned_prompt;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Interval between status polls inside the watch long-poll.
const WATCH_POLL_INTERVAL_MS: u64 = 500;

/// Default and maximum duration of one watch call in seconds.
const DEFAULT_WATCH_TIMEOUT_SECS: u64 = 25;
const MAX_WATCH_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response body for `POST /prompts/{id}/generate`.
///
/// `generation_error` is a sanitized failure category
/// (`rate_limited` | `timeout` | `upstream_error`), present only when the
/// prompt ended up `failed`; the underlying cause is logged server-side.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: Prompt,
    pub generation_error: Option<&'static str>,
}

/// Query parameters for the watch long-poll.
#[derive(Debug, Deserialize)]
pub struct WatchParams {
    /// The status the client last observed; the call returns as soon as
    /// the stored status differs.
    pub last_status: String,
    /// How long to wait before returning the unchanged state.
    pub timeout_secs: Option<u64>,
}

// ---------------------------------------------------------------------------
// POST /prompts/{id}/generate
// ---------------------------------------------------------------------------

/// Run generation for a prompt.
///
/// Fails fast with 409 if a generation is already in flight. A gateway
/// failure is not an HTTP error: the prompt lands in `failed` and the
/// response carries the failure category.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GenerateResponse>>> {
    let prompt = ensure_owned_prompt(&state, id, auth.user_id).await?;

    let current_status = PromptStatus::parse(&prompt.status)?;
    lifecycle::can_start_generation(current_status)?;

    // Atomic check-and-set; a racing request loses here even if both
    // passed the status check above.
    let generating = PromptRepo::try_begin_generation(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Generation is already in progress for this prompt".to_string(),
            ))
        })?;

    tracing::info!(prompt_id = id, user_id = auth.user_id, "Generation started");

    match state.gateway.submit(&generating.prompt_text).await {
        Ok(generated_text) => {
            let completed = PromptRepo::complete_generation(&state.pool, id, &generated_text)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Prompt",
                    id,
                }))?;

            tracing::info!(
                prompt_id = id,
                user_id = auth.user_id,
                content_length = generated_text.len(),
                "Generation completed"
            );

            Ok(Json(DataResponse {
                data: GenerateResponse {
                    prompt: completed,
                    generation_error: None,
                },
            }))
        }
        Err(gateway_err) => {
            // Record the failure; the cause stays in the logs.
            tracing::warn!(
                prompt_id = id,
                user_id = auth.user_id,
                error = %gateway_err,
                "Generation failed"
            );

            PromptRepo::fail_generation(&state.pool, id).await?;

            let failed = PromptRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Prompt",
                    id,
                }))?;

            Ok(Json(DataResponse {
                data: GenerateResponse {
                    prompt: failed,
                    generation_error: Some(gateway_err.category()),
                },
            }))
        }
    }
}

// ---------------------------------------------------------------------------
// GET /prompts/{id}/watch
// ---------------------------------------------------------------------------

/// Long-poll a prompt's status.
///
/// Returns the prompt as soon as its status differs from `last_status`,
/// or the current state once the (bounded) timeout elapses. The contract
/// is stateless: a client resumes by passing whatever status it last saw.
pub async fn watch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<WatchParams>,
) -> AppResult<Json<DataResponse<Prompt>>> {
    ensure_owned_prompt(&state, id, auth.user_id).await?;

    let timeout_secs = params
        .timeout_secs
        .unwrap_or(DEFAULT_WATCH_TIMEOUT_SECS)
        .min(MAX_WATCH_TIMEOUT_SECS);
    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);

    loop {
        let prompt = PromptRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Prompt",
                id,
            }))?;

        if prompt.status != params.last_status || tokio::time::Instant::now() >= deadline {
            return Ok(Json(DataResponse { data: prompt }));
        }

        tokio::time::sleep(Duration::from_millis(WATCH_POLL_INTERVAL_MS)).await;
    }
}
