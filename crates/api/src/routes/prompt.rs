//! Route definitions for prompt-scoped operations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, prompt, share, version};
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// ```text
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// POST   /{id}/generate                     -> generate
/// GET    /{id}/watch                        -> watch (long-poll)
/// GET    /{id}/versions                     -> list_versions
/// POST   /{id}/versions/{number}/restore    -> restore_version
/// POST   /{id}/share                        -> create_share_link
/// DELETE /{id}/share                        -> revoke_share_link
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/prompts/{id}",
            get(prompt::get_by_id)
                .put(prompt::update)
                .delete(prompt::delete),
        )
        .route("/prompts/{id}/generate", post(generation::generate))
        .route("/prompts/{id}/watch", get(generation::watch))
        .route("/prompts/{id}/versions", get(version::list_versions))
        .route(
            "/prompts/{id}/versions/{version_number}/restore",
            post(version::restore_version),
        )
        .route(
            "/prompts/{id}/share",
            post(share::create_share_link).delete(share::revoke_share_link),
        )
}
