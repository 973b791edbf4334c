//! Route tree for the API.

pub mod auth;
pub mod health;
pub mod project;
pub mod prompt;
pub mod share;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{project_id}/prompts                   list, create
///
/// /prompts/{id}                                    get, update, delete
/// /prompts/{id}/generate                           run generation (POST)
/// /prompts/{id}/watch                              status long-poll (GET)
/// /prompts/{id}/versions                           version history (GET)
/// /prompts/{id}/versions/{number}/restore          restore snapshot (POST)
/// /prompts/{id}/share                              issue, revoke share link
///
/// /share/{token}                                   public shared prompt (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(project::router())
        .merge(prompt::router())
        .merge(share::router())
}
