//! Route definitions for the `/projects` resource.
//!
//! Prompt creation and listing are nested under
//! `/projects/{project_id}/prompts`; prompt-scoped operations live under
//! `/prompts/{id}` (see [`super::prompt`]).

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, prompt};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
///
/// GET    /{project_id}/prompts        -> list_by_project
/// POST   /{project_id}/prompts        -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/projects/{project_id}/prompts",
            get(prompt::list_by_project).post(prompt::create),
        )
}
