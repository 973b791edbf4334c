//! Route definitions for public share access.

use axum::routing::get;
use axum::Router;

use crate::handlers::share;
use crate::state::AppState;

/// Routes mounted at `/share`.
///
/// ```text
/// GET /{token}    -> get_shared_prompt (public, no auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/share/{token}", get(share::get_shared_prompt))
}
