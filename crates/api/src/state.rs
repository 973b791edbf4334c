use std::sync::Arc;

use vibecoding_llm::GenerationGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vibecoding_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The external text-generation service.
    pub gateway: Arc<dyn GenerationGateway>,
}
