//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Compound lifecycle
//! mutations run as single transactions with the prompt row locked,
//! so no caller can observe a snapshot without its matching live-row
//! update.

pub mod project_repo;
pub mod prompt_repo;
pub mod prompt_version_repo;
pub mod user_repo;

pub use project_repo::ProjectRepo;
pub use prompt_repo::PromptRepo;
pub use prompt_version_repo::PromptVersionRepo;
pub use user_repo::UserRepo;
