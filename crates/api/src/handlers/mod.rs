//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input via `vibecoding_core`, delegate persistence to
//! the repositories in `vibecoding_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod generation;
pub mod project;
pub mod prompt;
pub mod share;
pub mod version;
