//! Prompt lifecycle state machine.
//!
//! A prompt moves between four statuses:
//!
//! ```text
//! pending ----> generating ----> completed
//!    ^              |                |
//!    |              v                |
//!    +---------- failed <-----------+ (regenerate re-enters generating)
//! ```
//!
//! `generating` doubles as the mutual-exclusion flag for in-flight
//! generation; entering it must happen through a conditional update in the
//! persistence layer, never a read-then-write.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    Pending,
    Generating,
    Completed,
    Failed,
}

impl PromptStatus {
    /// The TEXT column representation.
    pub fn as_str(self) -> &'static str {
        match self {
            PromptStatus::Pending => "pending",
            PromptStatus::Generating => "generating",
            PromptStatus::Completed => "completed",
            PromptStatus::Failed => "failed",
        }
    }

    /// Parse the TEXT column representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(PromptStatus::Pending),
            "generating" => Ok(PromptStatus::Generating),
            "completed" => Ok(PromptStatus::Completed),
            "failed" => Ok(PromptStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown prompt status: {other}"
            ))),
        }
    }
}

impl fmt::Display for PromptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a generation request may be accepted for a prompt in the
/// given status.
///
/// Only an already-running generation blocks; pending prompts start fresh,
/// failed prompts retry, completed prompts regenerate.
pub fn can_start_generation(status: PromptStatus) -> Result<(), CoreError> {
    match status {
        PromptStatus::Generating => Err(CoreError::Conflict(
            "Generation is already in progress for this prompt".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Check whether a client-requested status write is a legal manual
/// transition.
///
/// The only manual transition is a reset to `pending`; `generating`,
/// `completed`, and `failed` are owned by the generation path.
pub fn can_set_status(current: PromptStatus, requested: PromptStatus) -> Result<(), CoreError> {
    match requested {
        PromptStatus::Pending => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Cannot set status to '{requested}' directly (current status '{current}'); \
             only a reset to 'pending' is allowed"
        ))),
    }
}

/// Status of the live prompt after restoring a version snapshot.
///
/// A snapshot that carries generated content restores to `completed`;
/// one without restores to `pending`.
pub fn status_after_restore(restored_content: Option<&str>) -> PromptStatus {
    if restored_content.is_some() {
        PromptStatus::Completed
    } else {
        PromptStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
