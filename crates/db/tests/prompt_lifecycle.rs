//! Integration tests for the prompt lifecycle: versioned edits,
//! generation state transitions, restore, and share tokens.
//!
//! These cover the durable invariants:
//! - version numbers per prompt form a contiguous 1..N run
//! - `generated_at` is non-null exactly when `generated_content` is
//! - restore appends a snapshot, never deletes or renumbers
//! - `generating` is a mutual-exclusion flag acquired atomically

use sqlx::PgPool;
use vibecoding_db::models::project::CreateProject;
use vibecoding_db::models::prompt::{CreatePrompt, Prompt, PromptChanges};
use vibecoding_db::models::user::CreateUser;
use vibecoding_db::repositories::{ProjectRepo, PromptRepo, PromptVersionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a user, a project, and a pending prompt with the given text.
async fn seed_prompt(pool: &PgPool, text: &str) -> Prompt {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: format!("{}@test.com", uuid_suffix()),
            password_hash: "$argon2id$fake-hash-for-tests".to_string(),
            full_name: None,
        },
    )
    .await
    .expect("user creation should succeed");

    let project = ProjectRepo::create(
        pool,
        user.id,
        &CreateProject {
            name: "Vibe Project".to_string(),
            description: None,
            idea_text: None,
            vibe_coding_tags: None,
        },
    )
    .await
    .expect("project creation should succeed");

    PromptRepo::create(
        pool,
        &CreatePrompt {
            project_id: project.id,
            user_id: user.id,
            prompt_text: text.to_string(),
            prompt_type: None,
        },
    )
    .await
    .expect("prompt creation should succeed")
}

/// Short unique suffix for email uniqueness across tests sharing a pool.
fn uuid_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(0);
    format!("user{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

fn text_edit(text: &str) -> PromptChanges {
    PromptChanges {
        prompt_text: Some(text.to_string()),
        prompt_type: None,
        status: None,
    }
}

// ---------------------------------------------------------------------------
// Versioned edits
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn text_edit_snapshots_pre_edit_state(pool: PgPool) {
    let prompt = seed_prompt(&pool, "original prompt text").await;

    let (updated, snapshotted) =
        PromptRepo::update_versioned(&pool, prompt.id, &text_edit("edited prompt text"))
            .await
            .unwrap()
            .expect("prompt should exist");

    assert!(snapshotted);
    assert_eq!(updated.prompt_text, "edited prompt text");
    assert_eq!(updated.status, "pending");

    let versions = PromptVersionRepo::list_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version_number, 1);
    assert_eq!(
        versions[0].prompt_text, "original prompt text",
        "the snapshot captures the pre-edit state"
    );
}

#[sqlx::test]
async fn unchanged_text_creates_no_version(pool: PgPool) {
    let prompt = seed_prompt(&pool, "same text").await;

    let (_, snapshotted) = PromptRepo::update_versioned(&pool, prompt.id, &text_edit("same text"))
        .await
        .unwrap()
        .expect("prompt should exist");

    assert!(!snapshotted);
    let count = PromptVersionRepo::count_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
async fn version_numbers_are_contiguous_after_many_edits(pool: PgPool) {
    let prompt = seed_prompt(&pool, "revision 0").await;

    for i in 1..=5 {
        PromptRepo::update_versioned(&pool, prompt.id, &text_edit(&format!("revision {i}")))
            .await
            .unwrap()
            .expect("prompt should exist");
    }

    let versions = PromptVersionRepo::list_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    let numbers: Vec<i32> = versions.iter().map(|v| v.version_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(versions[0].prompt_text, "revision 0");
    assert_eq!(versions[4].prompt_text, "revision 4");
}

// ---------------------------------------------------------------------------
// Generation transitions
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn generation_guard_admits_exactly_one(pool: PgPool) {
    let prompt = seed_prompt(&pool, "generate me").await;

    let first = PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap();
    assert!(first.is_some(), "first call enters generating");
    assert_eq!(first.unwrap().status, "generating");

    let second = PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap();
    assert!(second.is_none(), "second call trips the guard");
}

#[sqlx::test]
async fn completed_generation_snapshots_and_stamps(pool: PgPool) {
    let prompt = seed_prompt(&pool, "generate me").await;
    PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap()
        .expect("guard should admit");

    let completed = PromptRepo::complete_generation(&pool, prompt.id, "doc text")
        .await
        .unwrap()
        .expect("prompt should exist");

    assert_eq!(completed.status, "completed");
    assert_eq!(completed.generated_content.as_deref(), Some("doc text"));
    assert!(
        completed.generated_at.is_some(),
        "generated_at set with content"
    );

    let versions = PromptVersionRepo::list_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    assert_eq!(versions.len(), 1);
    assert!(
        versions[0].generated_content.is_none(),
        "the snapshot captures the empty pre-generation content"
    );
}

#[sqlx::test]
async fn failed_generation_preserves_prior_content(pool: PgPool) {
    let prompt = seed_prompt(&pool, "generate me").await;

    // First generation succeeds.
    PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap();
    PromptRepo::complete_generation(&pool, prompt.id, "first doc")
        .await
        .unwrap();

    // Regeneration fails.
    PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap()
        .expect("regeneration admitted");
    let failed = PromptRepo::fail_generation(&pool, prompt.id).await.unwrap();
    assert!(failed);

    let row = PromptRepo::find_by_id(&pool, prompt.id)
        .await
        .unwrap()
        .expect("prompt should exist");
    assert_eq!(row.status, "failed");
    assert_eq!(
        row.generated_content.as_deref(),
        Some("first doc"),
        "failure never destroys previously generated content"
    );

    let count = PromptVersionRepo::count_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    assert_eq!(count, 1, "failure creates no version");
}

#[sqlx::test]
async fn fail_generation_is_a_noop_outside_generating(pool: PgPool) {
    let prompt = seed_prompt(&pool, "never started").await;
    let failed = PromptRepo::fail_generation(&pool, prompt.id).await.unwrap();
    assert!(!failed);

    let row = PromptRepo::find_by_id(&pool, prompt.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "pending");
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn restore_appends_snapshot_and_copies_target(pool: PgPool) {
    let prompt = seed_prompt(&pool, "the original idea").await;

    // Generate, then edit: leaves 2 versions.
    PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap();
    PromptRepo::complete_generation(&pool, prompt.id, "doc text")
        .await
        .unwrap();
    PromptRepo::update_versioned(&pool, prompt.id, &text_edit("a different idea"))
        .await
        .unwrap();

    // Restore to version 1 (the pre-generation snapshot: original text,
    // no content).
    let restored = PromptRepo::restore_version(&pool, prompt.id, 1)
        .await
        .unwrap()
        .expect("version 1 should exist");

    assert_eq!(restored.prompt_text, "the original idea");
    assert!(restored.generated_content.is_none());
    assert!(
        restored.generated_at.is_none(),
        "generated_at cleared with the content"
    );
    assert_eq!(restored.status, "pending");

    let versions = PromptVersionRepo::list_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    assert_eq!(versions.len(), 3, "restore appended the pre-restore state");
    assert_eq!(
        versions[2].prompt_text, "a different idea",
        "version 3 is the pre-restore live state"
    );
    assert_eq!(
        versions[2].generated_content.as_deref(),
        Some("doc text"),
        "the pre-restore snapshot keeps the generated content"
    );
}

#[sqlx::test]
async fn restore_to_content_bearing_version_completes(pool: PgPool) {
    let prompt = seed_prompt(&pool, "the original idea").await;

    PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap();
    PromptRepo::complete_generation(&pool, prompt.id, "doc text")
        .await
        .unwrap();
    PromptRepo::update_versioned(&pool, prompt.id, &text_edit("a different idea"))
        .await
        .unwrap();

    // Version 2 snapshotted the completed state.
    let restored = PromptRepo::restore_version(&pool, prompt.id, 2)
        .await
        .unwrap()
        .expect("version 2 should exist");

    assert_eq!(restored.status, "completed");
    assert_eq!(restored.generated_content.as_deref(), Some("doc text"));
    assert!(restored.generated_at.is_some());
}

#[sqlx::test]
async fn restore_unknown_version_returns_none(pool: PgPool) {
    let prompt = seed_prompt(&pool, "the original idea").await;
    let result = PromptRepo::restore_version(&pool, prompt.id, 42)
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// The full end-to-end scenario
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_generate_edit_restore_scenario(pool: PgPool) {
    // Create: pending, 0 versions.
    let prompt = seed_prompt(&pool, "Build a vibe coding feature for X").await;
    assert_eq!(prompt.status, "pending");

    // Generate: guard admits, gateway "returns" doc text.
    PromptRepo::try_begin_generation(&pool, prompt.id)
        .await
        .unwrap()
        .expect("guard should admit");
    let completed = PromptRepo::complete_generation(&pool, prompt.id, "doc text")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, "completed");
    assert_eq!(completed.generated_content.as_deref(), Some("doc text"));

    // Edit: second snapshot captures the completed state.
    let (edited, _) =
        PromptRepo::update_versioned(&pool, prompt.id, &text_edit("Build something else"))
            .await
            .unwrap()
            .unwrap();
    assert_eq!(edited.status, "pending");

    // Restore to version 1: third snapshot, live prompt reverts.
    let restored = PromptRepo::restore_version(&pool, prompt.id, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restored.prompt_text, "Build a vibe coding feature for X");
    assert!(restored.generated_content.is_none());
    assert_eq!(restored.status, "pending");

    let versions = PromptVersionRepo::list_for_prompt(&pool, prompt.id)
        .await
        .unwrap();
    let numbers: Vec<i32> = versions.iter().map(|v| v.version_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Share tokens
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn share_token_is_idempotent(pool: PgPool) {
    let prompt = seed_prompt(&pool, "share me please").await;

    let first = PromptRepo::ensure_share_token(&pool, prompt.id, "token-one")
        .await
        .unwrap()
        .expect("prompt should exist");
    assert_eq!(first.share_token.as_deref(), Some("token-one"));

    // A second call with a fresh candidate keeps the existing token.
    let second = PromptRepo::ensure_share_token(&pool, prompt.id, "token-two")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.share_token.as_deref(), Some("token-one"));
}

#[sqlx::test]
async fn cleared_token_no_longer_resolves(pool: PgPool) {
    let prompt = seed_prompt(&pool, "share me please").await;
    PromptRepo::ensure_share_token(&pool, prompt.id, "token-x")
        .await
        .unwrap();

    let cleared = PromptRepo::clear_share_token(&pool, prompt.id)
        .await
        .unwrap();
    assert!(cleared);

    let found = PromptRepo::find_by_share_token(&pool, "token-x")
        .await
        .unwrap();
    assert!(found.is_none());

    // Clearing again reports nothing to clear.
    let cleared_again = PromptRepo::clear_share_token(&pool, prompt.id)
        .await
        .unwrap();
    assert!(!cleared_again);
}

#[sqlx::test]
async fn share_token_unique_across_prompts(pool: PgPool) {
    let a = seed_prompt(&pool, "first shared prompt").await;
    let b = seed_prompt(&pool, "second shared prompt").await;

    PromptRepo::ensure_share_token(&pool, a.id, "dup-token")
        .await
        .unwrap();
    let err = PromptRepo::ensure_share_token(&pool, b.id, "dup-token")
        .await
        .expect_err("duplicate token must violate uq_prompts_share_token");

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_prompts_share_token"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}
