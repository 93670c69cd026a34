//! Onboarding progress manager (PRD-31).
//!
//! The progress view is recomputed on every read from the durable checklist
//! flags plus live document state. Checklist writes are serialized per
//! contractor via the repository's version compare-and-swap.

use chrono::Utc;
use sqlx::PgPool;

use fibreops_core::error::CoreError;
use fibreops_core::progress::{build_progress, OnboardingProgress, TerminalMark};
use fibreops_core::stages;
use fibreops_core::types::DbId;
use fibreops_db::models::onboarding::ContractorOnboarding;
use fibreops_db::repositories::{DocumentRepo, OnboardingRepo};

use crate::error::AppResult;
use crate::engine::{document_inputs, require_contractor, validate_bulk_ids, BULK_BATCH_SIZE};

/// How many times a checklist write is retried after losing the version
/// race before giving up with a conflict error.
pub const MAX_UPDATE_RETRIES: u32 = 3;

/// Derive the durable terminal mark from an onboarding record.
pub(crate) fn terminal_mark(record: &ContractorOnboarding) -> TerminalMark {
    if record.approved_at.is_some() {
        TerminalMark::Approved
    } else if record.rejected_at.is_some() {
        TerminalMark::Rejected
    } else {
        TerminalMark::None
    }
}

/// Build the progress view for a loaded onboarding record.
pub(crate) async fn view_from_record(
    pool: &PgPool,
    record: &ContractorOnboarding,
) -> AppResult<OnboardingProgress> {
    let docs = DocumentRepo::list_by_contractor(pool, record.contractor_id).await?;
    let inputs = document_inputs(&docs)?;

    Ok(build_progress(
        record.contractor_id,
        &record.checklist_map(),
        &inputs,
        terminal_mark(record),
        record.approved_by.clone(),
        record.approved_at,
        record.rejection_reason.clone(),
        record.updated_at,
        Utc::now(),
    ))
}

/// Initialize onboarding for a contractor, creating the durable record if
/// needed. Always succeeds for a valid contractor id.
pub async fn initialize_onboarding(
    pool: &PgPool,
    contractor_id: DbId,
) -> AppResult<OnboardingProgress> {
    require_contractor(pool, contractor_id).await?;
    let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;

    tracing::info!(contractor_id, "Onboarding initialized");

    view_from_record(pool, &record).await
}

/// Get the current progress view for a contractor.
pub async fn get_progress(pool: &PgPool, contractor_id: DbId) -> AppResult<OnboardingProgress> {
    require_contractor(pool, contractor_id).await?;
    let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;
    view_from_record(pool, &record).await
}

/// Set one checklist item's completion flag and return the recomputed view.
///
/// Fails with `NotFound` when the stage or item id does not resolve, and
/// with `Precondition` once onboarding has reached a terminal state. The
/// write is retried a bounded number of times when a concurrent writer wins
/// the version race.
pub async fn update_stage_completion(
    pool: &PgPool,
    contractor_id: DbId,
    stage_id: &str,
    item_id: &str,
    completed: bool,
) -> AppResult<OnboardingProgress> {
    require_contractor(pool, contractor_id).await?;
    stages::validate_stage_item(stage_id, item_id)?;

    for attempt in 0..MAX_UPDATE_RETRIES {
        let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;

        if terminal_mark(&record) != TerminalMark::None {
            return Err(CoreError::Precondition(
                "Onboarding is approved or rejected; reset before editing the checklist"
                    .to_string(),
            )
            .into());
        }

        match OnboardingRepo::set_checklist_item(
            pool,
            contractor_id,
            record.version,
            item_id,
            completed,
        )
        .await?
        {
            Some(updated) => {
                tracing::info!(contractor_id, item_id, completed, "Checklist item updated");
                return view_from_record(pool, &updated).await;
            }
            None => {
                tracing::debug!(
                    contractor_id,
                    item_id,
                    attempt,
                    "Checklist write lost version race, retrying"
                );
            }
        }
    }

    Err(CoreError::Conflict(format!(
        "Concurrent checklist updates for contractor {contractor_id}; please retry"
    ))
    .into())
}

/// Get progress views for many contractors.
///
/// Processes ids in fixed-size batches to bound I/O fan-out. Per-item
/// failures are logged and skipped so one bad contractor never fails the
/// whole batch; callers receive a partial result.
pub async fn get_bulk_progress(
    pool: &PgPool,
    contractor_ids: &[DbId],
) -> AppResult<Vec<OnboardingProgress>> {
    validate_bulk_ids(contractor_ids)?;

    let mut views = Vec::with_capacity(contractor_ids.len());
    for chunk in contractor_ids.chunks(BULK_BATCH_SIZE) {
        for &contractor_id in chunk {
            match get_progress(pool, contractor_id).await {
                Ok(view) => views.push(view),
                Err(e) => {
                    tracing::warn!(contractor_id, error = %e, "Skipping contractor in bulk progress");
                }
            }
        }
    }
    Ok(views)
}
