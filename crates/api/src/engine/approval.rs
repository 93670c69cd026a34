//! Onboarding approval service (PRD-32).
//!
//! Gate-checks and executes the terminal workflow transitions:
//! submit-for-approval, approve, reject, and reset-after-rejection.
//! Approval flips the contractor to active; rejection disables it.

use chrono::Utc;
use sqlx::PgPool;

use fibreops_core::documents::{check_required_documents, document_state_for_type};
use fibreops_core::error::CoreError;
use fibreops_core::progress::{OnboardingProgress, OnboardingStatus, TerminalMark};
use fibreops_core::stages::{self, STAGE_CATALOG};
use fibreops_core::types::DbId;
use fibreops_db::models::contractor::{
    CONTRACTOR_STATUS_ACTIVE, CONTRACTOR_STATUS_ONBOARDING, CONTRACTOR_STATUS_REJECTED,
};
use fibreops_db::repositories::{ContractorRepo, DocumentRepo, OnboardingRepo};

use crate::engine::progress::{terminal_mark, view_from_record};
use crate::engine::{document_inputs, require_contractor};
use crate::error::{AppError, AppResult};

/// Submit a contractor's onboarding for approval.
///
/// Fails with an itemized validation error unless completion is at 100%
/// and every required document type is verified and unexpired. The failure
/// lists exactly which documents are missing and which are unverified so
/// the caller can remediate without re-querying.
pub async fn submit_for_approval(
    pool: &PgPool,
    contractor_id: DbId,
) -> AppResult<OnboardingProgress> {
    require_contractor(pool, contractor_id).await?;
    let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;

    if terminal_mark(&record) != TerminalMark::None {
        return Err(CoreError::Precondition(
            "Onboarding is already approved or rejected".to_string(),
        )
        .into());
    }

    let view = view_from_record(pool, &record).await?;

    let docs = DocumentRepo::list_by_contractor(pool, contractor_id).await?;
    let inputs = document_inputs(&docs)?;
    let checks = check_required_documents(
        &stages::all_required_document_types(),
        &inputs,
        Utc::now().date_naive(),
    );

    if view.completion_pct < 100 || !checks.all_verified() {
        tracing::info!(
            contractor_id,
            completion_pct = view.completion_pct,
            missing = checks.missing.len(),
            unverified = checks.unverified.len(),
            "Submission blocked"
        );
        return Err(AppError::SubmissionBlocked {
            completion_pct: view.completion_pct,
            missing_documents: checks.missing,
            unverified_documents: checks.unverified,
        });
    }

    let updated = OnboardingRepo::mark_submitted(pool, contractor_id).await?;
    tracing::info!(contractor_id, "Onboarding submitted for approval");

    view_from_record(pool, &updated).await
}

/// Approve a contractor.
///
/// Preconditions: derived status is `completed` and every required document
/// type passes verification. Side effect: the contractor record flips to
/// active. On any failure the contractor is left untouched, so `is_active`
/// can never be set by a failed approval.
pub async fn approve_contractor(
    pool: &PgPool,
    contractor_id: DbId,
    approved_by: &str,
) -> AppResult<OnboardingProgress> {
    if approved_by.trim().is_empty() {
        return Err(CoreError::Validation("approved_by must not be empty".to_string()).into());
    }

    require_contractor(pool, contractor_id).await?;
    let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;
    let view = view_from_record(pool, &record).await?;

    if view.status != OnboardingStatus::Completed {
        return Err(CoreError::Precondition(format!(
            "Cannot approve contractor in status '{}'; onboarding must be completed",
            view.status.as_str()
        ))
        .into());
    }

    let docs = DocumentRepo::list_by_contractor(pool, contractor_id).await?;
    let inputs = document_inputs(&docs)?;
    let checks = check_required_documents(
        &stages::all_required_document_types(),
        &inputs,
        Utc::now().date_naive(),
    );
    if !checks.all_verified() {
        return Err(CoreError::Precondition(format!(
            "Cannot approve: documents not verified ({})",
            checks
                .missing
                .iter()
                .chain(checks.unverified.iter())
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ))
        .into());
    }

    let updated = OnboardingRepo::mark_approved(pool, contractor_id, approved_by).await?;
    ContractorRepo::set_activation(pool, contractor_id, CONTRACTOR_STATUS_ACTIVE, true).await?;

    tracing::info!(contractor_id, approved_by, "Contractor approved and activated");

    view_from_record(pool, &updated).await
}

/// Reject a contractor with a mandatory reason.
///
/// Permitted from any non-approved state. Side effect: the contractor
/// record flips to rejected/disabled.
pub async fn reject_contractor(
    pool: &PgPool,
    contractor_id: DbId,
    rejected_by: &str,
    reason: &str,
) -> AppResult<OnboardingProgress> {
    if rejected_by.trim().is_empty() {
        return Err(CoreError::Validation("rejected_by must not be empty".to_string()).into());
    }
    if reason.trim().is_empty() {
        return Err(
            CoreError::Validation("Rejection reason must not be empty".to_string()).into(),
        );
    }

    require_contractor(pool, contractor_id).await?;
    let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;

    if terminal_mark(&record) == TerminalMark::Approved {
        return Err(CoreError::Precondition(
            "An approved contractor cannot be rejected; suspend it instead".to_string(),
        )
        .into());
    }

    let updated = OnboardingRepo::mark_rejected(pool, contractor_id, rejected_by, reason).await?;
    ContractorRepo::set_activation(pool, contractor_id, CONTRACTOR_STATUS_REJECTED, false)
        .await?;

    tracing::info!(contractor_id, rejected_by, "Contractor rejected");

    view_from_record(pool, &updated).await
}

/// Re-open onboarding after a rejection.
///
/// Checklist items backed by a document that is still verified and
/// unexpired keep their completion, so the contractor is not forced to
/// re-upload documents that remain valid. Everything else reverts to
/// incomplete.
pub async fn reset_onboarding(pool: &PgPool, contractor_id: DbId) -> AppResult<OnboardingProgress> {
    require_contractor(pool, contractor_id).await?;
    let record = OnboardingRepo::get_or_create(pool, contractor_id).await?;

    if terminal_mark(&record) != TerminalMark::Rejected {
        return Err(CoreError::Precondition(
            "Only a rejected onboarding can be reset".to_string(),
        )
        .into());
    }

    let docs = DocumentRepo::list_by_contractor(pool, contractor_id).await?;
    let inputs = document_inputs(&docs)?;
    let today = Utc::now().date_naive();
    let previous = record.checklist_map();

    let mut preserved = serde_json::Map::new();
    for stage in STAGE_CATALOG {
        for item in stage.checklist {
            let was_completed = previous.get(item.id).copied().unwrap_or(false);
            if !was_completed {
                continue;
            }
            if let Some(doc_type) = item.document_type {
                if document_state_for_type(doc_type, &inputs, today).passes_gate() {
                    preserved.insert(item.id.to_string(), serde_json::Value::Bool(true));
                }
            }
        }
    }

    let updated =
        OnboardingRepo::reset(pool, contractor_id, &serde_json::Value::Object(preserved)).await?;
    ContractorRepo::set_activation(pool, contractor_id, CONTRACTOR_STATUS_ONBOARDING, false)
        .await?;

    tracing::info!(contractor_id, "Onboarding reset after rejection");

    view_from_record(pool, &updated).await
}
