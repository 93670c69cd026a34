//! Repository for the `contractor_onboarding` table (PRD-31).
//!
//! Checklist writes are compare-and-swap on the row `version` so two
//! concurrent item updates for the same contractor can never be computed
//! against a stale base state; the loser observes `None` and retries.

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::onboarding::ContractorOnboarding;

/// Column list for `contractor_onboarding` queries.
const COLUMNS: &str = "\
    id, contractor_id, checklist_json, submitted_at, approved_by, \
    approved_at, rejected_by, rejected_at, rejection_reason, version, \
    created_at, updated_at";

/// Provides persistence for durable onboarding state.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Get the onboarding record for a contractor, creating one with
    /// defaults if it does not exist yet (upsert pattern).
    ///
    /// Uses a no-op `DO UPDATE` to guarantee `RETURNING` always produces a
    /// row.
    pub async fn get_or_create(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<ContractorOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO contractor_onboarding (contractor_id) \
             VALUES ($1) \
             ON CONFLICT (contractor_id) DO UPDATE \
                 SET contractor_id = contractor_onboarding.contractor_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .fetch_one(pool)
            .await
    }

    /// Find the onboarding record for a contractor.
    pub async fn find_by_contractor(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Option<ContractorOnboarding>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contractor_onboarding WHERE contractor_id = $1");
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .fetch_optional(pool)
            .await
    }

    /// List all onboarding records.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ContractorOnboarding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contractor_onboarding ORDER BY contractor_id ASC"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .fetch_all(pool)
            .await
    }

    /// Set one checklist item flag, guarded by the expected `version`.
    ///
    /// Returns `None` when the version no longer matches (a concurrent
    /// writer won); the caller re-reads and retries.
    pub async fn set_checklist_item(
        pool: &PgPool,
        contractor_id: DbId,
        expected_version: i32,
        item_id: &str,
        completed: bool,
    ) -> Result<Option<ContractorOnboarding>, sqlx::Error> {
        let query = format!(
            "UPDATE contractor_onboarding \
             SET checklist_json = jsonb_set(checklist_json, ARRAY[$3], to_jsonb($4::boolean), true), \
                 version = version + 1, \
                 updated_at = NOW() \
             WHERE contractor_id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .bind(expected_version)
            .bind(item_id)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    /// Stamp the submitted-for-approval timestamp.
    pub async fn mark_submitted(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<ContractorOnboarding, sqlx::Error> {
        let query = format!(
            "UPDATE contractor_onboarding \
             SET submitted_at = NOW(), version = version + 1, updated_at = NOW() \
             WHERE contractor_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .fetch_one(pool)
            .await
    }

    /// Stamp terminal approval, clearing any prior rejection marks.
    pub async fn mark_approved(
        pool: &PgPool,
        contractor_id: DbId,
        approved_by: &str,
    ) -> Result<ContractorOnboarding, sqlx::Error> {
        let query = format!(
            "UPDATE contractor_onboarding \
             SET approved_by = $2, approved_at = NOW(), \
                 rejected_by = NULL, rejected_at = NULL, rejection_reason = NULL, \
                 version = version + 1, updated_at = NOW() \
             WHERE contractor_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .bind(approved_by)
            .fetch_one(pool)
            .await
    }

    /// Stamp terminal rejection with a reason, clearing any approval marks.
    pub async fn mark_rejected(
        pool: &PgPool,
        contractor_id: DbId,
        rejected_by: &str,
        reason: &str,
    ) -> Result<ContractorOnboarding, sqlx::Error> {
        let query = format!(
            "UPDATE contractor_onboarding \
             SET rejected_by = $2, rejected_at = NOW(), rejection_reason = $3, \
                 approved_by = NULL, approved_at = NULL, \
                 version = version + 1, updated_at = NOW() \
             WHERE contractor_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .bind(rejected_by)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    /// Replace the checklist and clear all terminal marks. Used by the
    /// post-rejection reset, which preserves document-backed completions.
    pub async fn reset(
        pool: &PgPool,
        contractor_id: DbId,
        checklist: &serde_json::Value,
    ) -> Result<ContractorOnboarding, sqlx::Error> {
        let query = format!(
            "UPDATE contractor_onboarding \
             SET checklist_json = $2, \
                 submitted_at = NULL, \
                 approved_by = NULL, approved_at = NULL, \
                 rejected_by = NULL, rejected_at = NULL, rejection_reason = NULL, \
                 version = version + 1, updated_at = NOW() \
             WHERE contractor_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorOnboarding>(&query)
            .bind(contractor_id)
            .bind(checklist)
            .fetch_one(pool)
            .await
    }
}
