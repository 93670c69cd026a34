//! Onboarding analytics service (PRD-52).
//!
//! Read-only aggregation across all contractors' progress, compliance, and
//! risk outputs. Per-contractor failures are logged and excluded, so the
//! report is a partial result rather than a total failure when individual
//! contractors have corrupt data.

use sqlx::PgPool;

use fibreops_core::analytics::{
    approval_trend, compute_compliance_distribution, compute_onboarding_statistics,
    compute_risk_distribution, OnboardingReport,
};
use fibreops_db::repositories::{ContractorRepo, OnboardingRepo};

use crate::engine::{compliance, progress, rag, BULK_BATCH_SIZE};
use crate::error::AppResult;

/// Build the combined onboarding / compliance / risk report.
pub async fn get_onboarding_report(pool: &PgPool) -> AppResult<OnboardingReport> {
    let contractor_ids = ContractorRepo::list_ids(pool).await?;

    let mut views = Vec::with_capacity(contractor_ids.len());
    let mut tiers = Vec::with_capacity(contractor_ids.len());
    let mut verdicts = Vec::with_capacity(contractor_ids.len());

    for chunk in contractor_ids.chunks(BULK_BATCH_SIZE) {
        for &contractor_id in chunk {
            match progress::get_progress(pool, contractor_id).await {
                Ok(view) => views.push(view),
                Err(e) => {
                    tracing::warn!(contractor_id, error = %e, "Skipping contractor in analytics (progress)");
                    continue;
                }
            }

            match rag::calculate_rag_score(pool, contractor_id).await {
                Ok(score) => tiers.push(score.risk),
                Err(e) => {
                    tracing::warn!(contractor_id, error = %e, "Skipping contractor in analytics (rag)");
                }
            }

            match compliance::get_compliance_status(pool, contractor_id, None).await {
                Ok(status) => verdicts.push(status.overall),
                Err(e) => {
                    tracing::warn!(contractor_id, error = %e, "Skipping contractor in analytics (compliance)");
                }
            }
        }
    }

    let approved_at: Vec<_> = OnboardingRepo::list_all(pool)
        .await?
        .into_iter()
        .filter_map(|r| r.approved_at)
        .collect();

    Ok(OnboardingReport {
        onboarding: compute_onboarding_statistics(&views),
        risk: compute_risk_distribution(&tiers),
        compliance: compute_compliance_distribution(&verdicts),
        approval_trend: approval_trend(&approved_at),
    })
}
