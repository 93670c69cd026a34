//! Compliance status aggregator (PRD-44).
//!
//! Runs the independent insurance / BBBEE / safety / financial checks plus
//! project-specific requirement checks when a project id is supplied, and
//! derives one overall verdict. All-or-nothing per call: a failed load
//! fails the aggregation rather than returning a partial verdict.

use chrono::Utc;
use sqlx::PgPool;

use fibreops_core::compliance::{
    build_status, check_bbbee, check_financial, check_insurance, check_project_requirements,
    check_safety, collect_expiring_items, ComplianceStatus,
};
use fibreops_core::types::DbId;
use fibreops_db::repositories::{ComplianceRepo, InsuranceRepo, SafetyRepo};

use crate::engine::require_contractor;
use crate::error::{AppError, AppResult};

/// Compute the full compliance status for a contractor, optionally scoped
/// to a project's configured requirements.
pub async fn get_compliance_status(
    pool: &PgPool,
    contractor_id: DbId,
    project_id: Option<DbId>,
) -> AppResult<ComplianceStatus> {
    require_contractor(pool, contractor_id).await?;

    let policies: Vec<_> = InsuranceRepo::list_by_contractor(pool, contractor_id)
        .await?
        .iter()
        .map(|p| p.to_input())
        .collect();

    let bbbee = ComplianceRepo::find_bbbee(pool, contractor_id)
        .await?
        .map(|c| c.to_input());

    let certifications: Vec<_> = SafetyRepo::list_certifications(pool, contractor_id)
        .await?
        .iter()
        .map(|c| c.to_input())
        .collect();

    let incidents = SafetyRepo::list_incidents(pool, contractor_id)
        .await?
        .iter()
        .map(|i| i.to_input().map_err(AppError::Core))
        .collect::<AppResult<Vec<_>>>()?;

    let now = Utc::now();
    let today = now.date_naive();

    let mut issues = check_insurance(&policies, today);
    issues.extend(check_bbbee(bbbee.as_ref(), today));
    issues.extend(check_safety(&certifications, &incidents, today));
    issues.extend(check_financial());

    if let Some(project_id) = project_id {
        let requirements: Vec<_> = ComplianceRepo::list_requirements(pool, project_id)
            .await?
            .iter()
            .map(|r| r.to_input())
            .collect();
        let records = ComplianceRepo::list_records(pool, contractor_id)
            .await?
            .iter()
            .map(|r| r.to_input().map_err(AppError::Core))
            .collect::<AppResult<Vec<_>>>()?;
        issues.extend(check_project_requirements(&requirements, &records));
    }

    let expiring = collect_expiring_items(&policies, &certifications, bbbee.as_ref(), today);

    tracing::debug!(
        contractor_id,
        issues = issues.len(),
        expiring = expiring.len(),
        "Compliance status computed"
    );

    Ok(build_status(issues, expiring, now))
}
