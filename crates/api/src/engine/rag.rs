//! RAG scoring engine orchestration (PRD-47).
//!
//! Loads a contractor's assignment history, teams, and compliance track
//! record, and hands them to the pure scorer. Batch and ranking variants
//! score each contractor independently and tolerate individual failures.

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use fibreops_core::compliance::RequirementRecordStatus;
use fibreops_core::documents::is_expired;
use fibreops_core::rag::{self, ContractorSignals, RagScore, RiskTier};
use fibreops_core::types::DbId;
use fibreops_db::models::contractor::Contractor;
use fibreops_db::repositories::{
    AssignmentRepo, ComplianceRepo, ContractorRepo, SafetyRepo, TeamRepo,
};

use crate::engine::{require_contractor, validate_bulk_ids, BULK_BATCH_SIZE};
use crate::error::{AppError, AppResult};

/// A contractor's RAG score with identity, for batch responses.
#[derive(Debug, Clone, Serialize)]
pub struct ContractorScore {
    pub contractor_id: DbId,
    pub company_name: String,
    pub rag: RagScore,
}

/// One entry of the ranked-contractors listing.
#[derive(Debug, Clone, Serialize)]
pub struct RankedContractor {
    pub contractor_id: DbId,
    pub company_name: String,
    pub rag_score: u8,
    pub risk: RiskTier,
}

/// Compute the RAG score for one contractor.
pub async fn calculate_rag_score(pool: &PgPool, contractor_id: DbId) -> AppResult<RagScore> {
    let contractor = require_contractor(pool, contractor_id).await?;
    Ok(score_contractor(pool, &contractor).await?.rag)
}

/// Load signals and score a contractor that has already been fetched.
async fn score_contractor(pool: &PgPool, contractor: &Contractor) -> AppResult<ContractorScore> {
    let assignments = AssignmentRepo::list_by_contractor(pool, contractor.id)
        .await?
        .iter()
        .map(|a| a.to_input().map_err(AppError::Core))
        .collect::<AppResult<Vec<_>>>()?;

    let teams = TeamRepo::list_by_contractor(pool, contractor.id)
        .await?
        .iter()
        .map(|t| t.to_input().map_err(AppError::Core))
        .collect::<AppResult<Vec<_>>>()?;

    let today = Utc::now().date_naive();
    let certifications = SafetyRepo::list_certifications(pool, contractor.id).await?;
    let expired = certifications
        .iter()
        .filter(|c| is_expired(c.expiry_date, today))
        .count();
    let valid = certifications.len() - expired;

    let compliance_records = ComplianceRepo::list_records(pool, contractor.id)
        .await?
        .iter()
        .map(|r| r.to_input().map_err(AppError::Core))
        .collect::<AppResult<Vec<_>>>()?;
    let compliant = compliance_records
        .iter()
        .filter(|r| r.status == RequirementRecordStatus::Compliant)
        .count();
    let non_compliant = compliance_records
        .iter()
        .filter(|r| r.status == RequirementRecordStatus::NonCompliant)
        .count();

    let signals = ContractorSignals {
        assignments,
        teams,
        years_in_business: contractor.years_in_business,
        payment_history_score: contractor.payment_history_score,
        credit_rating_score: contractor.credit_rating_score,
        insurance_verified: contractor.insurance_verified,
        bonding_capacity: contractor.bonding_capacity,
        equipment_rating: contractor.equipment_rating,
        communication_rating: contractor.communication_rating,
        valid_certifications: valid,
        expired_certifications: expired,
        compliant_records: compliant,
        non_compliant_records: non_compliant,
    };

    let rag = rag::calculate_rag_score(&signals, Utc::now());

    Ok(ContractorScore {
        contractor_id: contractor.id,
        company_name: contractor.company_name.clone(),
        rag,
    })
}

/// Compute RAG scores for many contractors.
///
/// Processes ids in fixed-size batches; per-item failures are logged and
/// skipped so one bad contractor never aborts the batch.
pub async fn get_contractor_rag_scores(
    pool: &PgPool,
    contractor_ids: &[DbId],
) -> AppResult<Vec<ContractorScore>> {
    validate_bulk_ids(contractor_ids)?;

    let mut scores = Vec::with_capacity(contractor_ids.len());
    for chunk in contractor_ids.chunks(BULK_BATCH_SIZE) {
        for &contractor_id in chunk {
            let result = match require_contractor(pool, contractor_id).await {
                Ok(contractor) => score_contractor(pool, &contractor).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(score) => scores.push(score),
                Err(e) => {
                    tracing::warn!(contractor_id, error = %e, "Skipping contractor in batch scoring");
                }
            }
        }
    }
    Ok(scores)
}

/// Rank all contractors by overall RAG score, descending.
pub async fn get_ranked_contractors(
    pool: &PgPool,
    limit: usize,
) -> AppResult<Vec<RankedContractor>> {
    let contractors = ContractorRepo::list_all(pool).await?;

    let mut ranked = Vec::with_capacity(contractors.len());
    for chunk in contractors.chunks(BULK_BATCH_SIZE) {
        for contractor in chunk {
            match score_contractor(pool, contractor).await {
                Ok(score) => ranked.push(RankedContractor {
                    contractor_id: score.contractor_id,
                    company_name: score.company_name,
                    rag_score: score.rag.overall,
                    risk: score.rag.risk,
                }),
                Err(e) => {
                    tracing::warn!(
                        contractor_id = contractor.id,
                        error = %e,
                        "Skipping contractor in ranking"
                    );
                }
            }
        }
    }

    ranked.sort_by(|a, b| b.rag_score.cmp(&a.rag_score));
    ranked.truncate(limit);
    Ok(ranked)
}
