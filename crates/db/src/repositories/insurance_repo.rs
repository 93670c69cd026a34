//! Repository for the `insurance_policies` table (PRD-44).

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::insurance::{CreateInsurancePolicy, InsurancePolicy};

/// Column list for `insurance_policies` queries.
const COLUMNS: &str = "\
    id, contractor_id, policy_type, provider, policy_number, expiry_date, \
    verified, created_at";

/// Provides read/write access to insurance policy records.
pub struct InsuranceRepo;

impl InsuranceRepo {
    /// Record a policy.
    pub async fn create(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateInsurancePolicy,
    ) -> Result<InsurancePolicy, sqlx::Error> {
        let query = format!(
            "INSERT INTO insurance_policies (\
                contractor_id, policy_type, provider, policy_number, expiry_date, verified)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InsurancePolicy>(&query)
            .bind(contractor_id)
            .bind(&input.policy_type)
            .bind(&input.provider)
            .bind(&input.policy_number)
            .bind(input.expiry_date)
            .bind(input.verified)
            .fetch_one(pool)
            .await
    }

    /// List all policies for a contractor, soonest expiry first.
    pub async fn list_by_contractor(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<InsurancePolicy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM insurance_policies
             WHERE contractor_id = $1
             ORDER BY expiry_date ASC"
        );
        sqlx::query_as::<_, InsurancePolicy>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }
}
