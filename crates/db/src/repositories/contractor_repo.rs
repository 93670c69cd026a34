//! Repository for the `contractors` table.

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::contractor::{Contractor, CreateContractor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, company_name, registration_number, status, is_active, \
    years_in_business, payment_history_score, credit_rating_score, \
    insurance_verified, bonding_capacity, equipment_rating, \
    communication_rating, created_at, updated_at";

/// Provides CRUD operations for contractors plus activation-state writes.
pub struct ContractorRepo;

impl ContractorRepo {
    /// Insert a new contractor, returning the created row. Scoring
    /// attributes default at the database level when not supplied.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContractor,
    ) -> Result<Contractor, sqlx::Error> {
        let query = format!(
            "INSERT INTO contractors (\
                company_name, registration_number, years_in_business, \
                payment_history_score, credit_rating_score, insurance_verified, \
                bonding_capacity, equipment_rating, communication_rating)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 70), COALESCE($5, 70),
                     COALESCE($6, FALSE), COALESCE($7, FALSE), COALESCE($8, 70),
                     COALESCE($9, 70))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contractor>(&query)
            .bind(&input.company_name)
            .bind(&input.registration_number)
            .bind(input.years_in_business)
            .bind(input.payment_history_score)
            .bind(input.credit_rating_score)
            .bind(input.insurance_verified)
            .bind(input.bonding_capacity)
            .bind(input.equipment_rating)
            .bind(input.communication_rating)
            .fetch_one(pool)
            .await
    }

    /// Find a contractor by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contractor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contractors WHERE id = $1");
        sqlx::query_as::<_, Contractor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contractors, ordered by company name ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Contractor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contractors ORDER BY company_name ASC");
        sqlx::query_as::<_, Contractor>(&query).fetch_all(pool).await
    }

    /// List all contractor ids, ordered ascending.
    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM contractors ORDER BY id ASC")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Set the activation state of a contractor.
    ///
    /// This is the single write path for approval/rejection side effects,
    /// so activation flips always keep `status` and `is_active` consistent.
    pub async fn set_activation(
        pool: &PgPool,
        id: DbId,
        status: &str,
        is_active: bool,
    ) -> Result<Option<Contractor>, sqlx::Error> {
        let query = format!(
            "UPDATE contractors SET status = $2, is_active = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contractor>(&query)
            .bind(id)
            .bind(status)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }
}
