//! Repository for the `safety_certifications` and `safety_incidents`
//! tables (PRD-44).

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::safety::{
    CreateSafetyCertification, CreateSafetyIncident, SafetyCertification, SafetyIncident,
};

/// Column list for `safety_certifications` queries.
const CERT_COLUMNS: &str = "id, contractor_id, name, expiry_date, created_at";

/// Column list for `safety_incidents` queries.
const INCIDENT_COLUMNS: &str =
    "id, contractor_id, severity, occurred_on, description, created_at";

/// Provides read/write access to safety records.
pub struct SafetyRepo;

impl SafetyRepo {
    /// Record a safety certification.
    pub async fn create_certification(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateSafetyCertification,
    ) -> Result<SafetyCertification, sqlx::Error> {
        let query = format!(
            "INSERT INTO safety_certifications (contractor_id, name, expiry_date)
             VALUES ($1, $2, $3)
             RETURNING {CERT_COLUMNS}"
        );
        sqlx::query_as::<_, SafetyCertification>(&query)
            .bind(contractor_id)
            .bind(&input.name)
            .bind(input.expiry_date)
            .fetch_one(pool)
            .await
    }

    /// List all safety certifications for a contractor, soonest expiry first.
    pub async fn list_certifications(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<SafetyCertification>, sqlx::Error> {
        let query = format!(
            "SELECT {CERT_COLUMNS} FROM safety_certifications
             WHERE contractor_id = $1
             ORDER BY expiry_date ASC"
        );
        sqlx::query_as::<_, SafetyCertification>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }

    /// Record a safety incident.
    pub async fn create_incident(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateSafetyIncident,
    ) -> Result<SafetyIncident, sqlx::Error> {
        let query = format!(
            "INSERT INTO safety_incidents (contractor_id, severity, occurred_on, description)
             VALUES ($1, $2, $3, COALESCE($4, ''))
             RETURNING {INCIDENT_COLUMNS}"
        );
        sqlx::query_as::<_, SafetyIncident>(&query)
            .bind(contractor_id)
            .bind(&input.severity)
            .bind(input.occurred_on)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List all incidents for a contractor, most recent first.
    pub async fn list_incidents(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<SafetyIncident>, sqlx::Error> {
        let query = format!(
            "SELECT {INCIDENT_COLUMNS} FROM safety_incidents
             WHERE contractor_id = $1
             ORDER BY occurred_on DESC"
        );
        sqlx::query_as::<_, SafetyIncident>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }
}
