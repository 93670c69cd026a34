//! Repository for BBBEE certificates, project requirements, and contractor
//! compliance records (PRD-44).

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::compliance::{
    BbbeeCertificate, ContractorComplianceRecord, CreateBbbeeCertificate,
    CreateComplianceRecord, CreateProjectRequirement, ProjectComplianceRequirement,
};

/// Column list for `bbbee_certificates` queries.
const BBBEE_COLUMNS: &str = "id, contractor_id, level, issued_on, expiry_date, created_at";

/// Column list for `project_compliance_requirements` queries.
const REQUIREMENT_COLUMNS: &str =
    "id, project_id, requirement_type, is_mandatory, description, created_at";

/// Column list for `contractor_compliance_records` queries.
const RECORD_COLUMNS: &str = "id, contractor_id, requirement_type, status, reviewed_at";

/// Provides read/write access to compliance source records.
pub struct ComplianceRepo;

impl ComplianceRepo {
    /// Record or replace a contractor's BBBEE certificate (one per
    /// contractor; re-verification overwrites).
    pub async fn upsert_bbbee(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateBbbeeCertificate,
    ) -> Result<BbbeeCertificate, sqlx::Error> {
        let query = format!(
            "INSERT INTO bbbee_certificates (contractor_id, level, issued_on, expiry_date)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (contractor_id) DO UPDATE
                 SET level = EXCLUDED.level,
                     issued_on = EXCLUDED.issued_on,
                     expiry_date = EXCLUDED.expiry_date
             RETURNING {BBBEE_COLUMNS}"
        );
        sqlx::query_as::<_, BbbeeCertificate>(&query)
            .bind(contractor_id)
            .bind(input.level)
            .bind(input.issued_on)
            .bind(input.expiry_date)
            .fetch_one(pool)
            .await
    }

    /// Find a contractor's BBBEE certificate.
    pub async fn find_bbbee(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Option<BbbeeCertificate>, sqlx::Error> {
        let query =
            format!("SELECT {BBBEE_COLUMNS} FROM bbbee_certificates WHERE contractor_id = $1");
        sqlx::query_as::<_, BbbeeCertificate>(&query)
            .bind(contractor_id)
            .fetch_optional(pool)
            .await
    }

    /// Configure a compliance requirement on a project.
    pub async fn create_requirement(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectRequirement,
    ) -> Result<ProjectComplianceRequirement, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_compliance_requirements (\
                project_id, requirement_type, is_mandatory, description)
             VALUES ($1, $2, COALESCE($3, TRUE), COALESCE($4, ''))
             RETURNING {REQUIREMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ProjectComplianceRequirement>(&query)
            .bind(project_id)
            .bind(&input.requirement_type)
            .bind(input.is_mandatory)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// List all requirements configured on a project.
    pub async fn list_requirements(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectComplianceRequirement>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUIREMENT_COLUMNS} FROM project_compliance_requirements
             WHERE project_id = $1
             ORDER BY requirement_type ASC"
        );
        sqlx::query_as::<_, ProjectComplianceRequirement>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Record or replace a contractor's standing against a requirement type.
    pub async fn upsert_record(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateComplianceRecord,
    ) -> Result<ContractorComplianceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO contractor_compliance_records (contractor_id, requirement_type, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (contractor_id, requirement_type) DO UPDATE
                 SET status = EXCLUDED.status,
                     reviewed_at = NOW()
             RETURNING {RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, ContractorComplianceRecord>(&query)
            .bind(contractor_id)
            .bind(&input.requirement_type)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// List all compliance records for a contractor.
    pub async fn list_records(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<ContractorComplianceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM contractor_compliance_records
             WHERE contractor_id = $1
             ORDER BY requirement_type ASC"
        );
        sqlx::query_as::<_, ContractorComplianceRecord>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }
}
