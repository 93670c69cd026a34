//! Repository for the `contractor_documents` table (PRD-33).

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::document::{ContractorDocument, CreateDocument};

/// Column list for `contractor_documents` queries.
const COLUMNS: &str = "\
    id, contractor_id, document_type, file_name, verification_status, \
    expiry_date, uploaded_at";

/// Provides read/write access to contractor document records. The engine
/// never touches stored files; it only reads and verifies metadata rows.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Record an uploaded document. Verification starts as `pending`.
    pub async fn create(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateDocument,
    ) -> Result<ContractorDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO contractor_documents (contractor_id, document_type, file_name, expiry_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorDocument>(&query)
            .bind(contractor_id)
            .bind(&input.document_type)
            .bind(&input.file_name)
            .bind(input.expiry_date)
            .fetch_one(pool)
            .await
    }

    /// List all documents for a contractor, newest upload first.
    pub async fn list_by_contractor(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<ContractorDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contractor_documents
             WHERE contractor_id = $1
             ORDER BY uploaded_at DESC"
        );
        sqlx::query_as::<_, ContractorDocument>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }

    /// Update the verification status of one document.
    pub async fn set_verification(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ContractorDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE contractor_documents SET verification_status = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorDocument>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
