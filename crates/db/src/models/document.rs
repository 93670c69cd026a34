//! Contractor document entity model (PRD-33).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::documents::{DocumentInput, VerificationStatus};
use fibreops_core::error::CoreError;
use fibreops_core::types::{DbId, Timestamp};

/// A row from the `contractor_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractorDocument {
    pub id: DbId,
    pub contractor_id: DbId,
    pub document_type: String,
    pub file_name: String,
    pub verification_status: String,
    pub expiry_date: Option<NaiveDate>,
    pub uploaded_at: Timestamp,
}

impl ContractorDocument {
    /// Convert to the core evaluation input. Fails on a verification status
    /// outside the stored CHECK constraint, which indicates corrupt data.
    pub fn to_input(&self) -> Result<DocumentInput, CoreError> {
        let status = VerificationStatus::from_str_value(&self.verification_status)
            .map_err(CoreError::Internal)?;
        Ok(DocumentInput {
            document_type: self.document_type.clone(),
            status,
            expiry_date: self.expiry_date,
            uploaded_at: self.uploaded_at,
        })
    }
}

/// DTO for recording a document upload.
#[derive(Debug, Deserialize)]
pub struct CreateDocument {
    pub document_type: String,
    pub file_name: String,
    pub expiry_date: Option<NaiveDate>,
}
