//! BBBEE certificate and project requirement entity models (PRD-44).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::compliance::{
    BbbeeCertificateInput, ProjectRequirementInput, RequirementRecordInput,
    RequirementRecordStatus,
};
use fibreops_core::error::CoreError;
use fibreops_core::types::{DbId, Timestamp};

/// A row from the `bbbee_certificates` table. One per contractor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BbbeeCertificate {
    pub id: DbId,
    pub contractor_id: DbId,
    pub level: i16,
    pub issued_on: NaiveDate,
    pub expiry_date: NaiveDate,
    pub created_at: Timestamp,
}

impl BbbeeCertificate {
    pub fn to_input(&self) -> BbbeeCertificateInput {
        BbbeeCertificateInput {
            level: self.level,
            expiry_date: self.expiry_date,
        }
    }
}

/// A row from the `project_compliance_requirements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectComplianceRequirement {
    pub id: DbId,
    pub project_id: DbId,
    pub requirement_type: String,
    pub is_mandatory: bool,
    pub description: String,
    pub created_at: Timestamp,
}

impl ProjectComplianceRequirement {
    pub fn to_input(&self) -> ProjectRequirementInput {
        ProjectRequirementInput {
            requirement_type: self.requirement_type.clone(),
            is_mandatory: self.is_mandatory,
        }
    }
}

/// A row from the `contractor_compliance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractorComplianceRecord {
    pub id: DbId,
    pub contractor_id: DbId,
    pub requirement_type: String,
    pub status: String,
    pub reviewed_at: Timestamp,
}

impl ContractorComplianceRecord {
    pub fn to_input(&self) -> Result<RequirementRecordInput, CoreError> {
        let status = RequirementRecordStatus::from_str_value(&self.status)
            .map_err(CoreError::Internal)?;
        Ok(RequirementRecordInput {
            requirement_type: self.requirement_type.clone(),
            status,
        })
    }
}

/// DTO for recording a BBBEE certificate.
#[derive(Debug, Deserialize)]
pub struct CreateBbbeeCertificate {
    pub level: i16,
    pub issued_on: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// DTO for configuring a project requirement.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequirement {
    pub requirement_type: String,
    pub is_mandatory: Option<bool>,
    pub description: Option<String>,
}

/// DTO for recording a contractor's standing against a requirement.
#[derive(Debug, Deserialize)]
pub struct CreateComplianceRecord {
    pub requirement_type: String,
    pub status: String,
}
