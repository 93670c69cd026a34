//! Safety certification and incident entity models (PRD-44).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::compliance::{
    IncidentSeverity, SafetyCertificationInput, SafetyIncidentInput,
};
use fibreops_core::error::CoreError;
use fibreops_core::types::{DbId, Timestamp};

/// A row from the `safety_certifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SafetyCertification {
    pub id: DbId,
    pub contractor_id: DbId,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub created_at: Timestamp,
}

impl SafetyCertification {
    pub fn to_input(&self) -> SafetyCertificationInput {
        SafetyCertificationInput {
            name: self.name.clone(),
            expiry_date: self.expiry_date,
        }
    }
}

/// A row from the `safety_incidents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SafetyIncident {
    pub id: DbId,
    pub contractor_id: DbId,
    pub severity: String,
    pub occurred_on: NaiveDate,
    pub description: String,
    pub created_at: Timestamp,
}

impl SafetyIncident {
    pub fn to_input(&self) -> Result<SafetyIncidentInput, CoreError> {
        let severity =
            IncidentSeverity::from_str_value(&self.severity).map_err(CoreError::Internal)?;
        Ok(SafetyIncidentInput {
            severity,
            occurred_on: self.occurred_on,
        })
    }
}

/// DTO for recording a safety certification.
#[derive(Debug, Deserialize)]
pub struct CreateSafetyCertification {
    pub name: String,
    pub expiry_date: NaiveDate,
}

/// DTO for recording a safety incident.
#[derive(Debug, Deserialize)]
pub struct CreateSafetyIncident {
    pub severity: String,
    pub occurred_on: NaiveDate,
    pub description: Option<String>,
}
