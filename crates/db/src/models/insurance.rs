//! Insurance policy entity model (PRD-44).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::compliance::InsurancePolicyInput;
use fibreops_core::types::{DbId, Timestamp};

/// A row from the `insurance_policies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InsurancePolicy {
    pub id: DbId,
    pub contractor_id: DbId,
    pub policy_type: String,
    pub provider: String,
    pub policy_number: String,
    pub expiry_date: NaiveDate,
    pub verified: bool,
    pub created_at: Timestamp,
}

impl InsurancePolicy {
    /// Convert to the core compliance input.
    pub fn to_input(&self) -> InsurancePolicyInput {
        InsurancePolicyInput {
            policy_type: self.policy_type.clone(),
            provider: self.provider.clone(),
            expiry_date: self.expiry_date,
        }
    }
}

/// DTO for recording a policy.
#[derive(Debug, Deserialize)]
pub struct CreateInsurancePolicy {
    pub policy_type: String,
    pub provider: String,
    pub policy_number: String,
    pub expiry_date: NaiveDate,
    pub verified: Option<bool>,
}
