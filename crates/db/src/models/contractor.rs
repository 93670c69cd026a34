//! Contractor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Activation statuses
// ---------------------------------------------------------------------------

/// Contractor is still working through onboarding.
pub const CONTRACTOR_STATUS_ONBOARDING: &str = "onboarding";
/// Contractor is approved and may be assigned to projects.
pub const CONTRACTOR_STATUS_ACTIVE: &str = "active";
/// Contractor was rejected during onboarding.
pub const CONTRACTOR_STATUS_REJECTED: &str = "rejected";
/// Contractor was suspended after activation.
pub const CONTRACTOR_STATUS_SUSPENDED: &str = "suspended";

/// All valid contractor statuses.
pub const VALID_CONTRACTOR_STATUSES: &[&str] = &[
    CONTRACTOR_STATUS_ONBOARDING,
    CONTRACTOR_STATUS_ACTIVE,
    CONTRACTOR_STATUS_REJECTED,
    CONTRACTOR_STATUS_SUSPENDED,
];

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// A row from the `contractors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contractor {
    pub id: DbId,
    pub company_name: String,
    pub registration_number: String,
    pub status: String,
    pub is_active: bool,
    pub years_in_business: i32,
    pub payment_history_score: f64,
    pub credit_rating_score: f64,
    pub insurance_verified: bool,
    pub bonding_capacity: bool,
    pub equipment_rating: f64,
    pub communication_rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new contractor.
#[derive(Debug, Deserialize)]
pub struct CreateContractor {
    pub company_name: String,
    pub registration_number: String,
    pub years_in_business: Option<i32>,
    pub payment_history_score: Option<f64>,
    pub credit_rating_score: Option<f64>,
    pub insurance_verified: Option<bool>,
    pub bonding_capacity: Option<bool>,
    pub equipment_rating: Option<f64>,
    pub communication_rating: Option<f64>,
}
