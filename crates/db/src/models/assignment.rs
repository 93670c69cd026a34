//! Project assignment entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::error::CoreError;
use fibreops_core::rag::{AssignmentInput, AssignmentStatus};
use fibreops_core::types::{DbId, Timestamp};

/// A row from the `project_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectAssignment {
    pub id: DbId,
    pub contractor_id: DbId,
    pub project_id: DbId,
    pub status: String,
    pub quality_score: Option<f64>,
    pub timeliness_score: Option<f64>,
    pub performance_rating: Option<f64>,
    pub contract_value: f64,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ProjectAssignment {
    /// Convert to the core scoring input.
    pub fn to_input(&self) -> Result<AssignmentInput, CoreError> {
        let status =
            AssignmentStatus::from_str_value(&self.status).map_err(CoreError::Internal)?;
        Ok(AssignmentInput {
            status,
            quality_score: self.quality_score,
            timeliness_score: self.timeliness_score,
            performance_rating: self.performance_rating,
            contract_value: self.contract_value,
        })
    }
}

/// DTO for recording an assignment.
#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    pub project_id: DbId,
    pub status: Option<String>,
    pub quality_score: Option<f64>,
    pub timeliness_score: Option<f64>,
    pub performance_rating: Option<f64>,
    pub contract_value: Option<f64>,
}
