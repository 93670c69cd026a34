//! Contractor team entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fibreops_core::error::CoreError;
use fibreops_core::rag::{SkillLevel, TeamInput};
use fibreops_core::types::{DbId, Timestamp};

/// A row from the `contractor_teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractorTeam {
    pub id: DbId,
    pub contractor_id: DbId,
    pub name: String,
    pub team_type: String,
    pub skill_level: String,
    pub member_count: i32,
    pub years_active: f64,
    pub created_at: Timestamp,
}

impl ContractorTeam {
    /// Convert to the core scoring input.
    pub fn to_input(&self) -> Result<TeamInput, CoreError> {
        let skill_level =
            SkillLevel::from_str_value(&self.skill_level).map_err(CoreError::Internal)?;
        Ok(TeamInput {
            skill_level,
            team_type: self.team_type.clone(),
            years_active: self.years_active,
        })
    }
}

/// DTO for registering a team.
#[derive(Debug, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub team_type: String,
    pub skill_level: String,
    pub member_count: Option<i32>,
    pub years_active: Option<f64>,
}
