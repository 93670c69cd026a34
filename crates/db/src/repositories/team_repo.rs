//! Repository for the `contractor_teams` table.

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::team::{ContractorTeam, CreateTeam};

/// Column list for `contractor_teams` queries.
const COLUMNS: &str = "\
    id, contractor_id, name, team_type, skill_level, member_count, \
    years_active, created_at";

/// Provides CRUD operations for contractor teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Register a team for a contractor.
    pub async fn create(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateTeam,
    ) -> Result<ContractorTeam, sqlx::Error> {
        let query = format!(
            "INSERT INTO contractor_teams (contractor_id, name, team_type, skill_level, member_count, years_active)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContractorTeam>(&query)
            .bind(contractor_id)
            .bind(&input.name)
            .bind(&input.team_type)
            .bind(&input.skill_level)
            .bind(input.member_count)
            .bind(input.years_active)
            .fetch_one(pool)
            .await
    }

    /// List all teams for a contractor, by name ascending.
    pub async fn list_by_contractor(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<ContractorTeam>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contractor_teams
             WHERE contractor_id = $1
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, ContractorTeam>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }
}
