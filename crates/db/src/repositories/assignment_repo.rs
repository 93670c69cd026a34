//! Repository for the `project_assignments` table.

use sqlx::PgPool;

use fibreops_core::types::DbId;

use crate::models::assignment::{CreateAssignment, ProjectAssignment};

/// Column list for `project_assignments` queries.
const COLUMNS: &str = "\
    id, contractor_id, project_id, status, quality_score, timeliness_score, \
    performance_rating, contract_value, completed_at, created_at";

/// Provides read/write access to assignment history.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Record an assignment.
    pub async fn create(
        pool: &PgPool,
        contractor_id: DbId,
        input: &CreateAssignment,
    ) -> Result<ProjectAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_assignments (\
                contractor_id, project_id, status, quality_score, \
                timeliness_score, performance_rating, contract_value)
             VALUES ($1, $2, COALESCE($3, 'assigned'), $4, $5, $6, COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectAssignment>(&query)
            .bind(contractor_id)
            .bind(input.project_id)
            .bind(&input.status)
            .bind(input.quality_score)
            .bind(input.timeliness_score)
            .bind(input.performance_rating)
            .bind(input.contract_value)
            .fetch_one(pool)
            .await
    }

    /// List all assignments for a contractor, newest first.
    pub async fn list_by_contractor(
        pool: &PgPool,
        contractor_id: DbId,
    ) -> Result<Vec<ProjectAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_assignments
             WHERE contractor_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectAssignment>(&query)
            .bind(contractor_id)
            .fetch_all(pool)
            .await
    }
}
