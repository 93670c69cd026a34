//! Qualification engine orchestration.
//!
//! Each submodule wires repositories to the pure evaluation logic in
//! `fibreops_core`. All operations are request-scoped reads/writes with
//! sequential awaits; batch operations process fixed-size chunks and
//! tolerate per-item failures.

pub mod analytics;
pub mod approval;
pub mod compliance;
pub mod progress;
pub mod rag;

use sqlx::PgPool;

use fibreops_core::documents::DocumentInput;
use fibreops_core::error::CoreError;
use fibreops_core::types::DbId;
use fibreops_db::models::contractor::Contractor;
use fibreops_db::models::document::ContractorDocument;
use fibreops_db::repositories::ContractorRepo;

use crate::error::{AppError, AppResult};

/// Batch size for bulk operations, bounding concurrent I/O fan-out.
pub const BULK_BATCH_SIZE: usize = 10;

/// Maximum contractors accepted by a single bulk request.
pub const MAX_BULK_CONTRACTORS: usize = 500;

/// Load a contractor or fail with `NotFound`.
pub(crate) async fn require_contractor(
    pool: &PgPool,
    contractor_id: DbId,
) -> AppResult<Contractor> {
    ContractorRepo::find_by_id(pool, contractor_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Contractor",
                id: contractor_id,
            })
        })
}

/// Convert document rows to core evaluation inputs.
pub(crate) fn document_inputs(docs: &[ContractorDocument]) -> AppResult<Vec<DocumentInput>> {
    docs.iter()
        .map(|d| d.to_input().map_err(AppError::Core))
        .collect()
}

/// Validate a bulk id list against the request cap.
pub(crate) fn validate_bulk_ids(ids: &[DbId]) -> AppResult<()> {
    if ids.is_empty() {
        return Err(AppError::BadRequest(
            "contractor_ids must not be empty".to_string(),
        ));
    }
    if ids.len() > MAX_BULK_CONTRACTORS {
        return Err(AppError::BadRequest(format!(
            "Cannot process more than {MAX_BULK_CONTRACTORS} contractors at once"
        )));
    }
    Ok(())
}
