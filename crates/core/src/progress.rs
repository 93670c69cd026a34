//! Onboarding progress tracking (PRD-31).
//!
//! Pure functions that materialize the stage catalog into a per-contractor
//! progress view from persisted checklist flags and live document state.
//! The view is recomputed on every read; only the checklist flags and the
//! terminal approval/rejection marks are durable.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::documents::{self, DocumentInput, DocumentState};
use crate::stages::{ItemCategory, STAGE_CATALOG};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// An in-progress onboarding with no update for this many days is stalled.
pub const STALLED_AFTER_DAYS: i64 = 14;

pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid onboarding statuses.
pub const VALID_ONBOARDING_STATUSES: &[&str] = &[
    STATUS_NOT_STARTED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_APPROVED,
    STATUS_REJECTED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Overall onboarding workflow status.
///
/// `Approved` and `Rejected` are terminal and durable; the rest are derived
/// from checklist completion on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    NotStarted,
    InProgress,
    Completed,
    Approved,
    Rejected,
}

impl OnboardingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Completed => STATUS_COMPLETED,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_NOT_STARTED => Ok(Self::NotStarted),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid onboarding status '{s}'. Must be one of: {}",
                VALID_ONBOARDING_STATUSES.join(", ")
            )),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Durable terminal mark persisted on the onboarding record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMark {
    None,
    Approved,
    Rejected,
}

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One checklist item in the materialized view.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingChecklistItem {
    pub id: String,
    pub description: String,
    pub required: bool,
    pub completed: bool,
    pub category: ItemCategory,
    pub document_type: Option<String>,
}

/// Live state of one stage-required document type.
#[derive(Debug, Clone, Serialize)]
pub struct StageDocumentStatus {
    pub document_type: String,
    pub state: DocumentState,
}

/// One stage in the materialized view.
///
/// `completed` is derived: true iff every required checklist item in the
/// stage is completed.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStage {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub completed: bool,
    pub documents: Vec<StageDocumentStatus>,
    pub checklist: Vec<OnboardingChecklistItem>,
}

/// The full per-contractor progress view.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingProgress {
    pub contractor_id: DbId,
    pub current_stage: usize,
    pub total_stages: usize,
    pub completion_pct: u8,
    pub status: OnboardingStatus,
    pub stages: Vec<OnboardingStage>,
    pub next_action: Option<String>,
    pub stalled: bool,
    pub approved_by: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub last_updated: Timestamp,
}

// ---------------------------------------------------------------------------
// Materialization
// ---------------------------------------------------------------------------

/// Materialize the stage catalog against persisted checklist flags and
/// live document uploads.
pub fn materialize_stages(
    checklist_state: &HashMap<String, bool>,
    docs: &[DocumentInput],
    today: NaiveDate,
) -> Vec<OnboardingStage> {
    STAGE_CATALOG
        .iter()
        .map(|def| {
            let checklist: Vec<OnboardingChecklistItem> = def
                .checklist
                .iter()
                .map(|item| OnboardingChecklistItem {
                    id: item.id.to_string(),
                    description: item.description.to_string(),
                    required: item.required,
                    completed: checklist_state.get(item.id).copied().unwrap_or(false),
                    category: item.category,
                    document_type: item.document_type.map(str::to_string),
                })
                .collect();

            let completed = checklist
                .iter()
                .filter(|i| i.required)
                .all(|i| i.completed);

            let documents = def
                .required_documents
                .iter()
                .map(|doc_type| StageDocumentStatus {
                    document_type: doc_type.to_string(),
                    state: documents::document_state_for_type(doc_type, docs, today),
                })
                .collect();

            OnboardingStage {
                id: def.id.to_string(),
                name: def.name.to_string(),
                description: def.description.to_string(),
                required: def.required,
                completed,
                documents,
                checklist,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

/// Completed required stages over total required stages, rounded to the
/// nearest integer percentage. Returns 0 when there are no required stages.
pub fn completion_pct(stages: &[OnboardingStage]) -> u8 {
    let required: Vec<&OnboardingStage> = stages.iter().filter(|s| s.required).collect();
    if required.is_empty() {
        return 0;
    }
    let completed = required.iter().filter(|s| s.completed).count();
    let pct = (completed as f64 / required.len() as f64 * 100.0).round() as u8;
    pct.min(100)
}

/// Index of the first incomplete stage, or the last index when all stages
/// are complete.
pub fn current_stage_index(stages: &[OnboardingStage]) -> usize {
    stages
        .iter()
        .position(|s| !s.completed)
        .unwrap_or_else(|| stages.len().saturating_sub(1))
}

/// True when any checklist item anywhere is completed.
pub fn any_item_completed(stages: &[OnboardingStage]) -> bool {
    stages
        .iter()
        .any(|s| s.checklist.iter().any(|i| i.completed))
}

/// Derive the overall status. Durable terminal marks always win.
pub fn derive_status(mark: TerminalMark, stages: &[OnboardingStage]) -> OnboardingStatus {
    match mark {
        TerminalMark::Approved => OnboardingStatus::Approved,
        TerminalMark::Rejected => OnboardingStatus::Rejected,
        TerminalMark::None => {
            if completion_pct(stages) == 100 {
                OnboardingStatus::Completed
            } else if any_item_completed(stages) {
                OnboardingStatus::InProgress
            } else {
                OnboardingStatus::NotStarted
            }
        }
    }
}

/// Hint naming the first incomplete required item, for the next-action
/// surface on dashboards. `None` once everything required is complete.
pub fn next_action(stages: &[OnboardingStage]) -> Option<String> {
    for stage in stages {
        if stage.completed {
            continue;
        }
        if let Some(item) = stage.checklist.iter().find(|i| i.required && !i.completed) {
            return Some(format!("{} ({})", item.description, stage.name));
        }
    }
    None
}

/// Stalled detection: in progress with no update for [`STALLED_AFTER_DAYS`].
pub fn is_stalled(status: OnboardingStatus, last_updated: Timestamp, now: Timestamp) -> bool {
    status == OnboardingStatus::InProgress
        && (now - last_updated).num_days() >= STALLED_AFTER_DAYS
}

/// Assemble the full progress view. This is the single assembly point used
/// by the engine so every read derives state the same way.
#[allow(clippy::too_many_arguments)]
pub fn build_progress(
    contractor_id: DbId,
    checklist_state: &HashMap<String, bool>,
    docs: &[DocumentInput],
    mark: TerminalMark,
    approved_by: Option<String>,
    approved_at: Option<Timestamp>,
    rejection_reason: Option<String>,
    last_updated: Timestamp,
    now: Timestamp,
) -> OnboardingProgress {
    let stages = materialize_stages(checklist_state, docs, now.date_naive());
    let status = derive_status(mark, &stages);
    let pct = completion_pct(&stages);

    OnboardingProgress {
        contractor_id,
        current_stage: current_stage_index(&stages),
        total_stages: stages.len(),
        completion_pct: pct,
        status,
        next_action: next_action(&stages),
        stalled: is_stalled(status, last_updated, now),
        stages,
        approved_by,
        approved_at,
        rejection_reason,
        last_updated,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
