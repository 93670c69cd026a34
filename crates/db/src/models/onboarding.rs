//! Contractor onboarding entity model (PRD-31).
//!
//! Only checklist flags and the terminal approval/rejection marks are
//! durable; the progress view is recomputed from this row plus live
//! document state on every read.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::FromRow;

use fibreops_core::types::{DbId, Timestamp};

/// A row from the `contractor_onboarding` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractorOnboarding {
    pub id: DbId,
    pub contractor_id: DbId,
    /// Checklist item id -> completed flag.
    pub checklist_json: serde_json::Value,
    pub submitted_at: Option<Timestamp>,
    pub approved_by: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    /// Optimistic-lock stamp; incremented on every write.
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContractorOnboarding {
    /// Parse `checklist_json` into an item-id -> completed map. Non-boolean
    /// values are ignored rather than treated as completions.
    pub fn checklist_map(&self) -> HashMap<String, bool> {
        self.checklist_json
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_bool().map(|b| (k.clone(), b)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(checklist: serde_json::Value) -> ContractorOnboarding {
        ContractorOnboarding {
            id: 1,
            contractor_id: 1,
            checklist_json: checklist,
            submitted_at: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn checklist_map_parses_booleans() {
        let map = row(serde_json::json!({"a": true, "b": false})).checklist_map();
        assert_eq!(map.get("a"), Some(&true));
        assert_eq!(map.get("b"), Some(&false));
    }

    #[test]
    fn checklist_map_ignores_non_booleans() {
        let map = row(serde_json::json!({"a": true, "b": "yes", "c": 1})).checklist_map();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn checklist_map_handles_non_object() {
        assert!(row(serde_json::json!([])).checklist_map().is_empty());
    }
}
