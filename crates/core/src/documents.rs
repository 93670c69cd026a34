//! Document verification and expiry state (PRD-33).
//!
//! Pure evaluation over pre-loaded contractor document rows. Consumed by
//! both the onboarding engine (submit/approve gating, reset preservation)
//! and the compliance aggregator.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// A credential is "expiring soon" when it lapses within this many days.
pub const EXPIRING_SOON_DAYS: i64 = 30;

pub const VERIFICATION_PENDING: &str = "pending";
pub const VERIFICATION_VERIFIED: &str = "verified";
pub const VERIFICATION_REJECTED: &str = "rejected";

/// All valid document verification statuses.
pub const VALID_VERIFICATION_STATUSES: &[&str] = &[
    VERIFICATION_PENDING,
    VERIFICATION_VERIFIED,
    VERIFICATION_REJECTED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Verification status as stored on an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => VERIFICATION_PENDING,
            Self::Verified => VERIFICATION_VERIFIED,
            Self::Rejected => VERIFICATION_REJECTED,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            VERIFICATION_PENDING => Ok(Self::Pending),
            VERIFICATION_VERIFIED => Ok(Self::Verified),
            VERIFICATION_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid verification status '{s}'. Must be one of: {}",
                VALID_VERIFICATION_STATUSES.join(", ")
            )),
        }
    }
}

/// Effective state of a required document type for one contractor.
///
/// Only `Verified` passes the approval gate; `Pending`, `Rejected`, and
/// `Expired` all count as "unverified" in submission feedback, while
/// `Missing` means nothing was uploaded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    Missing,
    Pending,
    Rejected,
    Expired,
    Verified,
}

impl DocumentState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
            Self::Verified => "verified",
        }
    }

    /// Whether this state satisfies the approval gate.
    pub fn passes_gate(self) -> bool {
        matches!(self, Self::Verified)
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One uploaded document, as loaded by the caller.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub document_type: String,
    pub status: VerificationStatus,
    pub expiry_date: Option<NaiveDate>,
    pub uploaded_at: Timestamp,
}

/// Itemized result of checking the required document types.
///
/// `missing` and `unverified` are kept separate: submission feedback must
/// tell the business user exactly what to upload versus what to chase for
/// verification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentChecks {
    pub missing: Vec<String>,
    pub unverified: Vec<String>,
    pub verified: Vec<String>,
}

impl DocumentChecks {
    /// True when every required document type is verified and unexpired.
    pub fn all_verified(&self) -> bool {
        self.missing.is_empty() && self.unverified.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Expiry helpers
// ---------------------------------------------------------------------------

/// Signed number of days until `expiry` (negative when already past).
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

pub fn is_expired(expiry: NaiveDate, today: NaiveDate) -> bool {
    days_until_expiry(expiry, today) < 0
}

/// Expiring within [`EXPIRING_SOON_DAYS`] (and not yet expired).
pub fn is_expiring_soon(expiry: NaiveDate, today: NaiveDate) -> bool {
    let days = days_until_expiry(expiry, today);
    (0..=EXPIRING_SOON_DAYS).contains(&days)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate a single document's effective state.
///
/// An expired document fails the gate regardless of verification status.
pub fn evaluate_document(doc: &DocumentInput, today: NaiveDate) -> DocumentState {
    if let Some(expiry) = doc.expiry_date {
        if is_expired(expiry, today) {
            return DocumentState::Expired;
        }
    }
    match doc.status {
        VerificationStatus::Verified => DocumentState::Verified,
        VerificationStatus::Pending => DocumentState::Pending,
        VerificationStatus::Rejected => DocumentState::Rejected,
    }
}

/// Pick the most recent upload per document type. Contractors re-upload
/// documents; only the latest row counts.
pub fn latest_per_type(docs: &[DocumentInput]) -> HashMap<&str, &DocumentInput> {
    let mut latest: HashMap<&str, &DocumentInput> = HashMap::new();
    for doc in docs {
        match latest.get(doc.document_type.as_str()) {
            Some(existing) if existing.uploaded_at >= doc.uploaded_at => {}
            _ => {
                latest.insert(doc.document_type.as_str(), doc);
            }
        }
    }
    latest
}

/// Effective state of one document type across all uploads.
pub fn document_state_for_type(
    document_type: &str,
    docs: &[DocumentInput],
    today: NaiveDate,
) -> DocumentState {
    match latest_per_type(docs).get(document_type) {
        Some(doc) => evaluate_document(doc, today),
        None => DocumentState::Missing,
    }
}

/// Check a list of required document types against uploaded documents.
pub fn check_required_documents(
    required_types: &[&str],
    docs: &[DocumentInput],
    today: NaiveDate,
) -> DocumentChecks {
    let latest = latest_per_type(docs);
    let mut checks = DocumentChecks::default();

    for &required in required_types {
        match latest.get(required) {
            None => checks.missing.push(required.to_string()),
            Some(doc) => match evaluate_document(doc, today) {
                DocumentState::Verified => checks.verified.push(required.to_string()),
                _ => checks.unverified.push(required.to_string()),
            },
        }
    }

    checks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
