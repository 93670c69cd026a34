//! Onboarding stage catalog and lookup helpers (PRD-31).
//!
//! The catalog is process-wide immutable configuration: ordered stages,
//! each with a checklist and the document types it requires. Only checklist
//! completion flags are persisted (keyed by contractor); stage structure
//! always comes from these tables.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Checklist item categories
// ---------------------------------------------------------------------------

pub const CATEGORY_LEGAL: &str = "legal";
pub const CATEGORY_FINANCIAL: &str = "financial";
pub const CATEGORY_TECHNICAL: &str = "technical";
pub const CATEGORY_SAFETY: &str = "safety";
pub const CATEGORY_INSURANCE: &str = "insurance";

/// All valid checklist item categories.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_LEGAL,
    CATEGORY_FINANCIAL,
    CATEGORY_TECHNICAL,
    CATEGORY_SAFETY,
    CATEGORY_INSURANCE,
];

/// Category of an onboarding checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Legal,
    Financial,
    Technical,
    Safety,
    Insurance,
}

impl ItemCategory {
    /// Convert to the wire/database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legal => CATEGORY_LEGAL,
            Self::Financial => CATEGORY_FINANCIAL,
            Self::Technical => CATEGORY_TECHNICAL,
            Self::Safety => CATEGORY_SAFETY,
            Self::Insurance => CATEGORY_INSURANCE,
        }
    }

    /// Convert from a string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            CATEGORY_LEGAL => Ok(Self::Legal),
            CATEGORY_FINANCIAL => Ok(Self::Financial),
            CATEGORY_TECHNICAL => Ok(Self::Technical),
            CATEGORY_SAFETY => Ok(Self::Safety),
            CATEGORY_INSURANCE => Ok(Self::Insurance),
            _ => Err(format!(
                "Invalid item category '{s}'. Must be one of: {}",
                VALID_CATEGORIES.join(", ")
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

pub const DOC_COMPANY_REGISTRATION: &str = "company_registration_certificate";
pub const DOC_TAX_CLEARANCE: &str = "tax_clearance_certificate";
pub const DOC_DIRECTOR_IDS: &str = "director_identity_documents";
pub const DOC_BANK_CONFIRMATION: &str = "bank_confirmation_letter";
pub const DOC_CREDIT_CONSENT: &str = "credit_check_consent";
pub const DOC_BBBEE_CERTIFICATE: &str = "bbbee_certificate";
pub const DOC_PUBLIC_LIABILITY: &str = "public_liability_policy";
pub const DOC_PROFESSIONAL_INDEMNITY: &str = "professional_indemnity_policy";
pub const DOC_WORKERS_COMPENSATION: &str = "workers_compensation_policy";
pub const DOC_SAFETY_FILE: &str = "safety_file";
pub const DOC_SAFETY_CERTIFICATIONS: &str = "safety_certifications";
pub const DOC_TEAM_ROSTER: &str = "team_roster";
pub const DOC_EQUIPMENT_SCHEDULE: &str = "equipment_schedule";

// ---------------------------------------------------------------------------
// Catalog definition
// ---------------------------------------------------------------------------

/// Static definition of one checklist item within a stage.
#[derive(Debug)]
pub struct ChecklistItemDef {
    /// Globally unique item id (unique across all stages, not just within one).
    pub id: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub category: ItemCategory,
    /// Document type backing this item, if any. Document-backed items
    /// survive a post-rejection reset while their document is still valid.
    pub document_type: Option<&'static str>,
}

/// Static definition of one onboarding stage.
#[derive(Debug)]
pub struct StageDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Document types that must be verified before approval of the
    /// contractor; surfaced per-stage in the progress view.
    pub required_documents: &'static [&'static str],
    pub checklist: &'static [ChecklistItemDef],
}

/// The ordered onboarding stage catalog.
pub const STAGE_CATALOG: &[StageDef] = &[
    StageDef {
        id: "company_registration",
        name: "Company Registration",
        description: "Legal registration and identity of the contracting entity",
        required: true,
        required_documents: &[DOC_COMPANY_REGISTRATION, DOC_TAX_CLEARANCE, DOC_DIRECTOR_IDS],
        checklist: &[
            ChecklistItemDef {
                id: "upload_registration_certificate",
                description: "Upload CIPC company registration certificate",
                required: true,
                category: ItemCategory::Legal,
                document_type: Some(DOC_COMPANY_REGISTRATION),
            },
            ChecklistItemDef {
                id: "upload_tax_clearance",
                description: "Upload valid SARS tax clearance certificate",
                required: true,
                category: ItemCategory::Legal,
                document_type: Some(DOC_TAX_CLEARANCE),
            },
            ChecklistItemDef {
                id: "upload_director_ids",
                description: "Upload identity documents for all listed directors",
                required: true,
                category: ItemCategory::Legal,
                document_type: Some(DOC_DIRECTOR_IDS),
            },
            ChecklistItemDef {
                id: "provide_company_profile",
                description: "Provide a company profile and trading history summary",
                required: false,
                category: ItemCategory::Legal,
                document_type: None,
            },
        ],
    },
    StageDef {
        id: "financial_verification",
        name: "Financial Verification",
        description: "Banking, credit, and empowerment credentials",
        required: true,
        required_documents: &[DOC_BANK_CONFIRMATION, DOC_CREDIT_CONSENT, DOC_BBBEE_CERTIFICATE],
        checklist: &[
            ChecklistItemDef {
                id: "upload_bank_confirmation",
                description: "Upload bank confirmation letter (not older than 3 months)",
                required: true,
                category: ItemCategory::Financial,
                document_type: Some(DOC_BANK_CONFIRMATION),
            },
            ChecklistItemDef {
                id: "sign_credit_check_consent",
                description: "Sign consent for a credit bureau check",
                required: true,
                category: ItemCategory::Financial,
                document_type: Some(DOC_CREDIT_CONSENT),
            },
            ChecklistItemDef {
                id: "upload_bbbee_certificate",
                description: "Upload current BBBEE certificate or sworn affidavit",
                required: true,
                category: ItemCategory::Financial,
                document_type: Some(DOC_BBBEE_CERTIFICATE),
            },
        ],
    },
    StageDef {
        id: "insurance_compliance",
        name: "Insurance Compliance",
        description: "Mandatory insurance cover for field operations",
        required: true,
        required_documents: &[
            DOC_PUBLIC_LIABILITY,
            DOC_PROFESSIONAL_INDEMNITY,
            DOC_WORKERS_COMPENSATION,
        ],
        checklist: &[
            ChecklistItemDef {
                id: "upload_public_liability",
                description: "Upload public liability policy schedule",
                required: true,
                category: ItemCategory::Insurance,
                document_type: Some(DOC_PUBLIC_LIABILITY),
            },
            ChecklistItemDef {
                id: "upload_professional_indemnity",
                description: "Upload professional indemnity policy schedule",
                required: true,
                category: ItemCategory::Insurance,
                document_type: Some(DOC_PROFESSIONAL_INDEMNITY),
            },
            ChecklistItemDef {
                id: "upload_workers_compensation",
                description: "Upload workers compensation (COIDA) registration",
                required: true,
                category: ItemCategory::Insurance,
                document_type: Some(DOC_WORKERS_COMPENSATION),
            },
        ],
    },
    StageDef {
        id: "safety_qualification",
        name: "Safety Qualification",
        description: "Health & safety file and certifications",
        required: true,
        required_documents: &[DOC_SAFETY_FILE, DOC_SAFETY_CERTIFICATIONS],
        checklist: &[
            ChecklistItemDef {
                id: "upload_safety_file",
                description: "Upload site-ready health & safety file",
                required: true,
                category: ItemCategory::Safety,
                document_type: Some(DOC_SAFETY_FILE),
            },
            ChecklistItemDef {
                id: "upload_safety_certifications",
                description: "Upload safety certifications for supervisory staff",
                required: true,
                category: ItemCategory::Safety,
                document_type: Some(DOC_SAFETY_CERTIFICATIONS),
            },
            ChecklistItemDef {
                id: "declare_incident_history",
                description: "Declare safety incidents from the last 3 years",
                required: false,
                category: ItemCategory::Safety,
                document_type: None,
            },
        ],
    },
    StageDef {
        id: "technical_capability",
        name: "Technical Capability",
        description: "Teams, equipment, and build track record",
        required: true,
        required_documents: &[DOC_TEAM_ROSTER, DOC_EQUIPMENT_SCHEDULE],
        checklist: &[
            ChecklistItemDef {
                id: "upload_team_roster",
                description: "Upload team roster with skill levels per team",
                required: true,
                category: ItemCategory::Technical,
                document_type: Some(DOC_TEAM_ROSTER),
            },
            ChecklistItemDef {
                id: "upload_equipment_schedule",
                description: "Upload schedule of owned and leased plant/equipment",
                required: true,
                category: ItemCategory::Technical,
                document_type: Some(DOC_EQUIPMENT_SCHEDULE),
            },
            ChecklistItemDef {
                id: "provide_technical_certifications",
                description: "Provide fibre splicing / civils certifications",
                required: false,
                category: ItemCategory::Technical,
                document_type: None,
            },
            ChecklistItemDef {
                id: "provide_reference_projects",
                description: "Provide at least two reference projects with contacts",
                required: false,
                category: ItemCategory::Technical,
                document_type: None,
            },
        ],
    },
];

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

/// Find a stage definition by id.
pub fn stage_by_id(stage_id: &str) -> Option<&'static StageDef> {
    STAGE_CATALOG.iter().find(|s| s.id == stage_id)
}

/// Find a checklist item by id, returning the owning stage as well.
///
/// Item ids are globally unique, so the first match is the only match.
pub fn item_by_id(item_id: &str) -> Option<(&'static StageDef, &'static ChecklistItemDef)> {
    for stage in STAGE_CATALOG {
        if let Some(item) = stage.checklist.iter().find(|i| i.id == item_id) {
            return Some((stage, item));
        }
    }
    None
}

/// Number of stages flagged `required` in the catalog.
pub fn required_stage_count() -> usize {
    STAGE_CATALOG.iter().filter(|s| s.required).count()
}

/// All document types required by any stage, in catalog order, deduplicated.
pub fn all_required_document_types() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for stage in STAGE_CATALOG {
        for doc in stage.required_documents {
            if !out.contains(doc) {
                out.push(doc);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a stage id exists in the catalog.
pub fn validate_stage_id(stage_id: &str) -> Result<&'static StageDef, CoreError> {
    stage_by_id(stage_id).ok_or_else(|| CoreError::UnknownKey {
        entity: "OnboardingStage",
        key: stage_id.to_string(),
    })
}

/// Validate that a checklist item exists within the given stage.
pub fn validate_stage_item(
    stage_id: &str,
    item_id: &str,
) -> Result<(&'static StageDef, &'static ChecklistItemDef), CoreError> {
    let stage = validate_stage_id(stage_id)?;
    let item = stage
        .checklist
        .iter()
        .find(|i| i.id == item_id)
        .ok_or_else(|| CoreError::UnknownKey {
            entity: "OnboardingChecklistItem",
            key: item_id.to_string(),
        })?;
    Ok((stage, item))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
