//! Compliance rules and status aggregation (PRD-44).
//!
//! Pure checks over pre-loaded insurance, BBBEE, safety, and project
//! requirement data. Each check emits typed issues; the aggregator derives
//! one overall verdict and a sorted expiring-item list. Nothing here is
//! persisted; compliance state is recomputed on every query.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::documents::{days_until_expiry, is_expired, is_expiring_soon, EXPIRING_SOON_DAYS};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Policy types every contractor must hold to operate on site.
pub const REQUIRED_INSURANCE_TYPES: &[&str] = &[
    "public_liability",
    "professional_indemnity",
    "workers_compensation",
];

/// Incidents inside this window count against the safety check.
pub const INCIDENT_LOOKBACK_DAYS: i64 = 365;

/// Compliance is re-reviewed on this cadence.
pub const REVIEW_INTERVAL_DAYS: i64 = 30;

pub const INCIDENT_MINOR: &str = "minor";
pub const INCIDENT_SERIOUS: &str = "serious";
pub const INCIDENT_FATAL: &str = "fatal";

/// All valid incident severities.
pub const VALID_INCIDENT_SEVERITIES: &[&str] =
    &[INCIDENT_MINOR, INCIDENT_SERIOUS, INCIDENT_FATAL];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Category of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Insurance,
    Certification,
    Bbbee,
    Safety,
    Financial,
    Legal,
}

/// Severity of a compliance issue. Ordering matters: the overall verdict is
/// driven by the worst severity present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    High,
    Medium,
    Low,
}

/// Workflow status of an issue. Issues are derived fresh on each query, so
/// only `Open` and `Overdue` are ever emitted; the remaining values exist
/// for consumers that track resolution externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
    Overdue,
}

/// Overall compliance verdict for a contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceVerdict {
    Compliant,
    NonCompliant,
    Pending,
    UnderReview,
}

impl ComplianceVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
        }
    }
}

/// Severity of a recorded safety incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Minor,
    Serious,
    Fatal,
}

impl IncidentSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => INCIDENT_MINOR,
            Self::Serious => INCIDENT_SERIOUS,
            Self::Fatal => INCIDENT_FATAL,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            INCIDENT_MINOR => Ok(Self::Minor),
            INCIDENT_SERIOUS => Ok(Self::Serious),
            INCIDENT_FATAL => Ok(Self::Fatal),
            _ => Err(format!(
                "Invalid incident severity '{s}'. Must be one of: {}",
                VALID_INCIDENT_SEVERITIES.join(", ")
            )),
        }
    }

    /// Serious and fatal incidents count against the safety check.
    pub fn is_reportable(self) -> bool {
        matches!(self, Self::Serious | Self::Fatal)
    }
}

/// Status of a contractor's record against a project requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementRecordStatus {
    Compliant,
    NonCompliant,
    Pending,
}

impl RequirementRecordStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "compliant" => Ok(Self::Compliant),
            "non_compliant" => Ok(Self::NonCompliant),
            "pending" => Ok(Self::Pending),
            _ => Err(format!("Invalid requirement record status '{s}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One insurance policy, as loaded by the caller.
#[derive(Debug, Clone)]
pub struct InsurancePolicyInput {
    pub policy_type: String,
    pub provider: String,
    pub expiry_date: NaiveDate,
}

/// The contractor's BBBEE certificate, when on file.
#[derive(Debug, Clone)]
pub struct BbbeeCertificateInput {
    pub level: i16,
    pub expiry_date: NaiveDate,
}

/// One safety certification on file.
#[derive(Debug, Clone)]
pub struct SafetyCertificationInput {
    pub name: String,
    pub expiry_date: NaiveDate,
}

/// One recorded safety incident.
#[derive(Debug, Clone)]
pub struct SafetyIncidentInput {
    pub severity: IncidentSeverity,
    pub occurred_on: NaiveDate,
}

/// One project requirement, as configured on a project.
#[derive(Debug, Clone)]
pub struct ProjectRequirementInput {
    pub requirement_type: String,
    pub is_mandatory: bool,
}

/// The contractor's record against a project requirement type.
#[derive(Debug, Clone)]
pub struct RequirementRecordInput {
    pub requirement_type: String,
    pub status: RequirementRecordStatus,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// One structured compliance finding.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceIssue {
    /// Deterministic id derived from the finding, stable across recomputes.
    pub id: String,
    pub issue_type: IssueType,
    pub severity: IssueSeverity,
    pub description: String,
    pub required_action: String,
    pub status: IssueStatus,
    pub due_date: Option<NaiveDate>,
}

/// One time-bound credential at or near expiry.
#[derive(Debug, Clone, Serialize)]
pub struct ExpiringItem {
    pub id: String,
    pub item_type: String,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
    pub renewal_required: bool,
}

/// Aggregated compliance status for one contractor.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceStatus {
    pub overall: ComplianceVerdict,
    pub issues: Vec<ComplianceIssue>,
    pub expiring_items: Vec<ExpiringItem>,
    pub last_reviewed: Timestamp,
    pub next_review: Timestamp,
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Insurance check: every required policy type must be on file, unexpired,
/// and not lapsing within the warning window.
pub fn check_insurance(
    policies: &[InsurancePolicyInput],
    today: NaiveDate,
) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();

    for &required in REQUIRED_INSURANCE_TYPES {
        let policy = policies.iter().find(|p| p.policy_type == required);

        match policy {
            None => issues.push(ComplianceIssue {
                id: format!("insurance-{required}-missing"),
                issue_type: IssueType::Insurance,
                severity: IssueSeverity::Critical,
                description: format!("No {required} policy on file"),
                required_action: format!("Obtain and upload a {required} policy"),
                status: IssueStatus::Open,
                due_date: None,
            }),
            Some(p) if is_expired(p.expiry_date, today) => issues.push(ComplianceIssue {
                id: format!("insurance-{required}-expired"),
                issue_type: IssueType::Insurance,
                severity: IssueSeverity::Critical,
                description: format!(
                    "{required} policy with {} expired on {}",
                    p.provider, p.expiry_date
                ),
                required_action: format!("Renew the {required} policy immediately"),
                status: IssueStatus::Overdue,
                due_date: Some(p.expiry_date),
            }),
            Some(p) if is_expiring_soon(p.expiry_date, today) => issues.push(ComplianceIssue {
                id: format!("insurance-{required}-expiring"),
                issue_type: IssueType::Insurance,
                severity: IssueSeverity::High,
                description: format!(
                    "{required} policy with {} expires on {}",
                    p.provider, p.expiry_date
                ),
                required_action: format!("Renew the {required} policy before expiry"),
                status: IssueStatus::Open,
                due_date: Some(p.expiry_date),
            }),
            Some(_) => {}
        }
    }

    issues
}

/// BBBEE check: certificate must be on file, unexpired, and not lapsing soon.
pub fn check_bbbee(
    certificate: Option<&BbbeeCertificateInput>,
    today: NaiveDate,
) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();

    match certificate {
        None => issues.push(ComplianceIssue {
            id: "bbbee-missing".to_string(),
            issue_type: IssueType::Bbbee,
            severity: IssueSeverity::High,
            description: "No BBBEE certificate on file".to_string(),
            required_action: "Upload a current BBBEE certificate or sworn affidavit".to_string(),
            status: IssueStatus::Open,
            due_date: None,
        }),
        Some(cert) if is_expired(cert.expiry_date, today) => issues.push(ComplianceIssue {
            id: "bbbee-expired".to_string(),
            issue_type: IssueType::Bbbee,
            severity: IssueSeverity::Critical,
            description: format!(
                "BBBEE certificate (level {}) expired on {}",
                cert.level, cert.expiry_date
            ),
            required_action: "Renew the BBBEE certificate".to_string(),
            status: IssueStatus::Overdue,
            due_date: Some(cert.expiry_date),
        }),
        Some(cert) if is_expiring_soon(cert.expiry_date, today) => issues.push(ComplianceIssue {
            id: "bbbee-expiring".to_string(),
            issue_type: IssueType::Bbbee,
            severity: IssueSeverity::Medium,
            description: format!(
                "BBBEE certificate (level {}) expires on {}",
                cert.level, cert.expiry_date
            ),
            required_action: "Schedule BBBEE re-verification before expiry".to_string(),
            status: IssueStatus::Open,
            due_date: Some(cert.expiry_date),
        }),
        Some(_) => {}
    }

    issues
}

/// Safety check: certifications must exist and be current; serious or fatal
/// incidents inside the lookback window are flagged.
pub fn check_safety(
    certifications: &[SafetyCertificationInput],
    incidents: &[SafetyIncidentInput],
    today: NaiveDate,
) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();

    if certifications.is_empty() {
        issues.push(ComplianceIssue {
            id: "safety-no-certifications".to_string(),
            issue_type: IssueType::Safety,
            severity: IssueSeverity::Critical,
            description: "No safety certifications on file".to_string(),
            required_action: "Upload safety certifications for supervisory staff".to_string(),
            status: IssueStatus::Open,
            due_date: None,
        });
    }

    for cert in certifications {
        if is_expired(cert.expiry_date, today) {
            issues.push(ComplianceIssue {
                id: format!("safety-cert-expired-{}", slug(&cert.name)),
                issue_type: IssueType::Safety,
                severity: IssueSeverity::Critical,
                description: format!(
                    "Safety certification '{}' expired on {}",
                    cert.name, cert.expiry_date
                ),
                required_action: format!("Renew safety certification '{}'", cert.name),
                status: IssueStatus::Overdue,
                due_date: Some(cert.expiry_date),
            });
        }
    }

    let cutoff = today - Duration::days(INCIDENT_LOOKBACK_DAYS);
    let reportable = incidents
        .iter()
        .filter(|i| i.severity.is_reportable() && i.occurred_on >= cutoff)
        .count();

    if reportable > 0 {
        issues.push(ComplianceIssue {
            id: "safety-recent-incidents".to_string(),
            issue_type: IssueType::Safety,
            severity: IssueSeverity::High,
            description: format!(
                "{reportable} serious or fatal incident(s) recorded in the last 12 months"
            ),
            required_action: "Provide incident investigation reports and corrective actions"
                .to_string(),
            status: IssueStatus::Open,
            due_date: None,
        });
    }

    issues
}

/// Financial check hook. Payment-behaviour and credit-bureau screening run
/// outside this engine; the seam stays so the aggregator's shape does not
/// change when they land.
pub fn check_financial() -> Vec<ComplianceIssue> {
    Vec::new()
}

/// Project-specific requirement check. An absent or non-compliant record is
/// critical for mandatory requirements, medium otherwise.
pub fn check_project_requirements(
    requirements: &[ProjectRequirementInput],
    records: &[RequirementRecordInput],
) -> Vec<ComplianceIssue> {
    let mut issues = Vec::new();

    for req in requirements {
        let record = records
            .iter()
            .find(|r| r.requirement_type == req.requirement_type);

        let satisfied = matches!(
            record.map(|r| r.status),
            Some(RequirementRecordStatus::Compliant) | Some(RequirementRecordStatus::Pending)
        );
        // A pending record is under assessment, not a gap; only absent or
        // explicitly non-compliant records raise an issue.
        if satisfied {
            continue;
        }

        let severity = if req.is_mandatory {
            IssueSeverity::Critical
        } else {
            IssueSeverity::Medium
        };

        issues.push(ComplianceIssue {
            id: format!("project-requirement-{}", slug(&req.requirement_type)),
            issue_type: IssueType::Legal,
            severity,
            description: format!(
                "Requirement '{}' is not satisfied for this project",
                req.requirement_type
            ),
            required_action: format!(
                "Provide evidence of compliance with '{}'",
                req.requirement_type
            ),
            status: IssueStatus::Open,
            due_date: None,
        });
    }

    issues
}

// ---------------------------------------------------------------------------
// Expiring items
// ---------------------------------------------------------------------------

/// Enumerate credentials expired or due within the warning window, sorted
/// ascending by days-until-expiry so the most urgent item is first.
///
/// Consumers render this list without re-sorting; the order is part of the
/// contract.
pub fn collect_expiring_items(
    policies: &[InsurancePolicyInput],
    certifications: &[SafetyCertificationInput],
    bbbee: Option<&BbbeeCertificateInput>,
    today: NaiveDate,
) -> Vec<ExpiringItem> {
    let mut items = Vec::new();

    for policy in policies {
        push_if_due(
            &mut items,
            format!("policy-{}", slug(&policy.policy_type)),
            "insurance_policy",
            format!("{} ({})", policy.policy_type, policy.provider),
            policy.expiry_date,
            today,
        );
    }

    for cert in certifications {
        push_if_due(
            &mut items,
            format!("safety-cert-{}", slug(&cert.name)),
            "safety_certification",
            cert.name.clone(),
            cert.expiry_date,
            today,
        );
    }

    if let Some(cert) = bbbee {
        push_if_due(
            &mut items,
            "bbbee-certificate".to_string(),
            "bbbee_certificate",
            format!("BBBEE certificate (level {})", cert.level),
            cert.expiry_date,
            today,
        );
    }

    items.sort_by_key(|i| i.days_until_expiry);
    items
}

fn push_if_due(
    items: &mut Vec<ExpiringItem>,
    id: String,
    item_type: &str,
    name: String,
    expiry: NaiveDate,
    today: NaiveDate,
) {
    let days = days_until_expiry(expiry, today);
    if days > EXPIRING_SOON_DAYS {
        return;
    }
    items.push(ExpiringItem {
        id,
        item_type: item_type.to_string(),
        name,
        expiry_date: expiry,
        days_until_expiry: days,
        is_expired: days < 0,
        is_expiring_soon: (0..=EXPIRING_SOON_DAYS).contains(&days),
        renewal_required: true,
    });
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Derive the overall verdict. Priority order, first match wins:
/// critical issue, high issue or expired item, expiring item, compliant.
pub fn derive_overall(
    issues: &[ComplianceIssue],
    expiring: &[ExpiringItem],
) -> ComplianceVerdict {
    if issues.iter().any(|i| i.severity == IssueSeverity::Critical) {
        return ComplianceVerdict::NonCompliant;
    }
    if issues.iter().any(|i| i.severity == IssueSeverity::High)
        || expiring.iter().any(|e| e.is_expired)
    {
        return ComplianceVerdict::UnderReview;
    }
    if expiring.iter().any(|e| e.is_expiring_soon) {
        return ComplianceVerdict::Pending;
    }
    ComplianceVerdict::Compliant
}

/// Assemble the full status with review timestamps.
pub fn build_status(
    issues: Vec<ComplianceIssue>,
    expiring_items: Vec<ExpiringItem>,
    now: Timestamp,
) -> ComplianceStatus {
    ComplianceStatus {
        overall: derive_overall(&issues, &expiring_items),
        issues,
        expiring_items,
        last_reviewed: now,
        next_review: now + Duration::days(REVIEW_INTERVAL_DAYS),
    }
}

/// Lowercase a free-text name into a stable id fragment.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2026, 6, 15)
    }

    fn policy(policy_type: &str, expiry: NaiveDate) -> InsurancePolicyInput {
        InsurancePolicyInput {
            policy_type: policy_type.to_string(),
            provider: "Santam".to_string(),
            expiry_date: expiry,
        }
    }

    fn all_policies_valid() -> Vec<InsurancePolicyInput> {
        REQUIRED_INSURANCE_TYPES
            .iter()
            .map(|t| policy(t, day(2027, 6, 15)))
            .collect()
    }

    // -- insurance ------------------------------------------------------------

    #[test]
    fn missing_required_policy_is_critical_open() {
        let policies = vec![
            policy("public_liability", day(2027, 1, 1)),
            policy("professional_indemnity", day(2027, 1, 1)),
            // workers_compensation missing
        ];
        let issues = check_insurance(&policies, today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert_eq!(issues[0].status, IssueStatus::Open);
        assert!(issues[0].description.contains("workers_compensation"));
    }

    #[test]
    fn expired_policy_is_critical_overdue() {
        let mut policies = all_policies_valid();
        policies[0].expiry_date = day(2026, 1, 1);
        let issues = check_insurance(&policies, today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert_eq!(issues[0].status, IssueStatus::Overdue);
        assert_eq!(issues[0].due_date, Some(day(2026, 1, 1)));
    }

    #[test]
    fn policy_expiring_within_30_days_is_high() {
        let mut policies = all_policies_valid();
        policies[1].expiry_date = day(2026, 7, 1);
        let issues = check_insurance(&policies, today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::High);
        assert_eq!(issues[0].status, IssueStatus::Open);
    }

    #[test]
    fn fully_covered_contractor_has_no_insurance_issues() {
        assert!(check_insurance(&all_policies_valid(), today()).is_empty());
    }

    #[test]
    fn extra_policy_types_are_ignored() {
        let mut policies = all_policies_valid();
        policies.push(policy("motor_fleet", day(2026, 1, 1)));
        assert!(check_insurance(&policies, today()).is_empty());
    }

    // -- bbbee ----------------------------------------------------------------

    #[test]
    fn missing_bbbee_is_high() {
        let issues = check_bbbee(None, today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::High);
    }

    #[test]
    fn expired_bbbee_is_critical_overdue() {
        let cert = BbbeeCertificateInput {
            level: 2,
            expiry_date: day(2026, 5, 1),
        };
        let issues = check_bbbee(Some(&cert), today());
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert_eq!(issues[0].status, IssueStatus::Overdue);
    }

    #[test]
    fn bbbee_expiring_soon_is_medium() {
        let cert = BbbeeCertificateInput {
            level: 2,
            expiry_date: day(2026, 7, 1),
        };
        let issues = check_bbbee(Some(&cert), today());
        assert_eq!(issues[0].severity, IssueSeverity::Medium);
    }

    #[test]
    fn current_bbbee_has_no_issues() {
        let cert = BbbeeCertificateInput {
            level: 1,
            expiry_date: day(2027, 6, 15),
        };
        assert!(check_bbbee(Some(&cert), today()).is_empty());
    }

    // -- safety ---------------------------------------------------------------

    fn safety_cert(name: &str, expiry: NaiveDate) -> SafetyCertificationInput {
        SafetyCertificationInput {
            name: name.to_string(),
            expiry_date: expiry,
        }
    }

    #[test]
    fn zero_certifications_is_critical() {
        let issues = check_safety(&[], &[], today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
        assert_eq!(issues[0].id, "safety-no-certifications");
    }

    #[test]
    fn each_expired_certification_is_flagged() {
        let certs = vec![
            safety_cert("First Aid Level 2", day(2026, 1, 1)),
            safety_cert("Working at Heights", day(2026, 2, 1)),
            safety_cert("HIRA", day(2027, 1, 1)),
        ];
        let issues = check_safety(&certs, &[], today());
        let overdue: Vec<_> = issues
            .iter()
            .filter(|i| i.status == IssueStatus::Overdue)
            .collect();
        assert_eq!(overdue.len(), 2);
        assert!(overdue.iter().all(|i| i.severity == IssueSeverity::Critical));
    }

    #[test]
    fn recent_serious_incident_is_high() {
        let certs = vec![safety_cert("First Aid Level 2", day(2027, 1, 1))];
        let incidents = vec![SafetyIncidentInput {
            severity: IncidentSeverity::Serious,
            occurred_on: day(2026, 3, 1),
        }];
        let issues = check_safety(&certs, &incidents, today());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, IssueSeverity::High);
        assert_eq!(issues[0].id, "safety-recent-incidents");
    }

    #[test]
    fn old_or_minor_incidents_are_ignored() {
        let certs = vec![safety_cert("First Aid Level 2", day(2027, 1, 1))];
        let incidents = vec![
            SafetyIncidentInput {
                severity: IncidentSeverity::Fatal,
                occurred_on: day(2024, 1, 1), // outside lookback
            },
            SafetyIncidentInput {
                severity: IncidentSeverity::Minor,
                occurred_on: day(2026, 6, 1), // recent but minor
            },
        ];
        assert!(check_safety(&certs, &incidents, today()).is_empty());
    }

    // -- project requirements -------------------------------------------------

    fn requirement(requirement_type: &str, mandatory: bool) -> ProjectRequirementInput {
        ProjectRequirementInput {
            requirement_type: requirement_type.to_string(),
            is_mandatory: mandatory,
        }
    }

    #[test]
    fn absent_mandatory_requirement_is_critical() {
        let issues = check_project_requirements(&[requirement("wayleave_training", true)], &[]);
        assert_eq!(issues[0].severity, IssueSeverity::Critical);
    }

    #[test]
    fn absent_optional_requirement_is_medium() {
        let issues = check_project_requirements(&[requirement("municipal_vendor", false)], &[]);
        assert_eq!(issues[0].severity, IssueSeverity::Medium);
    }

    #[test]
    fn non_compliant_record_raises_issue() {
        let records = vec![RequirementRecordInput {
            requirement_type: "wayleave_training".to_string(),
            status: RequirementRecordStatus::NonCompliant,
        }];
        let issues =
            check_project_requirements(&[requirement("wayleave_training", true)], &records);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn compliant_and_pending_records_satisfy() {
        let records = vec![
            RequirementRecordInput {
                requirement_type: "wayleave_training".to_string(),
                status: RequirementRecordStatus::Compliant,
            },
            RequirementRecordInput {
                requirement_type: "municipal_vendor".to_string(),
                status: RequirementRecordStatus::Pending,
            },
        ];
        let requirements = vec![
            requirement("wayleave_training", true),
            requirement("municipal_vendor", false),
        ];
        assert!(check_project_requirements(&requirements, &records).is_empty());
    }

    // -- expiring items -------------------------------------------------------

    #[test]
    fn expiring_items_sorted_ascending_by_days() {
        let policies = vec![
            policy("public_liability", day(2026, 7, 10)),   // 25 days
            policy("workers_compensation", day(2026, 6, 20)), // 5 days
        ];
        let certs = vec![safety_cert("First Aid", day(2026, 6, 10))]; // -5 days
        let items = collect_expiring_items(&policies, &certs, None, today());

        assert_eq!(items.len(), 3);
        let days: Vec<i64> = items.iter().map(|i| i.days_until_expiry).collect();
        assert_eq!(days, vec![-5, 5, 25]);
        assert!(items[0].is_expired);
        assert!(items[1].is_expiring_soon);
    }

    #[test]
    fn items_beyond_window_are_excluded() {
        let policies = vec![policy("public_liability", day(2026, 8, 1))]; // 47 days
        let items = collect_expiring_items(&policies, &[], None, today());
        assert!(items.is_empty());
    }

    #[test]
    fn bbbee_certificate_appears_in_expiring_items() {
        let cert = BbbeeCertificateInput {
            level: 3,
            expiry_date: day(2026, 6, 25),
        };
        let items = collect_expiring_items(&[], &[], Some(&cert), today());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_type, "bbbee_certificate");
        assert!(items[0].renewal_required);
    }

    // -- overall verdict ------------------------------------------------------

    fn issue(severity: IssueSeverity) -> ComplianceIssue {
        ComplianceIssue {
            id: "test".to_string(),
            issue_type: IssueType::Insurance,
            severity,
            description: String::new(),
            required_action: String::new(),
            status: IssueStatus::Open,
            due_date: None,
        }
    }

    fn expiring(days: i64) -> ExpiringItem {
        ExpiringItem {
            id: "test".to_string(),
            item_type: "insurance_policy".to_string(),
            name: String::new(),
            expiry_date: today(),
            days_until_expiry: days,
            is_expired: days < 0,
            is_expiring_soon: (0..=EXPIRING_SOON_DAYS).contains(&days),
            renewal_required: true,
        }
    }

    #[test]
    fn critical_issue_means_non_compliant() {
        let verdict = derive_overall(&[issue(IssueSeverity::Critical)], &[]);
        assert_eq!(verdict, ComplianceVerdict::NonCompliant);
    }

    #[test]
    fn high_issue_means_under_review() {
        let verdict = derive_overall(&[issue(IssueSeverity::High)], &[]);
        assert_eq!(verdict, ComplianceVerdict::UnderReview);
    }

    #[test]
    fn expired_item_means_under_review() {
        let verdict = derive_overall(&[], &[expiring(-3)]);
        assert_eq!(verdict, ComplianceVerdict::UnderReview);
    }

    #[test]
    fn expiring_item_means_pending() {
        let verdict = derive_overall(&[], &[expiring(10)]);
        assert_eq!(verdict, ComplianceVerdict::Pending);
    }

    #[test]
    fn clean_contractor_is_compliant() {
        assert_eq!(derive_overall(&[], &[]), ComplianceVerdict::Compliant);
    }

    #[test]
    fn critical_wins_over_expiring() {
        let verdict = derive_overall(&[issue(IssueSeverity::Critical)], &[expiring(10)]);
        assert_eq!(verdict, ComplianceVerdict::NonCompliant);
    }

    #[test]
    fn medium_issues_alone_do_not_block() {
        let verdict = derive_overall(&[issue(IssueSeverity::Medium)], &[]);
        assert_eq!(verdict, ComplianceVerdict::Compliant);
    }

    // -- build_status ---------------------------------------------------------

    #[test]
    fn build_status_sets_review_window() {
        let now = Utc.with_ymd_and_hms(2026, 6, 15, 9, 0, 0).unwrap();
        let status = build_status(vec![], vec![], now);
        assert_eq!(status.overall, ComplianceVerdict::Compliant);
        assert_eq!(status.next_review - status.last_reviewed, Duration::days(30));
    }

    // -- scenario: expired critical insurance ---------------------------------

    #[test]
    fn missing_workers_compensation_scenario() {
        let policies = vec![
            policy("public_liability", day(2027, 1, 1)),
            policy("professional_indemnity", day(2027, 1, 1)),
        ];
        let certs = vec![safety_cert("First Aid", day(2027, 1, 1))];
        let bbbee = BbbeeCertificateInput {
            level: 2,
            expiry_date: day(2027, 1, 1),
        };

        let mut issues = check_insurance(&policies, today());
        issues.extend(check_bbbee(Some(&bbbee), today()));
        issues.extend(check_safety(&certs, &[], today()));
        issues.extend(check_financial());

        let items = collect_expiring_items(&policies, &certs, Some(&bbbee), today());
        let status = build_status(issues, items, Utc::now());

        assert_eq!(status.overall, ComplianceVerdict::NonCompliant);
        let critical = &status.issues[0];
        assert_eq!(critical.severity, IssueSeverity::Critical);
        assert_eq!(critical.status, IssueStatus::Open);
        assert!(critical.description.contains("workers_compensation"));
    }
}
