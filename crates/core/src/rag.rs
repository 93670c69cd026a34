//! Contractor RAG (Red/Amber/Green) risk scoring (PRD-47).
//!
//! Pure computation over pre-loaded assignment history, team composition,
//! and contractor attributes. Four weighted sub-scores blend into one
//! overall 0-100 score, mapped to a risk tier, with rule-based
//! recommendations. Never mutates contractor state; recomputed on demand.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

// Performance facets.
pub const PERF_W_COMPLETION: f64 = 0.25;
pub const PERF_W_QUALITY: f64 = 0.25;
pub const PERF_W_TIMELINESS: f64 = 0.25;
pub const PERF_W_SATISFACTION: f64 = 0.15;
pub const PERF_W_COMPLEXITY: f64 = 0.10;

// Financial facets.
pub const FIN_W_PAYMENT: f64 = 0.30;
pub const FIN_W_STABILITY: f64 = 0.25;
pub const FIN_W_CREDIT: f64 = 0.20;
pub const FIN_W_INSURANCE: f64 = 0.15;
pub const FIN_W_BONDING: f64 = 0.10;

// Reliability facets.
pub const REL_W_HISTORY: f64 = 0.25;
pub const REL_W_TEAM_STABILITY: f64 = 0.20;
pub const REL_W_CERTIFICATION: f64 = 0.20;
pub const REL_W_COMPLIANCE: f64 = 0.20;
pub const REL_W_COMMUNICATION: f64 = 0.15;

// Capability facets.
pub const CAP_W_SKILLS: f64 = 0.25;
pub const CAP_W_EQUIPMENT: f64 = 0.20;
pub const CAP_W_EXPERIENCE: f64 = 0.25;
pub const CAP_W_CERTIFICATION: f64 = 0.15;
pub const CAP_W_BREADTH: f64 = 0.15;

// Overall blend.
pub const OVERALL_W_PERFORMANCE: f64 = 0.30;
pub const OVERALL_W_FINANCIAL: f64 = 0.25;
pub const OVERALL_W_RELIABILITY: f64 = 0.25;
pub const OVERALL_W_CAPABILITIES: f64 = 0.20;

// ---------------------------------------------------------------------------
// Thresholds and defaults
// ---------------------------------------------------------------------------

/// Overall score at or above which risk is Low.
pub const LOW_RISK_THRESHOLD: u8 = 80;
/// Overall score at or above which risk is Medium (below Low).
pub const MEDIUM_RISK_THRESHOLD: u8 = 60;

/// A sub-score below this triggers a targeted recommendation.
pub const RECOMMENDATION_THRESHOLD: u8 = 70;

/// Neutral default for performance facets when a contractor has no
/// completed assignments. Avoids penalizing new contractors for having no
/// history at all.
pub const NEUTRAL_PERFORMANCE_SCORE: f64 = 70.0;

/// Default per-assignment rating when none was recorded.
pub const DEFAULT_ASSIGNMENT_RATING: f64 = 70.0;

/// Default technical-skill score when a contractor has no registered teams.
pub const DEFAULT_SKILL_SCORE: f64 = 60.0;

/// Average contract value at which the complexity facet reaches 100.
pub const COMPLEXITY_FULL_SCORE_VALUE: f64 = 2_000_000.0;

/// Points per historical assignment toward the project-history facet.
pub const HISTORY_POINTS_PER_ASSIGNMENT: f64 = 4.0;

/// Points per average team year toward team stability (on a base of 50).
pub const STABILITY_POINTS_PER_YEAR: f64 = 10.0;

/// Points per distinct team type toward specialization breadth.
pub const BREADTH_POINTS_PER_TYPE: f64 = 25.0;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

pub const SKILL_JUNIOR: &str = "junior";
pub const SKILL_INTERMEDIATE: &str = "intermediate";
pub const SKILL_SENIOR: &str = "senior";
pub const SKILL_EXPERT: &str = "expert";

/// All valid team skill levels.
pub const VALID_SKILL_LEVELS: &[&str] =
    &[SKILL_JUNIOR, SKILL_INTERMEDIATE, SKILL_SENIOR, SKILL_EXPERT];

/// Team skill level, mapped onto a 0-100 technical-skill contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Junior,
    Intermediate,
    Senior,
    Expert,
}

impl SkillLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => SKILL_JUNIOR,
            Self::Intermediate => SKILL_INTERMEDIATE,
            Self::Senior => SKILL_SENIOR,
            Self::Expert => SKILL_EXPERT,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SKILL_JUNIOR => Ok(Self::Junior),
            SKILL_INTERMEDIATE => Ok(Self::Intermediate),
            SKILL_SENIOR => Ok(Self::Senior),
            SKILL_EXPERT => Ok(Self::Expert),
            _ => Err(format!(
                "Invalid skill level '{s}'. Must be one of: {}",
                VALID_SKILL_LEVELS.join(", ")
            )),
        }
    }

    /// Technical-skill points for this level.
    pub fn points(self) -> f64 {
        match self {
            Self::Junior => 60.0,
            Self::Intermediate => 75.0,
            Self::Senior => 90.0,
            Self::Expert => 100.0,
        }
    }
}

/// Assignment lifecycle status, as recorded on project assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid assignment status '{s}'")),
        }
    }
}

/// Risk tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Map an overall score onto a risk tier. Boundaries are exact:
/// `>= 80` low, `>= 60` medium, below that high.
pub fn risk_tier(overall: u8) -> RiskTier {
    if overall >= LOW_RISK_THRESHOLD {
        RiskTier::Low
    } else if overall >= MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One project assignment, as loaded by the caller.
#[derive(Debug, Clone)]
pub struct AssignmentInput {
    pub status: AssignmentStatus,
    pub quality_score: Option<f64>,
    pub timeliness_score: Option<f64>,
    pub performance_rating: Option<f64>,
    pub contract_value: f64,
}

/// One contractor team, as loaded by the caller.
#[derive(Debug, Clone)]
pub struct TeamInput {
    pub skill_level: SkillLevel,
    pub team_type: String,
    pub years_active: f64,
}

/// Everything the scorer needs about one contractor, pre-loaded.
#[derive(Debug, Clone)]
pub struct ContractorSignals {
    pub assignments: Vec<AssignmentInput>,
    pub teams: Vec<TeamInput>,
    pub years_in_business: i32,
    pub payment_history_score: f64,
    pub credit_rating_score: f64,
    pub insurance_verified: bool,
    pub bonding_capacity: bool,
    pub equipment_rating: f64,
    pub communication_rating: f64,
    pub valid_certifications: usize,
    pub expired_certifications: usize,
    pub compliant_records: usize,
    pub non_compliant_records: usize,
}

// ---------------------------------------------------------------------------
// Sub-score breakdowns
// ---------------------------------------------------------------------------

/// Performance sub-score with its facet breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceScore {
    pub score: u8,
    pub completion_rate: u8,
    pub quality: u8,
    pub timeliness: u8,
    pub client_satisfaction: u8,
    pub complexity: u8,
}

/// Financial sub-score with its facet breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialScore {
    pub score: u8,
    pub payment_history: u8,
    pub stability: u8,
    pub credit_rating: u8,
    pub insurance: u8,
    pub bonding: u8,
}

/// Reliability sub-score with its facet breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct ReliabilityScore {
    pub score: u8,
    pub project_history: u8,
    pub team_stability: u8,
    pub certification_status: u8,
    pub compliance_record: u8,
    pub communication: u8,
}

/// Capability sub-score with its facet breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityScore {
    pub score: u8,
    pub technical_skills: u8,
    pub equipment: u8,
    pub team_experience: u8,
    pub certification_level: u8,
    pub specialization_breadth: u8,
}

/// The complete RAG score for one contractor.
#[derive(Debug, Clone, Serialize)]
pub struct RagScore {
    pub overall: u8,
    pub risk: RiskTier,
    pub performance: PerformanceScore,
    pub financial: FinancialScore,
    pub reliability: ReliabilityScore,
    pub capabilities: CapabilityScore,
    pub computed_at: Timestamp,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Scoring helpers
// ---------------------------------------------------------------------------

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn round_score(value: f64) -> u8 {
    clamp_score(value).round() as u8
}

// ---------------------------------------------------------------------------
// Performance
// ---------------------------------------------------------------------------

/// Score delivery performance from assignment history.
///
/// Cold-start rule: with zero completed assignments every facet defaults to
/// the neutral 70 so new contractors are not scored as failures.
pub fn score_performance(assignments: &[AssignmentInput]) -> PerformanceScore {
    let completed: Vec<&AssignmentInput> = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Completed)
        .collect();

    if completed.is_empty() {
        let neutral = NEUTRAL_PERFORMANCE_SCORE;
        return PerformanceScore {
            score: round_score(neutral),
            completion_rate: round_score(neutral),
            quality: round_score(neutral),
            timeliness: round_score(neutral),
            client_satisfaction: round_score(neutral),
            complexity: round_score(neutral),
        };
    }

    let completion_rate =
        clamp_score(completed.len() as f64 / assignments.len() as f64 * 100.0);

    let avg = |f: fn(&AssignmentInput) -> Option<f64>| -> f64 {
        let total: f64 = completed
            .iter()
            .map(|a| f(a).map(clamp_score).unwrap_or(DEFAULT_ASSIGNMENT_RATING))
            .sum();
        total / completed.len() as f64
    };

    let quality = avg(|a| a.quality_score);
    let timeliness = avg(|a| a.timeliness_score);
    let satisfaction = avg(|a| a.performance_rating);

    let avg_value: f64 =
        completed.iter().map(|a| a.contract_value).sum::<f64>() / completed.len() as f64;
    let complexity = clamp_score(avg_value / COMPLEXITY_FULL_SCORE_VALUE * 100.0);

    let score = completion_rate * PERF_W_COMPLETION
        + quality * PERF_W_QUALITY
        + timeliness * PERF_W_TIMELINESS
        + satisfaction * PERF_W_SATISFACTION
        + complexity * PERF_W_COMPLEXITY;

    PerformanceScore {
        score: round_score(score),
        completion_rate: round_score(completion_rate),
        quality: round_score(quality),
        timeliness: round_score(timeliness),
        client_satisfaction: round_score(satisfaction),
        complexity: round_score(complexity),
    }
}

// ---------------------------------------------------------------------------
// Financial
// ---------------------------------------------------------------------------

/// Stability heuristic: base 50 plus bonuses for longevity and track-record
/// depth, capped at 100.
pub fn stability_score(years_in_business: i32, total_projects: usize) -> f64 {
    let mut score = 50.0;

    score += match years_in_business {
        y if y >= 10 => 25.0,
        y if y >= 5 => 15.0,
        y if y >= 2 => 5.0,
        _ => 0.0,
    };

    score += match total_projects {
        p if p >= 50 => 25.0,
        p if p >= 20 => 15.0,
        p if p >= 5 => 10.0,
        _ => 0.0,
    };

    clamp_score(score)
}

/// Score financial standing from payment behaviour, longevity, credit, and
/// cover flags.
pub fn score_financial(signals: &ContractorSignals) -> FinancialScore {
    let payment = clamp_score(signals.payment_history_score);
    let stability = stability_score(signals.years_in_business, signals.assignments.len());
    let credit = clamp_score(signals.credit_rating_score);
    let insurance = if signals.insurance_verified { 90.0 } else { 50.0 };
    let bonding = if signals.bonding_capacity { 85.0 } else { 60.0 };

    let score = payment * FIN_W_PAYMENT
        + stability * FIN_W_STABILITY
        + credit * FIN_W_CREDIT
        + insurance * FIN_W_INSURANCE
        + bonding * FIN_W_BONDING;

    FinancialScore {
        score: round_score(score),
        payment_history: round_score(payment),
        stability: round_score(stability),
        credit_rating: round_score(credit),
        insurance: round_score(insurance),
        bonding: round_score(bonding),
    }
}

// ---------------------------------------------------------------------------
// Reliability
// ---------------------------------------------------------------------------

/// Score reliability from history depth, team tenure, certification and
/// compliance track record, and communication rating.
pub fn score_reliability(signals: &ContractorSignals) -> ReliabilityScore {
    let history = clamp_score(signals.assignments.len() as f64 * HISTORY_POINTS_PER_ASSIGNMENT);

    let team_stability = if signals.teams.is_empty() {
        50.0
    } else {
        let avg_years: f64 = signals.teams.iter().map(|t| t.years_active).sum::<f64>()
            / signals.teams.len() as f64;
        clamp_score(50.0 + avg_years * STABILITY_POINTS_PER_YEAR)
    };

    let total_certs = signals.valid_certifications + signals.expired_certifications;
    let certification = if total_certs == 0 {
        40.0
    } else {
        40.0 + 50.0 * signals.valid_certifications as f64 / total_certs as f64
    };

    let total_records = signals.compliant_records + signals.non_compliant_records;
    let compliance = if total_records == 0 {
        70.0
    } else {
        100.0 * signals.compliant_records as f64 / total_records as f64
    };

    let communication = clamp_score(signals.communication_rating);

    let score = history * REL_W_HISTORY
        + team_stability * REL_W_TEAM_STABILITY
        + certification * REL_W_CERTIFICATION
        + compliance * REL_W_COMPLIANCE
        + communication * REL_W_COMMUNICATION;

    ReliabilityScore {
        score: round_score(score),
        project_history: round_score(history),
        team_stability: round_score(team_stability),
        certification_status: round_score(certification),
        compliance_record: round_score(compliance),
        communication: round_score(communication),
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Score delivery capability from team composition, equipment, and
/// specialization breadth.
pub fn score_capabilities(signals: &ContractorSignals) -> CapabilityScore {
    let technical_skills = if signals.teams.is_empty() {
        DEFAULT_SKILL_SCORE
    } else {
        signals.teams.iter().map(|t| t.skill_level.points()).sum::<f64>()
            / signals.teams.len() as f64
    };

    let equipment = clamp_score(signals.equipment_rating);

    let team_experience = if signals.teams.is_empty() {
        40.0
    } else {
        let avg_years: f64 = signals.teams.iter().map(|t| t.years_active).sum::<f64>()
            / signals.teams.len() as f64;
        clamp_score(40.0 + avg_years * 12.0)
    };

    let certification_level =
        clamp_score(50.0 + 10.0 * signals.valid_certifications as f64);

    let distinct_types = {
        let mut types: Vec<&str> = signals.teams.iter().map(|t| t.team_type.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        types.len()
    };
    let breadth = clamp_score(distinct_types as f64 * BREADTH_POINTS_PER_TYPE);

    let score = technical_skills * CAP_W_SKILLS
        + equipment * CAP_W_EQUIPMENT
        + team_experience * CAP_W_EXPERIENCE
        + certification_level * CAP_W_CERTIFICATION
        + breadth * CAP_W_BREADTH;

    CapabilityScore {
        score: round_score(score),
        technical_skills: round_score(technical_skills),
        equipment: round_score(equipment),
        team_experience: round_score(team_experience),
        certification_level: round_score(certification_level),
        specialization_breadth: round_score(breadth),
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// Rule-based recommendations: one targeted entry per weak sub-score plus a
/// summary keyed to the overall tier.
pub fn build_recommendations(
    performance: &PerformanceScore,
    financial: &FinancialScore,
    reliability: &ReliabilityScore,
    capabilities: &CapabilityScore,
    tier: RiskTier,
) -> Vec<String> {
    let mut out = Vec::new();

    if performance.score < RECOMMENDATION_THRESHOLD {
        out.push(
            "Schedule a performance review: completion, quality, or timeliness ratings are below target"
                .to_string(),
        );
    }
    if financial.score < RECOMMENDATION_THRESHOLD {
        out.push(
            "Request updated financials and proof of insurance/bonding before awarding further work"
                .to_string(),
        );
    }
    if reliability.score < RECOMMENDATION_THRESHOLD {
        out.push(
            "Limit concurrent assignments until the reliability track record improves".to_string(),
        );
    }
    if capabilities.score < RECOMMENDATION_THRESHOLD {
        out.push(
            "Require additional certified staff or equipment before assigning complex builds"
                .to_string(),
        );
    }

    out.push(match tier {
        RiskTier::Low => "Low risk: eligible for all project tiers".to_string(),
        RiskTier::Medium => {
            "Medium risk: eligible with standard monitoring; review quarterly".to_string()
        }
        RiskTier::High => {
            "High risk: restrict to low-value projects and require enhanced supervision"
                .to_string()
        }
    });

    out
}

// ---------------------------------------------------------------------------
// Top-level computation
// ---------------------------------------------------------------------------

/// Compute the full RAG score for one contractor.
///
/// Pure and side-effect free: identical signals always produce an identical
/// score (apart from `computed_at`, which the caller supplies).
pub fn calculate_rag_score(signals: &ContractorSignals, now: Timestamp) -> RagScore {
    let performance = score_performance(&signals.assignments);
    let financial = score_financial(signals);
    let reliability = score_reliability(signals);
    let capabilities = score_capabilities(signals);

    let overall = round_score(
        performance.score as f64 * OVERALL_W_PERFORMANCE
            + financial.score as f64 * OVERALL_W_FINANCIAL
            + reliability.score as f64 * OVERALL_W_RELIABILITY
            + capabilities.score as f64 * OVERALL_W_CAPABILITIES,
    );
    let risk = risk_tier(overall);

    let recommendations =
        build_recommendations(&performance, &financial, &reliability, &capabilities, risk);

    RagScore {
        overall,
        risk,
        performance,
        financial,
        reliability,
        capabilities,
        computed_at: now,
        recommendations,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
