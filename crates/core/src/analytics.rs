//! Aggregate onboarding / risk statistics (PRD-52).
//!
//! Pure aggregation over per-contractor views produced by the other
//! modules. Read-only; the engine layer loads the views and reports here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::compliance::ComplianceVerdict;
use crate::progress::{OnboardingProgress, OnboardingStatus};
use crate::rag::RiskTier;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Counts and averages across all contractors' onboarding progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnboardingStatistics {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub approved: usize,
    pub rejected: usize,
    pub stalled: usize,
    /// Mean completion percentage across all contractors (0 when empty).
    pub avg_completion_pct: f64,
}

/// Contractor counts per risk tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Contractor counts per compliance verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceDistribution {
    pub compliant: usize,
    pub non_compliant: usize,
    pub pending: usize,
    pub under_review: usize,
}

/// One month of the approval trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrendPoint {
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub approvals: usize,
}

/// The combined analytics report.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingReport {
    pub onboarding: OnboardingStatistics,
    pub risk: RiskDistribution,
    pub compliance: ComplianceDistribution,
    pub approval_trend: Vec<MonthlyTrendPoint>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Tally onboarding statuses and completion across contractors.
pub fn compute_onboarding_statistics(views: &[OnboardingProgress]) -> OnboardingStatistics {
    let mut stats = OnboardingStatistics {
        total: views.len(),
        not_started: 0,
        in_progress: 0,
        completed: 0,
        approved: 0,
        rejected: 0,
        stalled: 0,
        avg_completion_pct: 0.0,
    };

    if views.is_empty() {
        return stats;
    }

    let mut pct_sum = 0u64;
    for view in views {
        match view.status {
            OnboardingStatus::NotStarted => stats.not_started += 1,
            OnboardingStatus::InProgress => stats.in_progress += 1,
            OnboardingStatus::Completed => stats.completed += 1,
            OnboardingStatus::Approved => stats.approved += 1,
            OnboardingStatus::Rejected => stats.rejected += 1,
        }
        if view.stalled {
            stats.stalled += 1;
        }
        pct_sum += view.completion_pct as u64;
    }

    stats.avg_completion_pct = pct_sum as f64 / views.len() as f64;
    stats
}

/// Tally risk tiers.
pub fn compute_risk_distribution(tiers: &[RiskTier]) -> RiskDistribution {
    let mut dist = RiskDistribution::default();
    for tier in tiers {
        match tier {
            RiskTier::Low => dist.low += 1,
            RiskTier::Medium => dist.medium += 1,
            RiskTier::High => dist.high += 1,
        }
    }
    dist
}

/// Tally compliance verdicts.
pub fn compute_compliance_distribution(verdicts: &[ComplianceVerdict]) -> ComplianceDistribution {
    let mut dist = ComplianceDistribution::default();
    for verdict in verdicts {
        match verdict {
            ComplianceVerdict::Compliant => dist.compliant += 1,
            ComplianceVerdict::NonCompliant => dist.non_compliant += 1,
            ComplianceVerdict::Pending => dist.pending += 1,
            ComplianceVerdict::UnderReview => dist.under_review += 1,
        }
    }
    dist
}

/// Bucket approval timestamps into a month-ascending trend series.
pub fn approval_trend(approved_at: &[Timestamp]) -> Vec<MonthlyTrendPoint> {
    let mut buckets: BTreeMap<String, usize> = BTreeMap::new();
    for ts in approved_at {
        *buckets.entry(ts.format("%Y-%m").to_string()).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(month, approvals)| MonthlyTrendPoint { month, approvals })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
