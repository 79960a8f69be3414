mod config;
mod rules;

pub use config::{Bracket, BracketTable, Step, StepTable, TriageConfig};

use crate::workflows::collections::domain::{AgencyId, CaseRecord};
use serde::{Deserialize, Serialize};

/// Coarse priority bucket derived from the priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(PriorityTier::High),
            "medium" => Some(PriorityTier::Medium),
            "low" => Some(PriorityTier::Low),
            _ => None,
        }
    }

    /// High sorts before Medium sorts before Low.
    pub const fn sort_rank(self) -> u8 {
        match self {
            PriorityTier::High => 0,
            PriorityTier::Medium => 1,
            PriorityTier::Low => 2,
        }
    }
}

/// Per-case triage estimate, recomputed on every request and owned by the
/// caller. Never persisted here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaseScore {
    /// Percentage in [5.0, 95.0], one decimal.
    pub recovery_probability: f64,
    /// Always at least the configured minimum (10 with standard tables).
    pub expected_days: u32,
    /// 0-10 scale, one decimal.
    pub priority_score: f64,
    pub tier: PriorityTier,
}

/// Stateless scorer applying the rule tables to one case at a time.
///
/// Callers must hand in pre-validated, non-negative, finite numeric inputs;
/// out-of-domain values are a data-quality bug upstream and are deliberately
/// not masked here.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    config: TriageConfig,
}

impl TriageEngine {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn score(
        &self,
        amount: f64,
        days_overdue: u32,
        avg_days_late: f64,
        agency: &AgencyId,
    ) -> CaseScore {
        let recovery_probability =
            rules::recovery_probability(amount, days_overdue, avg_days_late, agency, &self.config);
        let expected_days =
            rules::expected_recovery_days(amount, days_overdue, recovery_probability, &self.config);
        let priority_score =
            rules::priority_score(amount, days_overdue, recovery_probability, &self.config);

        let tier = if priority_score >= self.config.high_priority_cutoff {
            PriorityTier::High
        } else if priority_score >= self.config.medium_priority_cutoff {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        };

        CaseScore {
            recovery_probability,
            expected_days,
            priority_score,
            tier,
        }
    }

    pub fn score_case(&self, case: &CaseRecord) -> CaseScore {
        self.score(
            case.amount,
            case.days_overdue,
            case.history.avg_days_late,
            &case.assigned_agency,
        )
    }
}
