use crate::workflows::collections::domain::{CaseRecord, PaymentHistory};
use crate::workflows::collections::matching::AgencyRanking;
use crate::workflows::collections::triage::{CaseScore, PriorityTier};
use chrono::NaiveDate;
use serde::Serialize;

/// Flat, serializable projection of one case plus its triage estimate,
/// shaped for the case-list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCaseView {
    pub case_id: String,
    pub customer_name: String,
    pub amount: f64,
    pub days_overdue: u32,
    pub invoice_date: NaiveDate,
    pub industry: String,
    pub region: String,
    pub assigned_agency: String,
    pub status: &'static str,
    pub days_since_contact: u32,
    pub contact_attempts: u32,
    pub customer_history: PaymentHistory,
    pub recovery_probability: f64,
    pub expected_days_to_recovery: u32,
    pub priority: &'static str,
    pub priority_score: f64,
}

impl ScoredCaseView {
    pub fn new(case: &CaseRecord, score: &CaseScore) -> Self {
        Self {
            case_id: case.case_id.0.clone(),
            customer_name: case.customer_name.clone(),
            amount: case.amount,
            days_overdue: case.days_overdue,
            invoice_date: case.invoice_date,
            industry: case.industry.clone(),
            region: case.region.clone(),
            assigned_agency: case.assigned_agency.0.clone(),
            status: case.status.label(),
            days_since_contact: case.days_since_contact,
            contact_attempts: case.contact_attempts,
            customer_history: case.history,
            recovery_probability: score.recovery_probability,
            expected_days_to_recovery: score.expected_days,
            priority: score.tier.label(),
            priority_score: score.priority_score,
        }
    }
}

/// Single-case drill-down: the scored view plus routing guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseDetailView {
    #[serde(flatten)]
    pub scored: ScoredCaseView,
    pub recommended_agency: String,
    pub action: &'static str,
    pub action_reason: String,
}

impl CaseDetailView {
    pub fn new(case: &CaseRecord, score: &CaseScore, recommended_agency: &str) -> Self {
        let action = match score.tier {
            PriorityTier::High => "Immediate escalation",
            PriorityTier::Medium | PriorityTier::Low => "Continue monitoring",
        };
        let action_reason = format!(
            "{} priority case with {:.1}% recovery probability",
            capitalize(score.tier.label()),
            score.recovery_probability,
        );

        Self {
            scored: ScoredCaseView::new(case, score),
            recommended_agency: recommended_agency.to_string(),
            action,
            action_reason,
        }
    }
}

/// Live workload observed for one agency across the current population.
/// Enrichment only; never feeds back into the static ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgencyCaseStats {
    pub case_count: usize,
    pub outstanding_amount: f64,
    pub recovered_amount: f64,
}

/// One ranked agency with its static profile data and, when the agency
/// appears in the live population, its observed workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyStanding {
    pub rank: usize,
    pub agency_id: String,
    pub success_rate_pct: f64,
    pub avg_days: u32,
    pub strengths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<AgencyCaseStats>,
}

impl AgencyStanding {
    pub fn new(ranking: &AgencyRanking, live: Option<AgencyCaseStats>) -> Self {
        Self {
            rank: ranking.rank,
            agency_id: ranking.agency_id.0.clone(),
            success_rate_pct: ranking.success_rate_pct,
            avg_days: ranking.avg_days,
            strengths: ranking.strengths.clone(),
            live,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
