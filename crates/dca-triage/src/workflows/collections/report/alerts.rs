use crate::workflows::collections::domain::{AgencyId, CaseId, CaseRecord, CaseStatus};
use crate::workflows::collections::triage::{CaseScore, PriorityTier};
use serde::Serialize;
use std::collections::BTreeMap;

// Each rule stamps a fixed representative detection recency so repeated
// synthesis passes stay deterministic.
const STALLED_RECENCY_MINUTES: u32 = 15;
const SLA_RECENCY_MINUTES: u32 = 45;
const PROMISE_RECENCY_MINUTES: u32 = 90;
const AGENCY_RECENCY_MINUTES: u32 = 180;

/// Ephemeral operational notice. Re-derived on every synthesis pass; there
/// is no identity, deduplication, or dismissal state across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub tier: PriorityTier,
    pub title: &'static str,
    pub detail: String,
    /// Absent for population-level alerts such as agency underperformance.
    pub case_id: Option<CaseId>,
    pub detected_minutes_ago: u32,
}

/// Thresholds and caps for alert synthesis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPolicy {
    /// Presentation cap; overflow drops the lowest-priority alerts.
    pub max_alerts: usize,
    pub stalled_min_amount: f64,
    pub stalled_take: usize,
    /// Half-open days-overdue window flagged as SLA-imminent.
    pub sla_min_days: u32,
    pub sla_max_days: u32,
    pub sla_take: usize,
    pub promise_contact_gap: u32,
    pub promise_take: usize,
    /// Observed (live) recovery-rate floor below which an agency is flagged.
    pub agency_rate_floor: f64,
}

impl AlertPolicy {
    pub fn standard() -> Self {
        Self {
            max_alerts: 10,
            stalled_min_amount: 75_000.0,
            stalled_take: 3,
            sla_min_days: 85,
            sla_max_days: 95,
            sla_take: 2,
            promise_contact_gap: 5,
            promise_take: 2,
            agency_rate_floor: 0.60,
        }
    }
}

/// Scan the full population and emit at most `max_alerts` alerts, High
/// before Medium before Low, stable within a tier.
///
/// `scores` runs parallel to `cases` (same order); it feeds context into
/// alert details and does not change which rules fire.
pub fn synthesize_alerts(
    policy: &AlertPolicy,
    cases: &[CaseRecord],
    scores: &[CaseScore],
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    high_value_stalled(policy, cases, scores, &mut alerts);
    sla_imminent(policy, cases, &mut alerts);
    broken_promises(policy, cases, &mut alerts);
    agency_underperformance(policy, cases, &mut alerts);

    alerts.sort_by_key(|alert| alert.tier.sort_rank());
    alerts.truncate(policy.max_alerts);
    alerts
}

fn high_value_stalled(
    policy: &AlertPolicy,
    cases: &[CaseRecord],
    scores: &[CaseScore],
    alerts: &mut Vec<Alert>,
) {
    let mut stalled: Vec<usize> = (0..cases.len())
        .filter(|&index| {
            cases[index].status == CaseStatus::Stalled
                && cases[index].amount > policy.stalled_min_amount
        })
        .collect();
    stalled.sort_by(|&a, &b| {
        cases[b]
            .amount
            .partial_cmp(&cases[a].amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for &index in stalled.iter().take(policy.stalled_take) {
        let case = &cases[index];
        let detail = match scores.get(index) {
            Some(score) => format!(
                "Case {} (${:.0}) has had no contact in {} days via {}; recovery odds now {:.1}%",
                case.case_id,
                case.amount,
                case.days_since_contact,
                case.assigned_agency,
                score.recovery_probability,
            ),
            None => format!(
                "Case {} (${:.0}) has had no contact in {} days via {}",
                case.case_id, case.amount, case.days_since_contact, case.assigned_agency,
            ),
        };

        alerts.push(Alert {
            tier: PriorityTier::High,
            title: "High-Value Case Stalled",
            detail,
            case_id: Some(case.case_id.clone()),
            detected_minutes_ago: STALLED_RECENCY_MINUTES,
        });
    }
}

fn sla_imminent(policy: &AlertPolicy, cases: &[CaseRecord], alerts: &mut Vec<Alert>) {
    let imminent = cases.iter().filter(|case| {
        case.days_overdue >= policy.sla_min_days
            && case.days_overdue < policy.sla_max_days
            && case.status != CaseStatus::Stalled
    });

    for case in imminent.take(policy.sla_take) {
        alerts.push(Alert {
            tier: PriorityTier::High,
            title: "SLA Breach Imminent",
            detail: format!(
                "Case {} approaching the 90-day threshold (currently {} days overdue)",
                case.case_id, case.days_overdue,
            ),
            case_id: Some(case.case_id.clone()),
            detected_minutes_ago: SLA_RECENCY_MINUTES,
        });
    }
}

fn broken_promises(policy: &AlertPolicy, cases: &[CaseRecord], alerts: &mut Vec<Alert>) {
    let broken = cases.iter().filter(|case| {
        case.status == CaseStatus::Promised && case.days_since_contact > policy.promise_contact_gap
    });

    for case in broken.take(policy.promise_take) {
        alerts.push(Alert {
            tier: PriorityTier::Medium,
            title: "Payment Promise Overdue",
            detail: format!(
                "Customer {} promised payment of ${:.0}; nothing received after {} days",
                case.customer_name, case.amount, case.days_since_contact,
            ),
            case_id: Some(case.case_id.clone()),
            detected_minutes_ago: PROMISE_RECENCY_MINUTES,
        });
    }
}

/// Live signal: observed recovery rate per assigned agency, computed from
/// the population's `recovered` flags. Independent of the static directory.
fn agency_underperformance(policy: &AlertPolicy, cases: &[CaseRecord], alerts: &mut Vec<Alert>) {
    let mut tallies: BTreeMap<&AgencyId, (usize, usize)> = BTreeMap::new();
    for case in cases {
        let tally = tallies.entry(&case.assigned_agency).or_insert((0, 0));
        tally.0 += 1;
        if case.recovered {
            tally.1 += 1;
        }
    }

    for (agency, (total, recovered)) in tallies {
        let observed_rate = recovered as f64 / total as f64;
        if observed_rate < policy.agency_rate_floor {
            alerts.push(Alert {
                tier: PriorityTier::Medium,
                title: "Agency Performance Drop",
                detail: format!(
                    "{} observed recovery rate at {:.0}% across {} cases (floor {:.0}%)",
                    agency,
                    observed_rate * 100.0,
                    total,
                    policy.agency_rate_floor * 100.0,
                ),
                case_id: None,
                detected_minutes_ago: AGENCY_RECENCY_MINUTES,
            });
        }
    }
}
