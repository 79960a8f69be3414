use crate::workflows::collections::domain::{AgencyDirectory, AgencyId, CaseRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Routing thresholds for case-to-agency matching. `recommend` evaluates
/// the branches top to bottom and the first match wins; there is no scoring
/// among candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingPolicy {
    pub fresh_min_amount: f64,
    pub fresh_max_days: u32,
    pub fresh_max_avg_late: f64,
    pub aged_min_amount: f64,
    pub aged_min_days: u32,
    pub aged_catchall_min_amount: f64,
    pub aged_catchall_min_days: u32,
    pub mid_min_amount: f64,
    pub mid_max_amount: f64,
    pub mid_fresh_max_days: u32,
    pub fresh_high_value_agency: AgencyId,
    pub aged_high_value_agency: AgencyId,
    pub mid_value_agency: AgencyId,
    pub mid_volume_agency: AgencyId,
    pub low_value_agency: AgencyId,
}

impl MatchingPolicy {
    pub fn standard() -> Self {
        Self {
            fresh_min_amount: 50_000.0,
            fresh_max_days: 60,
            fresh_max_avg_late: 30.0,
            aged_min_amount: 75_000.0,
            aged_min_days: 60,
            aged_catchall_min_amount: 50_000.0,
            aged_catchall_min_days: 90,
            mid_min_amount: 25_000.0,
            mid_max_amount: 75_000.0,
            mid_fresh_max_days: 90,
            fresh_high_value_agency: AgencyId("DCA-Alpha".to_string()),
            aged_high_value_agency: AgencyId("DCA-Omega".to_string()),
            mid_value_agency: AgencyId("DCA-Prime".to_string()),
            mid_volume_agency: AgencyId("DCA-Beta".to_string()),
            low_value_agency: AgencyId("DCA-Gamma".to_string()),
        }
    }
}

/// One entry of the agency performance ranking, drawn from the static
/// directory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyRanking {
    pub rank: usize,
    pub agency_id: AgencyId,
    pub success_rate_pct: f64,
    pub avg_days: u32,
    pub strengths: Vec<String>,
}

/// Matches cases to the agency best placed to work them, and ranks the
/// directory by historical performance.
#[derive(Debug, Clone)]
pub struct AgencyMatcher {
    policy: MatchingPolicy,
    directory: AgencyDirectory,
}

impl AgencyMatcher {
    pub fn new(policy: MatchingPolicy, directory: AgencyDirectory) -> Self {
        Self { policy, directory }
    }

    pub fn directory(&self) -> &AgencyDirectory {
        &self.directory
    }

    /// Recommend the agency that should own a case. Total: every input
    /// combination lands on exactly one branch.
    pub fn recommend(&self, amount: f64, days_overdue: u32, avg_days_late: f64) -> AgencyId {
        let policy = &self.policy;

        if amount > policy.fresh_min_amount
            && days_overdue < policy.fresh_max_days
            && avg_days_late < policy.fresh_max_avg_late
        {
            return policy.fresh_high_value_agency.clone();
        }

        if amount > policy.aged_min_amount && days_overdue >= policy.aged_min_days {
            return policy.aged_high_value_agency.clone();
        }

        // Wider catch-all for large aged debt; overlaps the branch above on
        // purpose and routes to the same specialist.
        if amount > policy.aged_catchall_min_amount && days_overdue > policy.aged_catchall_min_days
        {
            return policy.aged_high_value_agency.clone();
        }

        if amount >= policy.mid_min_amount && amount <= policy.mid_max_amount {
            if days_overdue < policy.mid_fresh_max_days {
                return policy.mid_value_agency.clone();
            }
            return policy.mid_volume_agency.clone();
        }

        policy.low_value_agency.clone()
    }

    pub fn recommend_for(&self, case: &CaseRecord) -> AgencyId {
        self.recommend(case.amount, case.days_overdue, case.history.avg_days_late)
    }

    /// Directory profiles ordered by descending historical success rate,
    /// ties kept in directory order.
    pub fn rankings(&self) -> Vec<AgencyRanking> {
        let mut ranked: Vec<_> = self.directory.profiles().iter().collect();
        ranked.sort_by(|a, b| {
            b.success_rate
                .partial_cmp(&a.success_rate)
                .unwrap_or(Ordering::Equal)
        });

        ranked
            .into_iter()
            .enumerate()
            .map(|(index, profile)| AgencyRanking {
                rank: index + 1,
                agency_id: profile.id.clone(),
                success_rate_pct: profile.success_rate * 100.0,
                avg_days: profile.avg_days_to_recovery,
                strengths: profile.strengths.clone(),
            })
            .collect()
    }
}
