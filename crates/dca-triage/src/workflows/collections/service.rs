use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::domain::{AgencyDirectory, AgencyId, CaseId, CaseRecord, CaseStatus};
use super::matching::{AgencyMatcher, MatchingPolicy};
use super::report::views::{AgencyCaseStats, AgencyStanding, CaseDetailView, ScoredCaseView};
use super::report::{aggregate_metrics, synthesize_alerts, Alert, AlertPolicy, PortfolioMetrics};
use super::repository::{CaseRepository, RepositoryError};
use super::triage::{CaseScore, PriorityTier, TriageConfig, TriageEngine};

/// Filters for the scored case listing. Mirrors the query surface of the
/// upstream dashboard: status, derived priority tier, and a free-text
/// search over customer, case id, and assigned agency.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseQuery {
    pub status: Option<CaseStatus>,
    pub priority: Option<PriorityTier>,
    pub search: Option<String>,
    pub limit: usize,
}

impl Default for CaseQuery {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            search: None,
            limit: 100,
        }
    }
}

/// Facade composing the repository snapshot with the triage engine, agency
/// matcher, and alert policy. All derived values are recomputed per call.
pub struct CollectionsTriageService<R> {
    repository: Arc<R>,
    engine: TriageEngine,
    matcher: AgencyMatcher,
    alert_policy: AlertPolicy,
}

impl<R> CollectionsTriageService<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        triage: TriageConfig,
        matching: MatchingPolicy,
        directory: AgencyDirectory,
        alerts: AlertPolicy,
    ) -> Self {
        Self {
            repository,
            engine: TriageEngine::new(triage),
            matcher: AgencyMatcher::new(matching, directory),
            alert_policy: alerts,
        }
    }

    /// Production rule tables and the standard agency directory.
    pub fn with_standard_rules(repository: Arc<R>) -> Self {
        Self::new(
            repository,
            TriageConfig::standard(),
            MatchingPolicy::standard(),
            AgencyDirectory::standard(),
            AlertPolicy::standard(),
        )
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    pub fn matcher(&self) -> &AgencyMatcher {
        &self.matcher
    }

    /// Score every case passing the filters, newest snapshot order.
    pub fn scored_cases(&self, query: &CaseQuery) -> Result<Vec<ScoredCaseView>, TriageServiceError> {
        let cases = self.repository.all()?;
        let needle = query
            .search
            .as_ref()
            .map(|raw| raw.trim().to_ascii_lowercase())
            .filter(|raw| !raw.is_empty());

        let mut views = Vec::new();
        for case in &cases {
            if views.len() >= query.limit {
                break;
            }
            if let Some(status) = query.status {
                if case.status != status {
                    continue;
                }
            }
            if let Some(needle) = &needle {
                if !matches_search(case, needle) {
                    continue;
                }
            }

            let score = self.engine.score_case(case);
            if let Some(priority) = query.priority {
                if score.tier != priority {
                    continue;
                }
            }

            views.push(ScoredCaseView::new(case, &score));
        }

        debug!(total = views.len(), "scored case listing assembled");
        Ok(views)
    }

    /// Score one case and recommend the agency that should own it.
    pub fn case_detail(&self, id: &CaseId) -> Result<CaseDetailView, TriageServiceError> {
        let case = self
            .repository
            .fetch(id)?
            .ok_or_else(|| TriageServiceError::UnknownCase(id.clone()))?;

        let score = self.engine.score_case(&case);
        let recommended = self.matcher.recommend_for(&case);

        Ok(CaseDetailView::new(&case, &score, &recommended.0))
    }

    /// Synthesize the operational alert feed from the full population.
    pub fn alerts(&self) -> Result<Vec<Alert>, TriageServiceError> {
        let cases = self.repository.all()?;
        let scores: Vec<CaseScore> = cases.iter().map(|case| self.engine.score_case(case)).collect();
        Ok(synthesize_alerts(&self.alert_policy, &cases, &scores))
    }

    /// Reduce the full population into dashboard KPIs.
    pub fn metrics(&self) -> Result<PortfolioMetrics, TriageServiceError> {
        let cases = self.repository.all()?;
        Ok(aggregate_metrics(&cases))
    }

    /// Static performance ranking enriched with the live workload observed
    /// for each agency. The live stats never reorder the ranking.
    pub fn agency_standings(&self) -> Result<Vec<AgencyStanding>, TriageServiceError> {
        let cases = self.repository.all()?;

        let mut live: HashMap<AgencyId, AgencyCaseStats> = HashMap::new();
        for case in &cases {
            let stats = live
                .entry(case.assigned_agency.clone())
                .or_insert(AgencyCaseStats {
                    case_count: 0,
                    outstanding_amount: 0.0,
                    recovered_amount: 0.0,
                });
            stats.case_count += 1;
            stats.outstanding_amount += case.amount;
            if case.recovered {
                stats.recovered_amount += case.amount;
            }
        }

        Ok(self
            .matcher
            .rankings()
            .iter()
            .map(|ranking| AgencyStanding::new(ranking, live.get(&ranking.agency_id).copied()))
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("unknown case {0}")]
    UnknownCase(CaseId),
}

fn matches_search(case: &CaseRecord, needle: &str) -> bool {
    case.customer_name.to_ascii_lowercase().contains(needle)
        || case.case_id.0.to_ascii_lowercase().contains(needle)
        || case.assigned_agency.0.to_ascii_lowercase().contains(needle)
}
