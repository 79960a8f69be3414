//! Debt-collection case triage: recovery scoring, agency matching, alert
//! synthesis, and portfolio KPIs.
//!
//! The case population and the agency directory are supplied by callers;
//! every operation here is a pure function of those inputs and never mutates
//! them, so calls may be partitioned across threads freely.

pub mod domain;
pub mod ingest;
pub mod matching;
pub mod report;
pub mod repository;
mod router;
pub mod service;
pub mod triage;

pub use domain::{
    AgencyDirectory, AgencyId, AgencyProfile, AgencySpecialty, CaseId, CaseRecord, CaseStatus,
    PaymentHistory,
};
pub use matching::{AgencyMatcher, AgencyRanking, MatchingPolicy};
pub use report::{
    aggregate_metrics, synthesize_alerts, Alert, AlertPolicy, PortfolioMetrics,
    PERIOD_ATTRIBUTION_FACTOR,
};
pub use repository::{CaseRepository, RepositoryError};
pub use router::collections_router;
pub use service::{CaseQuery, CollectionsTriageService, TriageServiceError};
pub use triage::{CaseScore, PriorityTier, TriageConfig, TriageEngine};

#[cfg(test)]
mod tests;
