//! Integration specifications for the collections triage workflow.
//!
//! Scenarios run end-to-end through the public service facade and HTTP
//! router so scoring, routing, alerting, and aggregation are validated
//! without reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use dca_triage::workflows::collections::{
        AgencyId, CaseId, CaseRecord, CaseRepository, CaseStatus, CollectionsTriageService,
        PaymentHistory, RepositoryError,
    };

    #[derive(Default)]
    pub(super) struct InMemoryCaseRepository {
        cases: Mutex<Vec<CaseRecord>>,
    }

    impl CaseRepository for InMemoryCaseRepository {
        fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError> {
            Ok(self.cases.lock().expect("repository mutex poisoned").clone())
        }

        fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
            let guard = self.cases.lock().expect("repository mutex poisoned");
            Ok(guard.iter().find(|case| &case.case_id == id).cloned())
        }

        fn load(&self, cases: Vec<CaseRecord>) -> Result<usize, RepositoryError> {
            let mut guard = self.cases.lock().expect("repository mutex poisoned");
            let loaded = cases.len();
            guard.extend(cases);
            Ok(loaded)
        }
    }

    pub(super) fn record(
        id: &str,
        amount: f64,
        days_overdue: u32,
        status: CaseStatus,
        agency: &str,
    ) -> CaseRecord {
        CaseRecord {
            case_id: CaseId(id.to_string()),
            customer_name: "Continental Express".to_string(),
            amount,
            days_overdue,
            invoice_date: NaiveDate::from_ymd_opt(2025, 10, 20).expect("valid date"),
            industry: "Logistics".to_string(),
            region: "IL".to_string(),
            assigned_agency: AgencyId(agency.to_string()),
            status,
            days_since_contact: 8,
            contact_attempts: 6,
            history: PaymentHistory {
                avg_days_late: 18.0,
                late_count_24m: 3,
            },
            recovered: false,
            days_to_recovery: None,
        }
    }

    pub(super) fn portfolio() -> Vec<CaseRecord> {
        vec![
            record("DCA-2001", 120_000.0, 20, CaseStatus::Active, "DCA-Alpha"),
            record("DCA-2002", 92_000.0, 70, CaseStatus::Stalled, "DCA-Omega"),
            record("DCA-2003", 45_000.0, 88, CaseStatus::Active, "DCA-Prime"),
            record("DCA-2004", 30_000.0, 95, CaseStatus::Disputed, "DCA-Beta"),
            record("DCA-2005", 12_000.0, 35, CaseStatus::Promised, "DCA-Gamma"),
        ]
    }

    pub(super) fn triage_service() -> CollectionsTriageService<InMemoryCaseRepository> {
        let repository = Arc::new(InMemoryCaseRepository::default());
        repository.load(portfolio()).expect("portfolio loads");
        CollectionsTriageService::with_standard_rules(repository)
    }
}

use dca_triage::workflows::collections::{
    collections_router, CaseId, CaseQuery, CaseStatus, PriorityTier,
};
use std::sync::Arc;

#[test]
fn scores_the_whole_portfolio_within_invariant_bounds() {
    let service = common::triage_service();

    let views = service
        .scored_cases(&CaseQuery::default())
        .expect("listing builds");

    assert_eq!(views.len(), 5);
    for view in &views {
        assert!((5.0..=95.0).contains(&view.recovery_probability));
        assert!((0.0..=10.0).contains(&view.priority_score));
        assert!(view.expected_days_to_recovery >= 10);
    }
}

#[test]
fn fresh_high_value_case_scores_at_the_ceiling_and_stays_with_the_fresh_specialist() {
    let service = common::triage_service();

    let detail = service
        .case_detail(&CaseId("DCA-2001".to_string()))
        .expect("detail builds");

    // 0.70 - 0.10 + 0.20 + 0.0 (18 avg days late) + 0.15 = 0.95 ceiling.
    assert_eq!(detail.scored.recovery_probability, 95.0);
    assert_eq!(detail.recommended_agency, "DCA-Alpha");
}

#[test]
fn aged_mid_value_case_is_rerouted_to_the_volume_specialist() {
    let service = common::triage_service();

    let detail = service
        .case_detail(&CaseId("DCA-2004".to_string()))
        .expect("detail builds");

    assert_eq!(detail.recommended_agency, "DCA-Beta");
}

#[test]
fn alert_feed_flags_the_stalled_high_value_case_first() {
    let service = common::triage_service();

    let alerts = service.alerts().expect("alerts build");

    assert!(alerts.len() <= 10);
    let first = alerts.first().expect("at least one alert");
    assert_eq!(first.tier, PriorityTier::High);
    assert_eq!(
        first.case_id.as_ref().map(|id| id.0.as_str()),
        Some("DCA-2002"),
    );
}

#[test]
fn portfolio_metrics_match_the_seeded_book() {
    let service = common::triage_service();

    let metrics = service.metrics().expect("metrics build");

    assert_eq!(metrics.case_count, 5);
    assert_eq!(metrics.total_outstanding, 299_000.0);
    // No case is both over $50k and past 80 days, so nothing is critical.
    assert_eq!(metrics.critical_cases, 0);
    assert_eq!(metrics.recovered_this_period, 0.0);
    assert_eq!(metrics.recovery_rate_pct, 0.0);
}

#[test]
fn status_filter_and_ranking_work_through_the_facade() {
    let service = common::triage_service();

    let stalled = service
        .scored_cases(&CaseQuery {
            status: Some(CaseStatus::Stalled),
            ..CaseQuery::default()
        })
        .expect("listing builds");
    assert_eq!(stalled.len(), 1);
    assert_eq!(stalled[0].case_id, "DCA-2002");

    let standings = service.agency_standings().expect("standings build");
    assert_eq!(standings.len(), 5);
    assert_eq!(standings[0].agency_id, "DCA-Alpha");
    assert_eq!(standings[4].agency_id, "DCA-Gamma");
}

#[tokio::test]
async fn http_surface_serves_the_seeded_portfolio() {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    let router = collections_router(Arc::new(common::triage_service()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/portfolio/metrics")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
    assert_eq!(body["case_count"], 5);
}
