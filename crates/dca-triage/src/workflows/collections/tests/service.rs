use super::common::{agency, case, case_with, service};
use crate::workflows::collections::domain::{CaseId, CaseStatus};
use crate::workflows::collections::service::{CaseQuery, TriageServiceError};
use crate::workflows::collections::triage::PriorityTier;

#[test]
fn listing_scores_every_case_in_snapshot_order() {
    let service = service(vec![
        case_with("DCA-2001", 120_000.0, 20),
        case_with("DCA-2002", 8_000.0, 10),
    ]);

    let views = service
        .scored_cases(&CaseQuery::default())
        .expect("listing builds");

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].case_id, "DCA-2001");
    assert!(views[0].recovery_probability >= 5.0);
    assert_eq!(views[0].status, "Active");
}

#[test]
fn status_filter_narrows_the_listing() {
    let mut stalled = case("DCA-2001");
    stalled.status = CaseStatus::Stalled;
    let service = service(vec![stalled, case("DCA-2002")]);

    let views = service
        .scored_cases(&CaseQuery {
            status: Some(CaseStatus::Stalled),
            ..CaseQuery::default()
        })
        .expect("listing builds");

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].case_id, "DCA-2001");
}

#[test]
fn priority_filter_applies_to_the_derived_tier() {
    let service = service(vec![
        // High: large, aged, good history, strong agency.
        {
            let mut record = case_with("DCA-2001", 120_000.0, 95);
            record.history.avg_days_late = 10.0;
            record.assigned_agency = agency("DCA-Alpha");
            record
        },
        case_with("DCA-2002", 8_000.0, 10),
    ]);

    let views = service
        .scored_cases(&CaseQuery {
            priority: Some(PriorityTier::High),
            ..CaseQuery::default()
        })
        .expect("listing builds");

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].case_id, "DCA-2001");
    assert_eq!(views[0].priority, "high");
}

#[test]
fn search_matches_customer_case_id_and_agency() {
    let mut by_name = case("DCA-2001");
    by_name.customer_name = "Pacific Trade Group".to_string();
    let mut by_agency = case("DCA-2002");
    by_agency.assigned_agency = agency("DCA-Omega");
    let service = service(vec![by_name, by_agency, case("DCA-2103")]);

    let by_customer = service
        .scored_cases(&CaseQuery {
            search: Some("pacific".to_string()),
            ..CaseQuery::default()
        })
        .expect("listing builds");
    assert_eq!(by_customer.len(), 1);
    assert_eq!(by_customer[0].case_id, "DCA-2001");

    let by_dca = service
        .scored_cases(&CaseQuery {
            search: Some("omega".to_string()),
            ..CaseQuery::default()
        })
        .expect("listing builds");
    assert_eq!(by_dca.len(), 1);

    let by_id = service
        .scored_cases(&CaseQuery {
            search: Some("2103".to_string()),
            ..CaseQuery::default()
        })
        .expect("listing builds");
    assert_eq!(by_id.len(), 1);
}

#[test]
fn limit_caps_the_listing() {
    let cases = (0..6)
        .map(|index| case(&format!("DCA-20{index:02}")))
        .collect();
    let service = service(cases);

    let views = service
        .scored_cases(&CaseQuery {
            limit: 4,
            ..CaseQuery::default()
        })
        .expect("listing builds");

    assert_eq!(views.len(), 4);
}

#[test]
fn case_detail_includes_score_and_recommendation() {
    let mut record = case_with("DCA-2001", 120_000.0, 95);
    record.history.avg_days_late = 10.0;
    record.assigned_agency = agency("DCA-Alpha");
    let service = service(vec![record]);

    let detail = service
        .case_detail(&CaseId("DCA-2001".to_string()))
        .expect("detail builds");

    // Large and aged lands on the aged-high-value specialist.
    assert_eq!(detail.recommended_agency, "DCA-Omega");
    assert_eq!(detail.action, "Immediate escalation");
    assert!(detail.action_reason.contains("High priority"));
    assert_eq!(detail.scored.priority, "high");
}

#[test]
fn case_detail_for_calm_cases_recommends_monitoring() {
    let service = service(vec![case_with("DCA-2001", 8_000.0, 10)]);

    let detail = service
        .case_detail(&CaseId("DCA-2001".to_string()))
        .expect("detail builds");

    assert_eq!(detail.action, "Continue monitoring");
    assert_eq!(detail.recommended_agency, "DCA-Gamma");
}

#[test]
fn unknown_cases_surface_a_typed_error() {
    let service = service(vec![]);

    match service.case_detail(&CaseId("DCA-9999".to_string())) {
        Err(TriageServiceError::UnknownCase(id)) => assert_eq!(id.0, "DCA-9999"),
        other => panic!("expected unknown-case error, got {other:?}"),
    }
}

#[test]
fn agency_standings_keep_static_order_and_attach_live_stats() {
    let mut worked = case_with("DCA-2001", 40_000.0, 30);
    worked.assigned_agency = agency("DCA-Gamma");
    worked.recovered = true;
    let mut open = case_with("DCA-2002", 10_000.0, 15);
    open.assigned_agency = agency("DCA-Gamma");
    let service = service(vec![worked, open]);

    let standings = service.agency_standings().expect("standings build");

    // Static ranking order survives even though only Gamma has live work.
    assert_eq!(standings[0].agency_id, "DCA-Alpha");
    assert!(standings[0].live.is_none());

    let gamma = standings
        .iter()
        .find(|standing| standing.agency_id == "DCA-Gamma")
        .expect("gamma ranked");
    assert_eq!(gamma.rank, 5);
    let live = gamma.live.expect("gamma has live stats");
    assert_eq!(live.case_count, 2);
    assert_eq!(live.outstanding_amount, 50_000.0);
    assert_eq!(live.recovered_amount, 40_000.0);
}

#[test]
fn metrics_and_alerts_flow_through_the_facade() {
    let mut stalled = case_with("DCA-2001", 90_000.0, 70);
    stalled.status = CaseStatus::Stalled;
    stalled.days_since_contact = 21;
    let service = service(vec![stalled, case("DCA-2002")]);

    let metrics = service.metrics().expect("metrics build");
    assert_eq!(metrics.case_count, 2);
    assert_eq!(metrics.total_outstanding, 120_000.0);

    let alerts = service.alerts().expect("alerts build");
    assert!(alerts
        .iter()
        .any(|alert| alert.title == "High-Value Case Stalled"));
}
