use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use super::common::{case_with, TestRepository};
use crate::workflows::collections::router::collections_router;
use crate::workflows::collections::service::CollectionsTriageService;

fn router_with(cases: Vec<crate::workflows::collections::domain::CaseRecord>) -> axum::Router {
    let repository = Arc::new(TestRepository::seeded(cases));
    let service = Arc::new(CollectionsTriageService::with_standard_rules(repository));
    collections_router(service)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes).expect("body is json");
    (status, value)
}

#[tokio::test]
async fn portfolio_metrics_endpoint_reports_the_aggregates() {
    let router = router_with(vec![
        case_with("DCA-2001", 60_000.0, 85),
        case_with("DCA-2002", 10_000.0, 20),
    ]);

    let (status, body) = get_json(router, "/api/v1/portfolio/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["case_count"], 2);
    assert_eq!(body["total_outstanding"], 70_000.0);
    assert_eq!(body["critical_cases"], 1);
}

#[tokio::test]
async fn cases_endpoint_lists_scored_cases() {
    let router = router_with(vec![case_with("DCA-2001", 60_000.0, 85)]);

    let (status, body) = get_json(router, "/api/v1/cases").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["cases"][0]["case_id"], "DCA-2001");
    assert!(body["cases"][0]["recovery_probability"].is_number());
}

#[tokio::test]
async fn cases_endpoint_rejects_unknown_filters() {
    let router = router_with(vec![]);

    let (status, body) = get_json(router, "/api/v1/cases?priority=urgent").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("urgent"));
}

#[tokio::test]
async fn case_detail_endpoint_returns_404_for_unknown_ids() {
    let router = router_with(vec![]);

    let (status, body) = get_json(router, "/api/v1/cases/DCA-9999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["case_id"], "DCA-9999");
}

#[tokio::test]
async fn agencies_endpoint_returns_the_full_ranking() {
    let router = router_with(vec![]);

    let (status, body) = get_json(router, "/api/v1/agencies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["agencies"][0]["agency_id"], "DCA-Alpha");
    assert_eq!(body["agencies"][0]["rank"], 1);
}

#[tokio::test]
async fn alerts_endpoint_caps_the_feed() {
    let mut cases = Vec::new();
    for index in 0..8 {
        let mut record = case_with(&format!("DCA-28{index:02}"), 90_000.0, 70);
        record.status = crate::workflows::collections::domain::CaseStatus::Stalled;
        record.days_since_contact = 15;
        cases.push(record);
    }
    let router = router_with(cases);

    let (status, body) = get_json(router, "/api/v1/portfolio/alerts").await;

    assert_eq!(status, StatusCode::OK);
    let total = body["total"].as_u64().expect("total present");
    assert!(total <= 10);
}
