use crate::infra::{AppState, InMemoryCaseRepository};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use dca_triage::workflows::collections::{collections_router, CollectionsTriageService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_collections_routes(
    service: Arc<CollectionsTriageService<InMemoryCaseRepository>>,
) -> axum::Router {
    collections_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_portfolio;
    use crate::infra::triage_service;

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn collections_routes_mount_over_the_demo_portfolio() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::util::ServiceExt;

        let service = triage_service(demo_portfolio()).expect("demo service builds");
        let router = with_collections_routes(Arc::new(service));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/agencies")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
