use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CaseId, CaseStatus};
use super::repository::CaseRepository;
use super::service::{CaseQuery, CollectionsTriageService, TriageServiceError};
use super::triage::PriorityTier;

/// Router builder exposing the triage operations as JSON endpoints.
pub fn collections_router<R>(service: Arc<CollectionsTriageService<R>>) -> Router
where
    R: CaseRepository + 'static,
{
    Router::new()
        .route("/api/v1/portfolio/metrics", get(metrics_handler::<R>))
        .route("/api/v1/portfolio/alerts", get(alerts_handler::<R>))
        .route("/api/v1/cases", get(cases_handler::<R>))
        .route("/api/v1/cases/:case_id", get(case_detail_handler::<R>))
        .route("/api/v1/agencies", get(agencies_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CaseListParams {
    status: Option<String>,
    priority: Option<String>,
    search: Option<String>,
    limit: Option<usize>,
}

impl CaseListParams {
    fn into_query(self) -> Result<CaseQuery, String> {
        let mut query = CaseQuery::default();

        if let Some(raw) = self.status {
            query.status = Some(
                CaseStatus::parse(&raw).ok_or_else(|| format!("unknown status filter '{raw}'"))?,
            );
        }
        if let Some(raw) = self.priority {
            query.priority = Some(
                PriorityTier::parse(&raw)
                    .ok_or_else(|| format!("unknown priority filter '{raw}'"))?,
            );
        }
        query.search = self.search;
        if let Some(limit) = self.limit {
            query.limit = limit;
        }

        Ok(query)
    }
}

pub(crate) async fn metrics_handler<R>(
    State(service): State<Arc<CollectionsTriageService<R>>>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.metrics() {
        Ok(metrics) => (StatusCode::OK, axum::Json(metrics)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn alerts_handler<R>(
    State(service): State<Arc<CollectionsTriageService<R>>>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.alerts() {
        Ok(alerts) => {
            let payload = json!({
                "total": alerts.len(),
                "alerts": alerts,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn cases_handler<R>(
    State(service): State<Arc<CollectionsTriageService<R>>>,
    Query(params): Query<CaseListParams>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.scored_cases(&query) {
        Ok(cases) => {
            let payload = json!({
                "total": cases.len(),
                "cases": cases,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn case_detail_handler<R>(
    State(service): State<Arc<CollectionsTriageService<R>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let id = CaseId(case_id);
    match service.case_detail(&id) {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(TriageServiceError::UnknownCase(id)) => {
            let payload = json!({
                "error": "case not found",
                "case_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn agencies_handler<R>(
    State(service): State<Arc<CollectionsTriageService<R>>>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.agency_standings() {
        Ok(agencies) => {
            let payload = json!({
                "total": agencies.len(),
                "agencies": agencies,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: TriageServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
