use dca_triage::error::AppError;
use dca_triage::workflows::collections::ingest;
use dca_triage::workflows::collections::{
    CaseId, CaseRecord, CaseRepository, CollectionsTriageService, RepositoryError,
    TriageServiceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Population snapshot held in memory for the lifetime of the process.
/// Order-preserving so population-order alert rules stay faithful to the
/// ingested export.
#[derive(Default)]
pub(crate) struct InMemoryCaseRepository {
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

pub(crate) fn load_cases_from_path(path: &Path) -> Result<Vec<CaseRecord>, AppError> {
    let file = File::open(path)?;
    Ok(ingest::parse_cases(file)?)
}

pub(crate) fn triage_service(
    cases: Vec<CaseRecord>,
) -> Result<CollectionsTriageService<InMemoryCaseRepository>, AppError> {
    let repository = Arc::new(InMemoryCaseRepository::default());
    repository.load(cases).map_err(TriageServiceError::from)?;
    Ok(CollectionsTriageService::with_standard_rules(repository))
}
