use crate::workflows::collections::domain::{CaseId, CaseRecord};

/// Read-side access to the current case population snapshot.
///
/// The triage core only ever reads through this seam; cases are created and
/// retired by the upstream ingestion collaborator. `load` exists so serving
/// processes can hydrate their snapshot at startup.
pub trait CaseRepository: Send + Sync {
    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError>;
    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    /// Append a batch of records, returning how many were stored.
    fn load(&self, cases: Vec<CaseRecord>) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("case not found")]
    NotFound,
    #[error("case store unavailable: {0}")]
    Unavailable(String),
}
