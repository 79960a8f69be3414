use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::collections::domain::{
    AgencyId, CaseId, CaseRecord, CaseStatus, PaymentHistory,
};
use crate::workflows::collections::repository::{CaseRepository, RepositoryError};
use crate::workflows::collections::service::CollectionsTriageService;

/// Baseline mid-value active case; tests override individual fields.
pub(super) fn case(id: &str) -> CaseRecord {
    CaseRecord {
        case_id: CaseId(id.to_string()),
        customer_name: "Global Logistics Inc".to_string(),
        amount: 30_000.0,
        days_overdue: 40,
        invoice_date: NaiveDate::from_ymd_opt(2025, 11, 4).expect("valid date"),
        industry: "Logistics".to_string(),
        region: "TX".to_string(),
        assigned_agency: agency("DCA-Beta"),
        status: CaseStatus::Active,
        days_since_contact: 3,
        contact_attempts: 5,
        history: PaymentHistory {
            avg_days_late: 20.0,
            late_count_24m: 4,
        },
        recovered: false,
        days_to_recovery: None,
    }
}

pub(super) fn case_with(id: &str, amount: f64, days_overdue: u32) -> CaseRecord {
    let mut record = case(id);
    record.amount = amount;
    record.days_overdue = days_overdue;
    record
}

pub(super) fn agency(name: &str) -> AgencyId {
    AgencyId(name.to_string())
}

/// In-memory population snapshot backing service and router tests.
#[derive(Default)]
pub(super) struct TestRepository {
    cases: Mutex<Vec<CaseRecord>>,
}

impl TestRepository {
    pub(super) fn seeded(cases: Vec<CaseRecord>) -> Self {
        Self {
            cases: Mutex::new(cases),
        }
    }
}

impl CaseRepository for TestRepository {
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

pub(super) fn service(cases: Vec<CaseRecord>) -> CollectionsTriageService<TestRepository> {
    CollectionsTriageService::with_standard_rules(Arc::new(TestRepository::seeded(cases)))
}
