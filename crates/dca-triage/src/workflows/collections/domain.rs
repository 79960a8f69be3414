use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for a debt-collection case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for a collection agency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgencyId(pub String);

impl fmt::Display for AgencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collection status reported by the upstream case feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Active,
    Promised,
    Stalled,
    Disputed,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CaseStatus::Active => "Active",
            CaseStatus::Promised => "Promised",
            CaseStatus::Stalled => "Stalled",
            CaseStatus::Disputed => "Disputed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(CaseStatus::Active),
            "promised" => Some(CaseStatus::Promised),
            "stalled" => Some(CaseStatus::Stalled),
            "disputed" => Some(CaseStatus::Disputed),
            _ => None,
        }
    }
}

/// Trailing 24-month payment behavior for the debtor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub avg_days_late: f64,
    pub late_count_24m: u32,
}

/// One outstanding debt record under collection.
///
/// Records are created by the upstream ingestion collaborator and are
/// read-only here. Amounts and day counts are assumed non-negative and
/// finite; the triage components do not re-validate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: CaseId,
    pub customer_name: String,
    pub amount: f64,
    pub days_overdue: u32,
    pub invoice_date: NaiveDate,
    pub industry: String,
    pub region: String,
    pub assigned_agency: AgencyId,
    pub status: CaseStatus,
    pub days_since_contact: u32,
    pub contact_attempts: u32,
    pub history: PaymentHistory,
    /// Outcome flag, only meaningful for historical records.
    pub recovered: bool,
    pub days_to_recovery: Option<u32>,
}

/// The kind of book an agency performs best on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgencySpecialty {
    HighValueFresh,
    HighValueAged,
    MidValueReliable,
    MidVolume,
    LowValueVolume,
}

impl AgencySpecialty {
    pub const fn label(self) -> &'static str {
        match self {
            AgencySpecialty::HighValueFresh => "high-value fresh",
            AgencySpecialty::HighValueAged => "high-value aged",
            AgencySpecialty::MidValueReliable => "mid-value reliable",
            AgencySpecialty::MidVolume => "mid-value volume",
            AgencySpecialty::LowValueVolume => "low-value volume",
        }
    }
}

/// Static reference profile for one collection agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyProfile {
    pub id: AgencyId,
    pub specialty: AgencySpecialty,
    /// Historical success rate as a fraction in [0, 1].
    pub success_rate: f64,
    pub avg_days_to_recovery: u32,
    pub strengths: Vec<String>,
}

/// Ordered, immutable table of agency profiles.
///
/// Loaded once at process start and treated as constant afterwards; safe
/// for unsynchronized concurrent reads. Ranking and lookup always read this
/// table and never recompute rates from live case outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyDirectory {
    profiles: Vec<AgencyProfile>,
}

impl AgencyDirectory {
    pub fn new(profiles: Vec<AgencyProfile>) -> Self {
        Self { profiles }
    }

    /// The five production agencies with their historical book performance.
    pub fn standard() -> Self {
        fn profile(
            id: &str,
            specialty: AgencySpecialty,
            success_rate: f64,
            avg_days_to_recovery: u32,
            strengths: &[&str],
        ) -> AgencyProfile {
            AgencyProfile {
                id: AgencyId(id.to_string()),
                specialty,
                success_rate,
                avg_days_to_recovery,
                strengths: strengths.iter().map(|s| s.to_string()).collect(),
            }
        }

        Self::new(vec![
            profile(
                "DCA-Alpha",
                AgencySpecialty::HighValueFresh,
                0.92,
                18,
                &["< 60 days", "> $50k", "good history"],
            ),
            profile(
                "DCA-Omega",
                AgencySpecialty::HighValueAged,
                0.87,
                22,
                &["> 90 days", "> $75k", "tough cases"],
            ),
            profile(
                "DCA-Prime",
                AgencySpecialty::MidValueReliable,
                0.79,
                28,
                &["$25k-$75k", "medium risk"],
            ),
            profile(
                "DCA-Beta",
                AgencySpecialty::MidVolume,
                0.71,
                35,
                &["bulk cases", "low-medium value"],
            ),
            profile(
                "DCA-Gamma",
                AgencySpecialty::LowValueVolume,
                0.65,
                42,
                &["< $25k", "high volume"],
            ),
        ])
    }

    pub fn profiles(&self) -> &[AgencyProfile] {
        &self.profiles
    }

    pub fn get(&self, id: &AgencyId) -> Option<&AgencyProfile> {
        self.profiles.iter().find(|profile| &profile.id == id)
    }
}
