//! CSV ingestion for the upstream case export.

use crate::workflows::collections::domain::{
    AgencyId, CaseId, CaseRecord, CaseStatus, PaymentHistory,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: unrecognized case status '{value}'")]
    UnknownStatus { row: usize, value: String },
    #[error("row {row}: invalid invoice date '{value}'")]
    InvalidDate {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("row {row}: invalid days-to-recovery '{value}'")]
    InvalidRecoveryDays { row: usize, value: String },
}

/// Parse the upstream case export into core records. Row numbers in errors
/// count the header as row 1.
pub fn parse_cases<R: Read>(reader: R) -> Result<Vec<CaseRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in csv_reader.deserialize::<CaseRow>().enumerate() {
        let row_number = index + 2;
        let row = result?;
        records.push(row.into_record(row_number)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    case_id: String,
    customer_name: String,
    amount: f64,
    days_overdue: u32,
    invoice_date: String,
    industry: String,
    #[serde(rename = "state")]
    region: String,
    customer_avg_days_late: f64,
    customer_late_count_24m: u32,
    #[serde(rename = "assigned_dca")]
    assigned_agency: String,
    status: String,
    last_contact_days_ago: u32,
    contact_attempts: u32,
    recovered: u8,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    days_to_recovery: Option<String>,
}

impl CaseRow {
    fn into_record(self, row: usize) -> Result<CaseRecord, IngestError> {
        let status = CaseStatus::parse(&self.status).ok_or_else(|| IngestError::UnknownStatus {
            row,
            value: self.status.clone(),
        })?;

        let invoice_date = NaiveDate::parse_from_str(&self.invoice_date, "%Y-%m-%d").map_err(
            |source| IngestError::InvalidDate {
                row,
                value: self.invoice_date.clone(),
                source,
            },
        )?;

        // The export writes the column as a float and leaves it blank for
        // unrecovered cases.
        let days_to_recovery = match &self.days_to_recovery {
            Some(raw) => {
                let parsed = raw
                    .parse::<f64>()
                    .map_err(|_| IngestError::InvalidRecoveryDays {
                        row,
                        value: raw.clone(),
                    })?;
                Some(parsed.round() as u32)
            }
            None => None,
        };

        Ok(CaseRecord {
            case_id: CaseId(self.case_id),
            customer_name: self.customer_name,
            amount: self.amount,
            days_overdue: self.days_overdue,
            invoice_date,
            industry: self.industry,
            region: self.region,
            assigned_agency: AgencyId(self.assigned_agency),
            status,
            days_since_contact: self.last_contact_days_ago,
            contact_attempts: self.contact_attempts,
            history: PaymentHistory {
                avg_days_late: self.customer_avg_days_late,
                late_count_24m: self.customer_late_count_24m,
            },
            recovered: self.recovered != 0,
            days_to_recovery,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
