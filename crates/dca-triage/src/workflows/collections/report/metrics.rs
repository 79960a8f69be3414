use crate::workflows::collections::domain::CaseRecord;
use serde::Serialize;

/// Share of recovered principal attributed to the current reporting period.
/// The dashboard applies this flat factor instead of date-windowing the
/// recoveries; there is no calendar logic behind it.
pub const PERIOD_ATTRIBUTION_FACTOR: f64 = 0.35;

const CRITICAL_MIN_AMOUNT: f64 = 50_000.0;
const CRITICAL_MIN_DAYS_OVERDUE: u32 = 80;

/// Dashboard-level KPIs reduced from the full case population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioMetrics {
    pub total_outstanding: f64,
    pub critical_cases: usize,
    pub recovered_this_period: f64,
    pub recovery_rate_pct: f64,
    pub case_count: usize,
}

impl PortfolioMetrics {
    /// The defined no-data value for an empty population.
    pub fn empty() -> Self {
        Self {
            total_outstanding: 0.0,
            critical_cases: 0,
            recovered_this_period: 0.0,
            recovery_rate_pct: 0.0,
            case_count: 0,
        }
    }
}

/// Reduce the population into portfolio KPIs. An empty population yields
/// [`PortfolioMetrics::empty`], never an error.
pub fn aggregate_metrics(cases: &[CaseRecord]) -> PortfolioMetrics {
    if cases.is_empty() {
        return PortfolioMetrics::empty();
    }

    let total_outstanding: f64 = cases.iter().map(|case| case.amount).sum();

    let critical_cases = cases
        .iter()
        .filter(|case| {
            case.amount > CRITICAL_MIN_AMOUNT && case.days_overdue > CRITICAL_MIN_DAYS_OVERDUE
        })
        .count();

    let recovered_amount: f64 = cases
        .iter()
        .filter(|case| case.recovered)
        .map(|case| case.amount)
        .sum();
    let recovered_count = cases.iter().filter(|case| case.recovered).count();

    PortfolioMetrics {
        total_outstanding: round_cents(total_outstanding),
        critical_cases,
        recovered_this_period: round_cents(recovered_amount * PERIOD_ATTRIBUTION_FACTOR),
        recovery_rate_pct: round_tenth(recovered_count as f64 / cases.len() as f64 * 100.0),
        case_count: cases.len(),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
