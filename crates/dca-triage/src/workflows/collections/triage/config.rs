use crate::workflows::collections::domain::AgencyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a [`StepTable`]: `value` applies when the input is strictly
/// greater than `above`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub above: f64,
    pub value: f64,
}

/// Ordered `(above, value)` rows, thresholds descending; the first row the
/// input exceeds wins and `fallback` covers everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTable {
    pub steps: Vec<Step>,
    pub fallback: f64,
}

impl StepTable {
    pub fn new(steps: &[(f64, f64)], fallback: f64) -> Self {
        Self {
            steps: steps
                .iter()
                .map(|&(above, value)| Step { above, value })
                .collect(),
            fallback,
        }
    }

    pub fn value_for(&self, input: f64) -> f64 {
        self.steps
            .iter()
            .find(|step| input > step.above)
            .map(|step| step.value)
            .unwrap_or(self.fallback)
    }
}

/// One row of a [`BracketTable`]: `adjustment` applies when the input is
/// strictly less than `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub below: f64,
    pub adjustment: f64,
}

/// Ordered `(below, adjustment)` rows, bounds ascending; the first bracket
/// the input falls under wins and `beyond` covers everything past the last
/// bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketTable {
    pub brackets: Vec<Bracket>,
    pub beyond: f64,
}

impl BracketTable {
    pub fn new(brackets: &[(f64, f64)], beyond: f64) -> Self {
        Self {
            brackets: brackets
                .iter()
                .map(|&(below, adjustment)| Bracket { below, adjustment })
                .collect(),
            beyond,
        }
    }

    pub fn adjustment_for(&self, input: f64) -> f64 {
        self.brackets
            .iter()
            .find(|bracket| input < bracket.below)
            .map(|bracket| bracket.adjustment)
            .unwrap_or(self.beyond)
    }
}

/// Rule tables driving recovery probability, expected recovery days, and
/// priority scoring. Constructed once and passed into the engine so test
/// and production instances can carry different tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    pub base_probability: f64,
    pub probability_floor: f64,
    pub probability_ceiling: f64,
    /// Additive drag on probability for large principals.
    pub amount_drag: StepTable,
    /// Additive aging term keyed on days overdue; the dominant signal.
    pub aging: BracketTable,
    /// Additive term keyed on the debtor's trailing average days late.
    pub payment_history: BracketTable,
    /// Fixed per-agency adjustment; unknown agencies contribute zero.
    pub agency_adjustments: BTreeMap<AgencyId, f64>,
    /// Base expected-recovery days keyed on principal.
    pub recovery_base_days: StepTable,
    /// Extra recovery days for aged cases, keyed on days overdue.
    pub aging_delay_days: StepTable,
    /// Probability (percent) above which recovery is expected to run faster.
    pub confident_pct: f64,
    pub confident_days_credit: f64,
    /// Probability (percent) below which recovery is expected to drag.
    pub doubtful_pct: f64,
    pub doubtful_days_penalty: f64,
    pub min_recovery_days: f64,
    /// Priority points for principal value, keyed on amount.
    pub value_points: StepTable,
    /// Priority points per unit of probability (probability/100 × weight).
    pub probability_weight: f64,
    /// Priority points for urgency, keyed on days overdue.
    pub urgency_points: StepTable,
    pub high_priority_cutoff: f64,
    pub medium_priority_cutoff: f64,
}

impl TriageConfig {
    /// The production rule tables.
    pub fn standard() -> Self {
        let mut agency_adjustments = BTreeMap::new();
        for (agency, adjustment) in [
            ("DCA-Alpha", 0.15),
            ("DCA-Omega", 0.10),
            ("DCA-Prime", 0.05),
            ("DCA-Beta", 0.00),
            ("DCA-Gamma", -0.05),
        ] {
            agency_adjustments.insert(AgencyId(agency.to_string()), adjustment);
        }

        Self {
            base_probability: 0.70,
            probability_floor: 0.05,
            probability_ceiling: 0.95,
            amount_drag: StepTable::new(&[(100_000.0, -0.10), (50_000.0, -0.05)], 0.0),
            aging: BracketTable::new(&[(30.0, 0.20), (60.0, 0.10), (90.0, -0.10)], -0.30),
            payment_history: BracketTable::new(&[(15.0, 0.15), (45.0, 0.0)], -0.20),
            agency_adjustments,
            recovery_base_days: StepTable::new(&[(100_000.0, 35.0), (50_000.0, 25.0)], 20.0),
            aging_delay_days: StepTable::new(&[(90.0, 20.0), (60.0, 10.0)], 0.0),
            confident_pct: 80.0,
            confident_days_credit: 5.0,
            doubtful_pct: 50.0,
            doubtful_days_penalty: 15.0,
            min_recovery_days: 10.0,
            value_points: StepTable::new(&[(100_000.0, 4.0), (50_000.0, 3.0), (25_000.0, 2.0)], 1.0),
            probability_weight: 3.0,
            urgency_points: StepTable::new(&[(90.0, 3.0), (60.0, 2.5), (30.0, 2.0)], 1.0),
            high_priority_cutoff: 7.0,
            medium_priority_cutoff: 4.0,
        }
    }
}
