use super::config::TriageConfig;
use crate::workflows::collections::domain::AgencyId;

/// Recovery probability as a percentage rounded to one decimal, clamped to
/// the configured floor/ceiling before reporting.
pub(crate) fn recovery_probability(
    amount: f64,
    days_overdue: u32,
    avg_days_late: f64,
    agency: &AgencyId,
    config: &TriageConfig,
) -> f64 {
    let mut probability = config.base_probability;

    probability += config.amount_drag.value_for(amount);
    probability += config.aging.adjustment_for(days_overdue as f64);
    probability += config.payment_history.adjustment_for(avg_days_late);
    probability += config
        .agency_adjustments
        .get(agency)
        .copied()
        .unwrap_or(0.0);

    let clamped = probability.clamp(config.probability_floor, config.probability_ceiling);
    round_one_decimal(clamped * 100.0)
}

/// Expected days until the debt is recovered, floored at the configured
/// minimum. `probability_pct` is the already-reported percentage.
pub(crate) fn expected_recovery_days(
    amount: f64,
    days_overdue: u32,
    probability_pct: f64,
    config: &TriageConfig,
) -> u32 {
    let mut days = config.recovery_base_days.value_for(amount);
    days += config.aging_delay_days.value_for(days_overdue as f64);

    if probability_pct > config.confident_pct {
        days -= config.confident_days_credit;
    } else if probability_pct < config.doubtful_pct {
        days += config.doubtful_days_penalty;
    }

    days.max(config.min_recovery_days) as u32
}

/// Priority score on the 0-10 scale: value points + weighted probability +
/// urgency points, reported to one decimal.
pub(crate) fn priority_score(
    amount: f64,
    days_overdue: u32,
    probability_pct: f64,
    config: &TriageConfig,
) -> f64 {
    let value = config.value_points.value_for(amount);
    let confidence = probability_pct / 100.0 * config.probability_weight;
    let urgency = config.urgency_points.value_for(days_overdue as f64);

    round_one_decimal(value + confidence + urgency)
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
