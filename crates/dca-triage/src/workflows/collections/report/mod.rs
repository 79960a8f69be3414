//! Population-level synthesis: operational alerts and dashboard KPIs.

mod alerts;
mod metrics;
pub mod views;

pub use alerts::{synthesize_alerts, Alert, AlertPolicy};
pub use metrics::{aggregate_metrics, PortfolioMetrics, PERIOD_ATTRIBUTION_FACTOR};
