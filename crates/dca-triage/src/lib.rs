//! Triage and routing engine for outstanding debt-collection cases.
//!
//! The `workflows::collections` module hosts the core: a rule-table scorer
//! estimating recovery probability, expected recovery time, and priority for
//! each case; an agency matcher recommending which collection agency should
//! own a case; alert synthesis over the full case population; and portfolio
//! KPI aggregation. Everything is a pure function of its inputs plus
//! explicitly constructed, immutable reference data.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
