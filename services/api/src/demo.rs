use crate::infra::{load_cases_from_path, triage_service};
use chrono::NaiveDate;
use clap::Args;
use dca_triage::error::AppError;
use dca_triage::workflows::collections::{
    AgencyId, CaseId, CaseQuery, CaseRecord, CaseStatus, PaymentHistory,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional case export CSV to run the demo against
    #[arg(long)]
    pub(crate) cases: Option<PathBuf>,
    /// Number of cases to show in the triage listing
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
}

#[derive(Args, Debug)]
pub(crate) struct PortfolioReportArgs {
    /// Case export CSV; falls back to the built-in demo portfolio
    #[arg(long)]
    pub(crate) cases: Option<PathBuf>,
    /// Include the scored case listing in the report output
    #[arg(long)]
    pub(crate) list_cases: bool,
}

/// Fixed sample portfolio used by the demo command and as the serving
/// fallback when no export is supplied. Deliberately a static table, not a
/// generator, so every run triages identically.
pub(crate) fn demo_portfolio() -> Vec<CaseRecord> {
    fn entry(
        id: &str,
        customer: &str,
        amount: f64,
        days_overdue: u32,
        invoice: (i32, u32, u32),
        industry: &str,
        region: &str,
        agency: &str,
        status: CaseStatus,
        days_since_contact: u32,
        contact_attempts: u32,
        avg_days_late: f64,
        late_count_24m: u32,
        recovered: bool,
        days_to_recovery: Option<u32>,
    ) -> CaseRecord {
        CaseRecord {
            case_id: CaseId(id.to_string()),
            customer_name: customer.to_string(),
            amount,
            days_overdue,
            invoice_date: NaiveDate::from_ymd_opt(invoice.0, invoice.1, invoice.2)
                .unwrap_or_default(),
            industry: industry.to_string(),
            region: region.to_string(),
            assigned_agency: AgencyId(agency.to_string()),
            status,
            days_since_contact,
            contact_attempts,
            history: PaymentHistory {
                avg_days_late,
                late_count_24m,
            },
            recovered,
            days_to_recovery,
        }
    }

    vec![
        entry(
            "DCA-2001", "TechCorp Industries", 142_000.0, 22, (2026, 6, 12), "Technology", "CA",
            "DCA-Alpha", CaseStatus::Active, 2, 4, 8.5, 1, false, None,
        ),
        entry(
            "DCA-2002", "Global Logistics Inc", 96_500.0, 74, (2026, 4, 3), "Logistics", "TX",
            "DCA-Omega", CaseStatus::Stalled, 18, 11, 38.0, 6, false, None,
        ),
        entry(
            "DCA-2003", "Retail Solutions LLC", 28_750.0, 41, (2026, 5, 19), "Retail", "NY",
            "DCA-Prime", CaseStatus::Promised, 7, 6, 22.0, 4, false, None,
        ),
        entry(
            "DCA-2004", "Manufacturing Co", 61_200.0, 88, (2026, 3, 27), "Manufacturing", "OH",
            "DCA-Prime", CaseStatus::Active, 4, 12, 41.5, 7, false, None,
        ),
        entry(
            "DCA-2005", "Express Shipping Ltd", 8_900.0, 12, (2026, 7, 1), "Logistics", "FL",
            "DCA-Gamma", CaseStatus::Active, 1, 2, 5.0, 0, true, Some(14),
        ),
        entry(
            "DCA-2006", "Supply Chain Partners", 83_400.0, 93, (2026, 3, 8), "Logistics", "IL",
            "DCA-Omega", CaseStatus::Disputed, 9, 14, 55.0, 9, false, None,
        ),
        entry(
            "DCA-2007", "Swift Transport", 19_300.0, 57, (2026, 5, 2), "Automotive", "GA",
            "DCA-Gamma", CaseStatus::Promised, 8, 8, 17.5, 3, false, None,
        ),
        entry(
            "DCA-2008", "Premier Logistics", 47_800.0, 66, (2026, 4, 21), "Logistics", "PA",
            "DCA-Beta", CaseStatus::Active, 3, 9, 29.0, 5, true, Some(31),
        ),
        entry(
            "DCA-2009", "Pacific Trade", 112_600.0, 86, (2026, 3, 15), "Finance", "WA",
            "DCA-Beta", CaseStatus::Stalled, 23, 13, 47.0, 8, false, None,
        ),
        entry(
            "DCA-2010", "Metro Shipping", 33_150.0, 104, (2026, 2, 18), "Logistics", "NJ",
            "DCA-Beta", CaseStatus::Active, 5, 15, 33.0, 6, false, None,
        ),
        entry(
            "DCA-2011", "Alliance Freight", 14_400.0, 29, (2026, 6, 20), "Logistics", "NC",
            "DCA-Gamma", CaseStatus::Active, 2, 3, 11.0, 2, true, Some(19),
        ),
        entry(
            "DCA-2012", "Continental Express", 68_900.0, 35, (2026, 6, 2), "Healthcare", "MA",
            "DCA-Alpha", CaseStatus::Active, 2, 5, 9.5, 1, false, None,
        ),
    ]
}

pub(crate) fn run_portfolio_report(args: PortfolioReportArgs) -> Result<(), AppError> {
    let PortfolioReportArgs { cases, list_cases } = args;

    let (records, source) = load_portfolio(cases)?;
    let service = triage_service(records)?;

    println!("Portfolio report ({source})");
    render_metrics(&service)?;
    render_alerts(&service)?;
    render_standings(&service)?;

    if list_cases {
        render_case_listing(&service, usize::MAX)?;
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { cases, top } = args;

    let (records, source) = load_portfolio(cases)?;
    let service = triage_service(records)?;

    println!("Collections triage demo ({source})");
    render_metrics(&service)?;
    render_case_listing(&service, top)?;
    render_alerts(&service)?;
    render_standings(&service)?;

    Ok(())
}

type DemoService =
    dca_triage::workflows::collections::CollectionsTriageService<crate::infra::InMemoryCaseRepository>;

fn load_portfolio(path: Option<PathBuf>) -> Result<(Vec<CaseRecord>, String), AppError> {
    match path {
        Some(path) => {
            let records = load_cases_from_path(&path)?;
            Ok((records, path.display().to_string()))
        }
        None => Ok((demo_portfolio(), "built-in demo portfolio".to_string())),
    }
}

fn render_metrics(service: &DemoService) -> Result<(), AppError> {
    let metrics = service.metrics()?;

    println!("\nPortfolio KPIs");
    println!("  cases tracked        {}", metrics.case_count);
    println!("  total outstanding    ${:.2}", metrics.total_outstanding);
    println!("  critical cases       {}", metrics.critical_cases);
    println!("  recovered (period)   ${:.2}", metrics.recovered_this_period);
    println!("  recovery rate        {:.1}%", metrics.recovery_rate_pct);
    Ok(())
}

fn render_case_listing(service: &DemoService, limit: usize) -> Result<(), AppError> {
    let views = service.scored_cases(&CaseQuery {
        limit,
        ..CaseQuery::default()
    })?;

    println!("\nTriage listing");
    for view in views {
        println!(
            "  {} | {} | ${:.0} | {} days | p={:.1}% | {} ({:.1}) | ~{}d to recover",
            view.case_id,
            view.customer_name,
            view.amount,
            view.days_overdue,
            view.recovery_probability,
            view.priority,
            view.priority_score,
            view.expected_days_to_recovery,
        );
    }
    Ok(())
}

fn render_alerts(service: &DemoService) -> Result<(), AppError> {
    let alerts = service.alerts()?;

    println!("\nAlert feed ({} active)", alerts.len());
    for alert in alerts {
        println!(
            "  [{}] {} - {}",
            alert.tier.label(),
            alert.title,
            alert.detail,
        );
    }
    Ok(())
}

fn render_standings(service: &DemoService) -> Result<(), AppError> {
    let standings = service.agency_standings()?;

    println!("\nAgency standings");
    for standing in standings {
        let live = standing
            .live
            .map(|stats| {
                format!(
                    "{} cases, ${:.0} outstanding",
                    stats.case_count, stats.outstanding_amount,
                )
            })
            .unwrap_or_else(|| "no live cases".to_string());
        println!(
            "  #{} {} | {:.0}% success | {} days avg | {}",
            standing.rank, standing.agency_id, standing.success_rate_pct, standing.avg_days, live,
        );
    }
    Ok(())
}
