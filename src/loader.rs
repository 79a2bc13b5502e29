//! Reads the pre-computed dashboard and report JSON documents from disk and
//! hands typed models to the rest of the crate.
//!
//! Fetch-layer concerns (retries, user-facing error states) stay with the
//! caller; this module only surfaces IO and parse failures as typed errors.

use crate::dashboard::DashboardData;
use crate::error::Result;
use crate::period::Granularity;
use crate::report::ReportData;
use log::{debug, info};
use std::fs;
use std::path::Path;

pub fn load_report_data(path: impl AsRef<Path>) -> Result<ReportData> {
    let path = path.as_ref();
    info!("Loading report data from {}", path.display());

    let contents = fs::read_to_string(path)?;
    let data: ReportData = serde_json::from_str(&contents)?;

    debug!(
        "Report {} covers {} to {} with {} sections",
        data.report_result.id,
        data.report_result.starting_date,
        data.report_result.ending_date,
        data.report_result.profit_and_loss.len()
    );

    Ok(data)
}

/// Loads the dashboard document for one granularity. Documents live one per
/// granularity as `<dir>/monthly.json`, `<dir>/quarterly.json`,
/// `<dir>/yearly.json`.
pub fn load_dashboard_data(dir: impl AsRef<Path>, granularity: Granularity) -> Result<DashboardData> {
    let path = dir.as_ref().join(format!("{granularity}.json"));
    info!("Loading {granularity} dashboard data from {}", path.display());

    let contents = fs::read_to_string(&path)?;
    let data: DashboardData = serde_json::from_str(&contents)?;

    debug!(
        "Dashboard covers {} to {} with {} top KPIs",
        data.main_dashboard.start_date,
        data.main_dashboard.end_date,
        data.main_dashboard_kpis.top_kpis.len()
    );

    Ok(data)
}
