//! # Financial Dashboard Core
//!
//! A library for turning pre-computed monthly financial series into the
//! numbers a dashboard or profit-and-loss report displays: period-bucketed
//! aggregates, human-readable period labels, and per-field/per-section
//! totals.
//!
//! ## Core Concepts
//!
//! - **Monthly Series**: one numeric value per month over an inclusive date
//!   range, in chronological order
//! - **Granularity**: how months are bucketed for display — monthly
//!   (identity), quarterly (sums of 3), yearly (sums of 12)
//! - **Lenient Aggregation**: document arrays may carry nulls; summation
//!   treats them as zero rather than failing the view
//! - **Sections and Fields**: the report domain's grouping and its leaf
//!   line items; totals flow field -> section -> report and are invariant
//!   under rebucketing
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_dashboard_core::*;
//!
//! let report = load_report_data("data/report.json")?;
//! let summary = report.report_result.summarize(Granularity::Quarterly);
//!
//! let usd = CurrencyFormat::default();
//! for section in &summary.sections {
//!     println!("{}: {}", section.name, usd.format(section.total));
//! }
//! ```

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod loader;
pub mod period;
pub mod report;

pub use aggregate::{aggregate_by_period, aggregate_lenient, generate_date_labels};
pub use dashboard::{
    ChartSeries, ChartValues, Charts, DashboardData, Kpi, KpiGroups, MainDashboard,
};
pub use error::{DashboardError, Result};
pub use format::{format_compact, CurrencyFormat};
pub use loader::{load_dashboard_data, load_report_data};
pub use period::{generate_date_array, DateRange, Granularity, MonthKey};
pub use report::{
    ActualData, ReportData, ReportField, ReportResult, ReportSection, ReportSummary,
    SectionKind, SectionSummary, UniqueReference,
};
