//! Typed model of the per-period dashboard documents (KPIs and chart
//! series), one JSON file per granularity.

use crate::period::{DateRange, Granularity, MonthKey};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub main_dashboard: MainDashboard,
    #[serde(rename = "mainDashboardKPIs")]
    pub main_dashboard_kpis: KpiGroups,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MainDashboard {
    pub period: Granularity,
    pub start_date: MonthKey,
    pub end_date: MonthKey,
    /// Reference date for the KPI figures, kept verbatim from the document.
    pub metric_date: String,
    /// Pre-computed axis labels for the document's period; passed straight
    /// to charts, so the element format varies with granularity.
    #[serde(default)]
    pub date_array: Vec<String>,
    pub charts: Charts,
}

impl MainDashboard {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// The named chart slots of the main dashboard. Slot names mirror the
/// document keys, including the one PascalCase outlier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    #[serde(default)]
    pub cash_at_bank: Vec<ChartSeries>,
    #[serde(default)]
    pub expense_split: Vec<ChartSeries>,
    #[serde(default)]
    pub indirect_cashflow: Vec<ChartSeries>,
    #[serde(default)]
    pub total_revenues_split: Vec<ChartSeries>,
    #[serde(default)]
    pub profit_loss_overview: Vec<ChartSeries>,
    #[serde(default)]
    pub salaries_split: Vec<ChartSeries>,
    #[serde(default, rename = "ManpowerOperatingExpenses")]
    pub manpower_operating_expenses: Vec<ChartSeries>,
}

impl Charts {
    /// All slots with their document keys, in document order.
    pub fn slots(&self) -> [(&'static str, &[ChartSeries]); 7] {
        [
            ("cashAtBank", self.cash_at_bank.as_slice()),
            ("expenseSplit", self.expense_split.as_slice()),
            ("indirectCashflow", self.indirect_cashflow.as_slice()),
            ("totalRevenuesSplit", self.total_revenues_split.as_slice()),
            ("profitLossOverview", self.profit_loss_overview.as_slice()),
            ("salariesSplit", self.salaries_split.as_slice()),
            (
                "ManpowerOperatingExpenses",
                self.manpower_operating_expenses.as_slice(),
            ),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub chart_type: String,
    pub name: String,
    pub values: ChartValues,
}

impl ChartSeries {
    /// Sum of the series (missing entries count as zero), or the scalar
    /// itself for single-value series. What split/pie charts display.
    pub fn total(&self) -> f64 {
        match &self.values {
            ChartValues::Scalar(value) => *value,
            ChartValues::Series(values) => values.iter().map(|v| v.unwrap_or(0.0)).sum(),
        }
    }

    pub fn series_values(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ChartValues::Series(values) => Some(values.as_slice()),
            ChartValues::Scalar(_) => None,
        }
    }
}

/// A chart's data: either one value per period bucket, or a single scalar
/// (the document uses both shapes for the same key).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ChartValues {
    Series(Vec<Option<f64>>),
    Scalar(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KpiGroups {
    #[serde(rename = "topKPIs")]
    pub top_kpis: Vec<Kpi>,
    #[serde(rename = "KPIs")]
    pub kpis: Vec<Kpi>,
}

/// One KPI card.
///
/// Source documents spell the month-over-month change two ways, `mOm` and
/// `mom`. Deserialization collapses them into the single `mom_change` field
/// with precedence `mOm`, then `mom`, then 0.0; serialization always emits
/// `mOm`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Kpi {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Month-over-month change, percent.
    #[serde(rename = "mOm")]
    pub mom_change: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
struct RawKpi {
    name: String,
    value: f64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, rename = "mOm")]
    m_om: Option<f64>,
    #[serde(default)]
    mom: Option<f64>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl From<RawKpi> for Kpi {
    fn from(raw: RawKpi) -> Self {
        Kpi {
            name: raw.name,
            value: raw.value,
            date: raw.date,
            mom_change: raw.m_om.or(raw.mom).unwrap_or(0.0),
            prefix: raw.prefix,
            kind: raw.kind,
        }
    }
}

impl<'de> Deserialize<'de> for Kpi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawKpi::deserialize(deserializer).map(Kpi::from)
    }
}
