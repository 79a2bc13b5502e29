//! Typed model of the profit-and-loss report document, plus the totals the
//! report view derives from it.
//!
//! The document is a pre-computed JSON payload: a flat list of sections,
//! each holding leaf fields, each field carrying one monthly value series
//! covering the report's date range. Sums flow field -> section -> report.

use crate::aggregate::{aggregate_lenient, generate_date_labels};
use crate::period::{Granularity, MonthKey};
use chrono::{DateTime, Utc};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub report_result: ReportResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    pub id: i64,
    pub scenario_id: i64,
    pub starting_date: MonthKey,
    pub ending_date: MonthKey,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The document spells this key "profitnLoss".
    #[serde(rename = "profitnLoss")]
    pub profit_and_loss: Vec<ReportSection>,
}

/// Section classification used for grouping and presentation. Documents may
/// carry types this crate does not know; those fold into `Other` instead of
/// failing the parse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Revenues,
    CostOfSales,
    Expenses,
    #[serde(other)]
    Other,
}

impl SectionKind {
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Revenues => "Revenues",
            SectionKind::CostOfSales => "Cost of Sales",
            SectionKind::Expenses => "Expenses",
            SectionKind::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub id: i64,
    pub financial_report_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub fields: Vec<ReportField>,
}

impl ReportSection {
    /// Sum of all field totals in this section.
    ///
    /// Because aggregation only regroups months, the result is identical for
    /// every granularity.
    pub fn total(&self, granularity: Granularity) -> f64 {
        self.fields
            .iter()
            .map(|field| field.total(granularity))
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportField {
    pub id: i64,
    pub top_level_field_id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    pub unique_reference: UniqueReference,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub field_id: Option<i64>,
    #[serde(default)]
    pub actual_data: Vec<ActualData>,
}

impl ReportField {
    /// The field's monthly series: the first actuals entry, or an empty
    /// slice when the document carries none.
    pub fn monthly_values(&self) -> &[Option<f64>] {
        self.actual_data
            .first()
            .map(|data| data.value.as_slice())
            .unwrap_or(&[])
    }

    /// Grand total over the whole range: aggregate at `granularity`, then
    /// sum every bucket. Summing all months is invariant under rebucketing,
    /// so the granularity only matters to callers displaying the buckets.
    pub fn total(&self, granularity: Granularity) -> f64 {
        aggregate_lenient(self.monthly_values(), granularity)
            .iter()
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniqueReference {
    pub sheet_type: String,
    pub integration_source_id: i64,
    pub source_type: String,
    pub account_id: String,
    pub account_name: String,
    pub metric: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActualData {
    pub id: i64,
    #[serde(default)]
    pub top_level_field_id: Option<i64>,
    pub field_id: i64,
    /// Monthly values in chronological order. Elements may be null in the
    /// document; summation treats them as zero.
    #[serde(default)]
    pub value: Vec<Option<f64>>,
}

/// Per-section rollup for one granularity selection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionSummary {
    pub id: i64,
    pub name: String,
    pub kind: SectionKind,
    pub field_count: usize,
    pub total: f64,
}

/// Everything the report overview renders: header counts, the period labels
/// for the selected granularity, and one total per section in document
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportSummary {
    pub report_id: i64,
    pub scenario_id: i64,
    pub granularity: Granularity,
    pub date_labels: Vec<String>,
    pub sections: Vec<SectionSummary>,
}

impl ReportResult {
    /// Sections grouped by kind, document order preserved within each group.
    pub fn sections_by_kind(&self) -> BTreeMap<SectionKind, Vec<&ReportSection>> {
        let mut groups: BTreeMap<SectionKind, Vec<&ReportSection>> = BTreeMap::new();
        for section in &self.profit_and_loss {
            groups.entry(section.kind).or_default().push(section);
        }
        groups
    }

    pub fn summarize(&self, granularity: Granularity) -> ReportSummary {
        debug!(
            "Summarizing report {} ({} sections) at {} granularity",
            self.id,
            self.profit_and_loss.len(),
            granularity
        );

        let date_labels = generate_date_labels(self.starting_date, self.ending_date, granularity);

        let sections = self
            .profit_and_loss
            .iter()
            .map(|section| SectionSummary {
                id: section.id,
                name: section.name.clone(),
                kind: section.kind,
                field_count: section.fields.len(),
                total: section.total(granularity),
            })
            .collect();

        ReportSummary {
            report_id: self.id,
            scenario_id: self.scenario_id,
            granularity,
            date_labels,
            sections,
        }
    }
}

impl ReportData {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportData)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(account_id: &str) -> UniqueReference {
        UniqueReference {
            sheet_type: "profit_and_loss".to_string(),
            integration_source_id: 1,
            source_type: "quickbooks".to_string(),
            account_id: account_id.to_string(),
            account_name: account_id.to_string(),
            metric: false,
        }
    }

    fn field(id: i64, values: Vec<Option<f64>>) -> ReportField {
        ReportField {
            id,
            top_level_field_id: id,
            name: format!("Field {id}"),
            code: None,
            unique_reference: reference("acc-1"),
            order: None,
            description: None,
            style: None,
            field_type: None,
            field_id: None,
            actual_data: vec![ActualData {
                id,
                top_level_field_id: Some(id),
                field_id: id,
                value: values,
            }],
        }
    }

    fn section(kind: SectionKind, fields: Vec<ReportField>) -> ReportSection {
        ReportSection {
            id: 7,
            financial_report_id: 1,
            name: "Operating".to_string(),
            kind,
            description: None,
            style: None,
            fields,
        }
    }

    #[test]
    fn test_field_total_ignores_granularity() {
        let values: Vec<Option<f64>> = (1..=14).map(|i| Some(f64::from(i) * 10.0)).collect();
        let field = field(1, values);

        let monthly = field.total(Granularity::Monthly);
        let quarterly = field.total(Granularity::Quarterly);
        let yearly = field.total(Granularity::Yearly);

        assert!((monthly - 1050.0).abs() < 1e-9);
        assert!((monthly - quarterly).abs() < 1e-9);
        assert!((monthly - yearly).abs() < 1e-9);
    }

    #[test]
    fn test_field_without_actuals_totals_zero() {
        let mut f = field(1, vec![]);
        f.actual_data.clear();
        assert_eq!(f.total(Granularity::Quarterly), 0.0);
        assert!(f.monthly_values().is_empty());
    }

    #[test]
    fn test_section_total_is_granularity_invariant() {
        let s = section(
            SectionKind::Expenses,
            vec![
                field(1, vec![Some(100.0), None, Some(50.0), Some(25.0)]),
                field(2, vec![Some(10.0), Some(20.0)]),
            ],
        );

        let monthly = s.total(Granularity::Monthly);
        assert!((monthly - 205.0).abs() < 1e-9);
        assert!((s.total(Granularity::Quarterly) - monthly).abs() < 1e-9);
        assert!((s.total(Granularity::Yearly) - monthly).abs() < 1e-9);
    }

    #[test]
    fn test_deserializes_document_shape() {
        let json = r#"{
            "reportResult": {
                "id": 41,
                "scenarioId": 3,
                "startingDate": "01-2024",
                "endingDate": "06-2024",
                "createdAt": "2024-07-01T09:30:00Z",
                "updatedAt": "2024-07-02T10:00:00Z",
                "profitnLoss": [
                    {
                        "id": 1,
                        "financialReportId": 41,
                        "name": "Revenue",
                        "type": "revenues",
                        "description": null,
                        "style": null,
                        "fields": [
                            {
                                "id": 11,
                                "topLevelFieldId": 1,
                                "name": "Product Sales",
                                "code": null,
                                "uniqueReference": {
                                    "sheetType": "profit_and_loss",
                                    "integrationSourceId": 5,
                                    "sourceType": "quickbooks",
                                    "accountId": "4000",
                                    "accountName": "Sales",
                                    "metric": false
                                },
                                "order": 1,
                                "description": null,
                                "style": null,
                                "fieldType": null,
                                "fieldId": null,
                                "actualData": [
                                    {
                                        "id": 100,
                                        "topLevelFieldId": 1,
                                        "fieldId": 11,
                                        "value": [100.0, null, 300.0, 400.0, 500.0, 600.0]
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        }"#;

        let data: ReportData = serde_json::from_str(json).unwrap();
        let result = &data.report_result;

        assert_eq!(result.starting_date.to_string(), "01-2024");
        assert_eq!(result.profit_and_loss.len(), 1);

        let s = &result.profit_and_loss[0];
        assert_eq!(s.kind, SectionKind::Revenues);
        assert!((s.total(Granularity::Monthly) - 1900.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_section_kind_folds_to_other() {
        let kind: SectionKind = serde_json::from_str("\"nonOperating\"").unwrap();
        assert_eq!(kind, SectionKind::Other);
        assert_eq!(SectionKind::CostOfSales.label(), "Cost of Sales");
    }

    #[test]
    fn test_sections_by_kind_groups_in_document_order() {
        let mut s1 = section(SectionKind::Expenses, vec![]);
        s1.id = 1;
        let mut s2 = section(SectionKind::Revenues, vec![]);
        s2.id = 2;
        let mut s3 = section(SectionKind::Expenses, vec![]);
        s3.id = 3;

        let result = ReportResult {
            id: 41,
            scenario_id: 3,
            starting_date: MonthKey::new(1, 2024).unwrap(),
            ending_date: MonthKey::new(6, 2024).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            profit_and_loss: vec![s1, s2, s3],
        };

        let groups = result.sections_by_kind();
        assert_eq!(groups.len(), 2);
        let expense_ids: Vec<i64> = groups[&SectionKind::Expenses].iter().map(|s| s.id).collect();
        assert_eq!(expense_ids, vec![1, 3]);
    }

    #[test]
    fn test_summarize_counts_and_labels() {
        let result = ReportResult {
            id: 41,
            scenario_id: 3,
            starting_date: MonthKey::new(1, 2024).unwrap(),
            ending_date: MonthKey::new(6, 2024).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            profit_and_loss: vec![section(
                SectionKind::Revenues,
                vec![field(1, vec![Some(1.0); 6])],
            )],
        };

        let summary = result.summarize(Granularity::Quarterly);
        assert_eq!(summary.date_labels, vec!["Q1 2024", "Q2 2024"]);
        assert_eq!(summary.sections.len(), 1);
        assert_eq!(summary.sections[0].field_count, 1);
        assert!((summary.sections[0].total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = ReportData::schema_as_json().unwrap();
        assert!(schema_json.contains("reportResult"));
        assert!(schema_json.contains("profitnLoss"));
        assert!(schema_json.contains("MonthKey"));
    }
}
