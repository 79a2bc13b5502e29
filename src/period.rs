use crate::error::{DashboardError, Result};
use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, the atomic time unit of every series in the crate.
///
/// The wire form is `"MM-YYYY"` (zero-padded month, 1-based), which is how
/// the dashboard and report documents carry their date ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DashboardError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month immediately after this one, wrapping December into January
    /// of the next year.
    pub fn succ(self) -> Self {
        let year = if self.month == 12 {
            self.year + 1
        } else {
            self.year
        };

        let month = if self.month == 12 { 1 } else { self.month + 1 };

        Self { year, month }
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    pub fn last_day(self) -> NaiveDate {
        let next_month = if self.month == 12 { 1 } else { self.month + 1 };
        let next_year = if self.month == 12 {
            self.year + 1
        } else {
            self.year
        };

        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap()
            .checked_sub_days(Days::new(1))
            .unwrap()
    }

    /// 1-based calendar quarter (Jan-Mar = 1 ... Oct-Dec = 4).
    pub fn quarter(self) -> u32 {
        (self.month + 2) / 3
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{}", self.month, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let (month_part, year_part) = s
            .split_once('-')
            .ok_or_else(|| DashboardError::InvalidMonthKey(s.to_string()))?;

        let month: u32 = month_part
            .trim()
            .parse()
            .map_err(|_| DashboardError::InvalidMonthKey(s.to_string()))?;
        let year: i32 = year_part
            .trim()
            .parse()
            .map_err(|_| DashboardError::InvalidMonthKey(s.to_string()))?;

        Self::new(month, year)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl JsonSchema for MonthKey {
    fn schema_name() -> String {
        "MonthKey".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut schema = String::json_schema(gen).into_object();
        schema.string().pattern = Some("^[0-9]{2}-[0-9]+$".to_string());
        schema.metadata().description =
            Some("Calendar month in MM-YYYY form, e.g. \"01-2024\"".to_string());
        schema.into()
    }
}

/// An inclusive month range. `start` after `end` is tolerated and behaves as
/// an empty range everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub start: MonthKey,
    pub end: MonthKey,
}

impl DateRange {
    pub fn new(start: MonthKey, end: MonthKey) -> Self {
        Self { start, end }
    }

    pub fn months(&self) -> Vec<MonthKey> {
        generate_date_array(self.start, self.end)
    }

    pub fn month_count(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        ((self.end.year - self.start.year) * 12
            + (self.end.month as i32 - self.start.month as i32)
            + 1) as usize
    }
}

/// How monthly values are bucketed for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    /// Number of months summed into one bucket.
    pub fn chunk_size(self) -> usize {
        match self {
            Granularity::Monthly => 1,
            Granularity::Quarterly => 3,
            Granularity::Yearly => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Monthly => "monthly",
            Granularity::Quarterly => "quarterly",
            Granularity::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "monthly" => Ok(Granularity::Monthly),
            "quarterly" => Ok(Granularity::Quarterly),
            "yearly" => Ok(Granularity::Yearly),
            other => Err(DashboardError::UnknownGranularity(other.to_string())),
        }
    }
}

/// Every month from `start` to `end` inclusive, in chronological order.
///
/// A `start` chronologically after `end` yields an empty vector rather than
/// an error, so degenerate document ranges render as "no periods" instead of
/// failing the whole view.
pub fn generate_date_array(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
    let mut dates = Vec::new();

    let mut current = start;
    while current <= end {
        dates.push(current);
        current = current.succ();
    }

    dates
}
