//! Period aggregation: summing monthly value series into quarterly or yearly
//! buckets, and producing the matching human-readable period labels.
//!
//! Aggregation is pure arithmetic over in-memory slices. Formatting for
//! display lives in [`crate::format`], and nothing here rounds or scales.

use crate::period::{generate_date_array, Granularity, MonthKey};
use std::collections::BTreeSet;

/// Sums a dense monthly series into period buckets.
///
/// - `Monthly` is the identity transform (an owned copy; the caller's slice
///   is never mutated).
/// - `Quarterly` partitions into consecutive chunks of 3 starting at index 0
///   and sums each chunk.
/// - `Yearly` does the same with chunks of 12.
///
/// The final chunk may be shorter than the chunk size when the series length
/// is not a multiple of it; it is summed over the months that exist, neither
/// zero-padded nor dropped. Output length is `ceil(len / chunk_size)`.
pub fn aggregate_by_period(values: &[f64], granularity: Granularity) -> Vec<f64> {
    match granularity {
        Granularity::Monthly => values.to_vec(),
        g => values
            .chunks(g.chunk_size())
            .map(|chunk| chunk.iter().sum())
            .collect(),
    }
}

/// Lenient counterpart of [`aggregate_by_period`] for series deserialized
/// straight from JSON, where elements may be `null`.
///
/// Missing values count as 0.0 during summation and never surface in the
/// output; `Monthly` therefore returns the zero-filled dense form. This is
/// the single place the null-tolerance policy lives, so consumers sum raw
/// document arrays without coalescing on their own.
pub fn aggregate_lenient(values: &[Option<f64>], granularity: Granularity) -> Vec<f64> {
    values
        .chunks(granularity.chunk_size())
        .map(|chunk| chunk.iter().map(|v| v.unwrap_or(0.0)).sum())
        .collect()
}

/// One label per period bucket between `start` and `end` inclusive.
///
/// - `Monthly`: `"Jan 2024"` style (three-letter English abbreviation).
/// - `Quarterly`: `"Q1 2024"`, taken from each chunk's first month.
/// - `Yearly`: the distinct years observed in the range, ascending, as plain
///   digit strings.
///
/// For monthly and quarterly the label count always equals the bucket count
/// of [`aggregate_by_period`] over a matching-length series. Yearly counts
/// distinct calendar years, so for ranges that do not start in January or
/// end in December it can exceed the bucket count (e.g. 07-2023..03-2024 is
/// nine months, one yearly bucket, two year labels). Callers aligning labels
/// with yearly aggregates need to account for that.
pub fn generate_date_labels(
    start: MonthKey,
    end: MonthKey,
    granularity: Granularity,
) -> Vec<String> {
    let monthly_dates = generate_date_array(start, end);

    match granularity {
        Granularity::Monthly => monthly_dates
            .iter()
            .map(|key| key.first_day().format("%b %Y").to_string())
            .collect(),
        Granularity::Quarterly => monthly_dates
            .chunks(3)
            .map(|chunk| {
                let first = chunk[0];
                format!("Q{} {}", first.quarter(), first.year)
            })
            .collect(),
        Granularity::Yearly => {
            let years: BTreeSet<i32> = monthly_dates.iter().map(|key| key.year).collect();
            years.into_iter().map(|year| year.to_string()).collect()
        }
    }
}
