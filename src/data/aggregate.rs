use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Column summary
// ---------------------------------------------------------------------------

/// Sum, mean and extremes of a numeric column, nulls skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarise a series of values. `None` when there is nothing to summarise.
pub fn summarize(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().sum();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some(NumericSummary {
        count: values.len(),
        total,
        mean: total / values.len() as f64,
        min,
        max,
    })
}

// ---------------------------------------------------------------------------
// Group-by-sum
// ---------------------------------------------------------------------------

/// Sum `value_col` per distinct value of `key_col`, ascending by key.
///
/// Rows with a null key are dropped. Null values contribute nothing, so a
/// group made only of nulls sums to zero.
pub fn group_sum(dataset: &Dataset, key_col: usize, value_col: usize) -> Vec<(CellValue, f64)> {
    let mut groups: BTreeMap<CellValue, f64> = BTreeMap::new();
    for row in &dataset.rows {
        let key = row.get(key_col).unwrap_or(&CellValue::Null);
        if key.is_null() {
            continue;
        }
        let value = row.get(value_col).and_then(CellValue::as_f64).unwrap_or(0.0);
        *groups.entry(key.clone()).or_insert(0.0) += value;
    }
    groups.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One histogram bucket covering `[lower, upper)`; the last bucket is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bin `values` into equal-width buckets.
///
/// The bucket count follows Sturges' rule, `ceil(log2 n) + 1`, capped at
/// `max_bins`. A constant series gets a single unit-wide bucket centred on
/// the value.
pub fn histogram(values: &[f64], max_bins: usize) -> Vec<HistogramBin> {
    let Some(summary) = summarize(values) else {
        return Vec::new();
    };
    let (min, max) = (summary.min, summary.max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min - 0.5,
            upper: max + 0.5,
            count: values.len(),
        }];
    }

    let sturges = (values.len() as f64).log2().ceil() as usize + 1;
    let n_bins = sturges.clamp(1, max_bins.max(1));
    let width = (max - min) / n_bins as f64;

    let mut bins: Vec<HistogramBin> = (0..n_bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}
