use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::data::model::{CellValue, Dataset};

use super::columns::{is_date_name, primary_date_column};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // 2024-01-15
    "%Y/%m/%d", // 2024/01/15
    "%m/%d/%y", // 01/15/24 (before %Y, which would read "24" as year 24)
    "%m/%d/%Y", // 01/15/2024
    "%m-%d-%Y", // 01-15-2024
    "%d/%m/%Y", // 15/01/2024 (European)
    "%d.%m.%Y", // 15.01.2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y", // 15 Jan 2024
];

/// Parse a date or timestamp, returning `None` for anything unrecognised.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

fn to_date_cell(value: &CellValue) -> CellValue {
    match value {
        CellValue::Date(_) => value.clone(),
        CellValue::Null => CellValue::Null,
        other => parse_date(&other.to_string())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Null),
    }
}

/// Convert every date-named column to `Date` cells. Unparsable cells
/// become null; nothing here fails.
pub fn normalize_dates(dataset: &mut Dataset) {
    let date_idx: Vec<usize> = dataset
        .column_names
        .iter()
        .enumerate()
        .filter(|(_, name)| is_date_name(name))
        .map(|(idx, _)| idx)
        .collect();

    for &idx in &date_idx {
        let mut unparsed = 0usize;
        for row in dataset.rows.iter_mut() {
            if let Some(cell) = row.get_mut(idx) {
                let was_present = !cell.is_null();
                *cell = to_date_cell(cell);
                if was_present && cell.is_null() {
                    unparsed += 1;
                }
            }
        }
        if unparsed > 0 {
            log::debug!(
                "Column '{}': {unparsed} value(s) could not be read as dates",
                dataset.column_names[idx]
            );
        }
    }
}

/// Stable ascending sort on the given column; nulls go last.
pub fn sort_by_date_column(dataset: &mut Dataset, idx: usize) {
    dataset.rows.sort_by(|a, b| {
        let a = a.get(idx).unwrap_or(&CellValue::Null);
        let b = b.get(idx).unwrap_or(&CellValue::Null);
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.cmp(b),
        }
    });
}

/// Date-normalise an uploaded dataset and, when a date column exists, sort
/// it by the first one. Runs once per upload.
pub fn prepare(mut dataset: Dataset) -> Dataset {
    normalize_dates(&mut dataset);
    if let Some(col) = primary_date_column(&dataset) {
        if let Some(idx) = dataset.column_index(&col) {
            log::debug!("Sorting {} rows by '{col}'", dataset.len());
            sort_by_date_column(&mut dataset, idx);
        }
    }
    dataset
}
