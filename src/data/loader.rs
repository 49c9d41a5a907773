use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::error::DataError;
use super::model::{CellValue, Dataset};

/// Cell texts that load as null, matching what spreadsheet exports and
/// dataframe tools write for missing values.
const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "<NA>",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a file. Only `.csv` is accepted.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv(file).with_context(|| format!("loading {}", path.display()))
        }
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
}

/// CSV layout: header row with column names, one record per line.
///
/// Short rows are padded with nulls; rows with more fields than the header
/// are rejected. Column types are inferred once all rows are read.
pub fn load_csv<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let raw_headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if raw_headers.is_empty() {
        return Err(DataError::MissingHeader.into());
    }
    let headers = dedupe_headers(raw_headers);
    let width = headers.len();

    // Column-major raw text; `None` marks a null token or a missing field.
    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        if record.len() > width {
            return Err(DataError::TooManyFields {
                row: row_no + 1,
                expected: width,
                found: record.len(),
            }
            .into());
        }
        for (col_idx, column) in raw_columns.iter_mut().enumerate() {
            let cell = record
                .get(col_idx)
                .filter(|s| !NULL_TOKENS.contains(&s.trim()))
                .map(|s| s.to_string());
            column.push(cell);
        }
    }

    let n_rows = raw_columns.first().map_or(0, Vec::len);
    let typed_columns: Vec<Vec<CellValue>> = raw_columns.iter().map(|c| infer_column(c)).collect();

    let rows = (0..n_rows)
        .map(|r| typed_columns.iter().map(|col| col[r].clone()).collect())
        .collect();

    Ok(Dataset::new(headers, rows))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Make repeated header names unique: `a, a, a` becomes `a, a.1, a.2`.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for name in headers {
        let mut candidate = name.clone();
        let mut n = 0;
        while used.contains(&candidate) {
            n += 1;
            candidate = format!("{name}.{n}");
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

/// Pick one type for the whole column, then convert every cell to it.
fn infer_column(cells: &[Option<String>]) -> Vec<CellValue> {
    let column_type = column_type(cells);
    cells
        .iter()
        .map(|cell| match cell {
            None => CellValue::Null,
            Some(s) => convert(s, column_type),
        })
        .collect()
}

fn column_type(cells: &[Option<String>]) -> ColumnType {
    let present: Vec<&str> = cells.iter().flatten().map(|s| s.trim()).collect();
    if present.is_empty() {
        return ColumnType::Text;
    }
    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present.iter().all(|s| parse_float(s).is_some()) {
        ColumnType::Float
    } else if present.iter().all(|s| parse_bool(s).is_some()) {
        ColumnType::Bool
    } else {
        ColumnType::Text
    }
}

fn convert(s: &str, column_type: ColumnType) -> CellValue {
    let trimmed = s.trim();
    match column_type {
        ColumnType::Integer => trimmed
            .parse::<i64>()
            .map(CellValue::Integer)
            .unwrap_or(CellValue::Null),
        ColumnType::Float => parse_float(trimmed)
            .map(CellValue::Float)
            .unwrap_or(CellValue::Null),
        ColumnType::Bool => parse_bool(trimmed)
            .map(CellValue::Bool)
            .unwrap_or(CellValue::Null),
        ColumnType::Text => CellValue::Text(s.to_string()),
    }
}

/// `f64::from_str` also accepts words like "infinity"; keep only
/// things that look like numbers.
fn parse_float(s: &str) -> Option<f64> {
    let looks_numeric = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !looks_numeric {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
