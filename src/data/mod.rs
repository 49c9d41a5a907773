/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///        .csv
///         │
///         ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (column-wise type inference)
///   └──────────┘
///         │
///         ▼
///   ┌──────────┐
///   │ Dataset   │  ordered columns, positional rows of CellValue
///   └──────────┘
///         │
///         ▼
///   ┌───────────┐
///   │ aggregate  │  sum / mean / min / max, group-by-sum, histogram bins
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;
