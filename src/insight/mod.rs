/// Auto-insight selection: everything the dashboard decides on its own.
///
/// ```text
///   Dataset ──► dates::prepare      date columns parsed, rows sorted (once per upload)
///      │
///      ├──► columns                 metric inference, axis choices
///      ├──► chart                   histogram / line / bar decision
///      └──► summary                 KPI cards, executive summary
///                │
///                ▼
///          view::compute_view(dataset, selections) → ViewModel
/// ```
///
/// All of it is string-matching policy on column names: substring,
/// case-insensitive, first match wins.

pub mod chart;
pub mod columns;
pub mod dates;
pub mod format;
pub mod summary;
pub mod view;

pub use view::{compute_view, Selections, ViewModel};
