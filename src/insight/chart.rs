use serde::Serialize;

use crate::config::Settings;
use crate::data::aggregate::{group_sum, histogram, HistogramBin};
use crate::data::model::{CellValue, Dataset};

use super::columns::{is_identifier_name, primary_date_column};

pub const IDENTIFIER_WARNING: &str =
    "InsightCopilot detected an ID column. Switching to distribution view.";

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Histogram,
    Line,
    Bar,
}

/// Data behind a chart: bucket counts for a histogram, summed groups for
/// line and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values")]
pub enum ChartData {
    Bins(Vec<HistogramBin>),
    Groups(Vec<(CellValue, f64)>),
}

/// Everything a plotting backend needs: kind, fields, title and data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub data: ChartData,
}

/// The chosen chart plus any warning to show above it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDecision {
    pub chart: ChartSpec,
    pub warning: Option<String>,
}

// ---------------------------------------------------------------------------
// Chart-type policy
// ---------------------------------------------------------------------------

/// Decide how to chart `y_axis` against `x_axis`.
///
/// * X name contains "id": X is ignored and Y is shown as a histogram,
///   with a warning.
/// * X is the primary date column: Y summed per date, as a line.
/// * Otherwise: Y summed per X value, as bars.
///
/// Returns `None` when either column does not exist.
pub fn decide_chart(
    dataset: &Dataset,
    x_axis: &str,
    y_axis: &str,
    settings: &Settings,
) -> Option<ChartDecision> {
    let y_idx = dataset.column_index(y_axis)?;

    if is_identifier_name(x_axis) {
        log::debug!("X-axis '{x_axis}' looks like an identifier; showing distribution of '{y_axis}'");
        let values = dataset.numeric_values(y_idx);
        return Some(ChartDecision {
            chart: ChartSpec {
                kind: ChartKind::Histogram,
                title: settings.histogram_title.clone(),
                x_field: y_axis.to_string(),
                y_field: "count".to_string(),
                data: ChartData::Bins(histogram(&values, settings.max_histogram_bins)),
            },
            warning: Some(IDENTIFIER_WARNING.to_string()),
        });
    }

    let x_idx = dataset.column_index(x_axis)?;
    let groups = group_sum(dataset, x_idx, y_idx);

    let is_date_axis = primary_date_column(dataset).as_deref() == Some(x_axis);
    let (kind, title) = if is_date_axis {
        (ChartKind::Line, settings.line_title.clone())
    } else {
        (ChartKind::Bar, settings.bar_title.clone())
    };
    log::debug!("Charting '{y_axis}' by '{x_axis}' as {kind:?} ({} groups)", groups.len());

    Some(ChartDecision {
        chart: ChartSpec {
            kind,
            title,
            x_field: x_axis.to_string(),
            y_field: y_axis.to_string(),
            data: ChartData::Groups(groups),
        },
        warning: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv;
    use crate::insight::dates::{parse_date, prepare};

    fn sales() -> Dataset {
        let csv = "customer_id,OrderDate,region,amount\n\
                   7,2024-01-02,West,10\n\
                   3,2024-01-01,East,5\n\
                   7,2024-01-02,East,20\n\
                   9,bad,West,1\n\
                   4,2024-01-01,West,2.5\n";
        prepare(load_csv(csv.as_bytes()).unwrap())
    }

    fn day(s: &str) -> CellValue {
        CellValue::Date(parse_date(s).unwrap())
    }

    #[test]
    fn test_identifier_axis_switches_to_histogram() {
        let ds = sales();
        let decision = decide_chart(&ds, "customer_id", "amount", &Settings::default()).unwrap();
        assert_eq!(decision.chart.kind, ChartKind::Histogram);
        assert_eq!(decision.chart.x_field, "amount");
        assert_eq!(decision.chart.title, "Distribution Analysis");
        assert_eq!(decision.warning.as_deref(), Some(IDENTIFIER_WARNING));
        match &decision.chart.data {
            ChartData::Bins(bins) => {
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
            }
            other => panic!("expected bins, got {other:?}"),
        }
    }

    #[test]
    fn test_identifier_rule_applies_to_any_id_name() {
        // Substring match: "paid" contains "id".
        let ds = load_csv("paid,amount\nyes,1\n".as_bytes()).unwrap();
        let decision = decide_chart(&ds, "paid", "amount", &Settings::default()).unwrap();
        assert_eq!(decision.chart.kind, ChartKind::Histogram);
    }

    #[test]
    fn test_date_axis_gives_line_summed_per_date() {
        let ds = sales();
        let decision = decide_chart(&ds, "OrderDate", "amount", &Settings::default()).unwrap();
        assert_eq!(decision.chart.kind, ChartKind::Line);
        assert_eq!(decision.chart.title, "InsightCopilot Trend Analysis");
        assert!(decision.warning.is_none());
        assert_eq!(
            decision.chart.data,
            ChartData::Groups(vec![(day("2024-01-01"), 7.5), (day("2024-01-02"), 30.0)])
        );
    }

    #[test]
    fn test_category_axis_gives_bar_summed_per_value() {
        let ds = sales();
        let decision = decide_chart(&ds, "region", "amount", &Settings::default()).unwrap();
        assert_eq!(decision.chart.kind, ChartKind::Bar);
        assert_eq!(decision.chart.title, "InsightCopilot Comparative Analysis");
        assert_eq!(
            decision.chart.data,
            ChartData::Groups(vec![
                (CellValue::Text("East".into()), 25.0),
                (CellValue::Text("West".into()), 13.5),
            ])
        );
    }

    #[test]
    fn test_secondary_date_column_is_charted_as_bars() {
        let csv = "OrderDate,ship_date,amount\n2024-01-01,2024-01-03,1\n";
        let ds = prepare(load_csv(csv.as_bytes()).unwrap());
        let decision = decide_chart(&ds, "ship_date", "amount", &Settings::default()).unwrap();
        assert_eq!(decision.chart.kind, ChartKind::Bar);
    }

    #[test]
    fn test_unknown_columns_give_no_chart() {
        let ds = sales();
        assert!(decide_chart(&ds, "region", "missing", &Settings::default()).is_none());
        assert!(decide_chart(&ds, "missing", "amount", &Settings::default()).is_none());
    }
}
