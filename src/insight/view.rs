use serde::Serialize;

use crate::config::Settings;
use crate::data::model::Dataset;

use super::chart::{decide_chart, ChartDecision};
use super::columns::{
    classify, primary_date_column, select_metric, x_axis_choices, y_axis_choices,
    ColumnClassification,
};
use super::summary::{
    aggregate_metric, generate_summary, kpi_cards, AggregateSummary, KpiCard, SummaryPanel,
};

pub const CHART_UPLOAD_PROMPT: &str = "Upload a dataset to see charts";
pub const CHART_NO_NUMERIC: &str = "No numeric columns available for the Y-axis";
pub const CHART_NO_X_AXIS: &str = "No non-identifier columns available for the X-axis";
pub const CHART_UNAVAILABLE: &str = "Selected columns are not available for charting";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// What the user has picked in the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub question: String,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "content")]
pub enum ChartPanel {
    /// Informational text in place of a chart.
    Placeholder(String),
    Ready(ChartDecision),
}

/// Everything the dashboard renders, derived from one dataset and one set
/// of selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub loaded: bool,
    pub row_count: usize,
    pub columns: Vec<ColumnClassification>,
    pub date_column: Option<String>,
    pub metric: Option<String>,
    pub aggregates: Option<AggregateSummary>,
    pub kpi_cards: Vec<KpiCard>,
    pub preview: Option<Preview>,
    pub x_choices: Vec<String>,
    pub y_choices: Vec<String>,
    /// Axis selections after falling back to the first valid choice.
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub chart: ChartPanel,
    pub summary: SummaryPanel,
}

/// Keep the user's pick when it is still offered, else the first choice.
fn resolve(selected: Option<&str>, choices: &[String]) -> Option<String> {
    selected
        .filter(|s| choices.iter().any(|c| c == s))
        .map(str::to_string)
        .or_else(|| choices.first().cloned())
}

fn preview(dataset: &Dataset, n: usize) -> Preview {
    Preview {
        columns: dataset.column_names.clone(),
        rows: dataset
            .rows
            .iter()
            .take(n)
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
    }
}

/// Chart for the resolved axes, or the text explaining why there is none.
fn chart_panel(
    dataset: &Dataset,
    x_axis: Option<&str>,
    y_axis: Option<&str>,
    settings: &Settings,
) -> ChartPanel {
    match (x_axis, y_axis) {
        (_, None) => ChartPanel::Placeholder(CHART_NO_NUMERIC.to_string()),
        (None, _) => ChartPanel::Placeholder(CHART_NO_X_AXIS.to_string()),
        (Some(x), Some(y)) => match decide_chart(dataset, x, y, settings) {
            Some(decision) => ChartPanel::Ready(decision),
            None => ChartPanel::Placeholder(CHART_UNAVAILABLE.to_string()),
        },
    }
}

/// Compute the whole dashboard. Holds no state between calls; the UI host
/// calls it again after every input change.
pub fn compute_view(
    dataset: Option<&Dataset>,
    selections: &Selections,
    settings: &Settings,
) -> ViewModel {
    let Some(dataset) = dataset else {
        return ViewModel {
            loaded: false,
            row_count: 0,
            columns: Vec::new(),
            date_column: None,
            metric: None,
            aggregates: None,
            kpi_cards: kpi_cards(None, None, 0),
            preview: None,
            x_choices: Vec::new(),
            y_choices: Vec::new(),
            x_axis: None,
            y_axis: None,
            chart: ChartPanel::Placeholder(CHART_UPLOAD_PROMPT.to_string()),
            summary: generate_summary(&selections.question, None, None),
        };
    };

    let row_count = dataset.len();
    let metric = select_metric(dataset);
    let aggregates = metric
        .as_deref()
        .and_then(|m| aggregate_metric(dataset, m));

    let x_choices = x_axis_choices(dataset);
    let y_choices = y_axis_choices(dataset);
    let x_axis = resolve(selections.x_axis.as_deref(), &x_choices);
    let y_axis = resolve(selections.y_axis.as_deref(), &y_choices);

    let chart = chart_panel(dataset, x_axis.as_deref(), y_axis.as_deref(), settings);

    ViewModel {
        loaded: true,
        row_count,
        columns: classify(dataset),
        date_column: primary_date_column(dataset),
        kpi_cards: kpi_cards(metric.as_deref(), aggregates.as_ref(), row_count),
        summary: generate_summary(&selections.question, metric.as_deref(), aggregates.as_ref()),
        preview: Some(preview(dataset, settings.preview_rows)),
        metric,
        aggregates,
        x_choices,
        y_choices,
        x_axis,
        y_axis,
        chart,
    }
}
