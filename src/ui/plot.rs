use chrono::DateTime;
use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints};

use crate::color::{generate_palette, SERIES_COLOR};
use crate::data::aggregate::HistogramBin;
use crate::data::model::CellValue;
use crate::insight::chart::{ChartData, ChartKind, ChartSpec};
use crate::insight::view::ChartPanel;

const SECONDS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Chart panel (left column of the dashboard)
// ---------------------------------------------------------------------------

/// Render the chart panel: a placeholder message, or the warning (if any)
/// followed by the chart.
pub fn chart_panel(ui: &mut Ui, panel: &ChartPanel) {
    let decision = match panel {
        ChartPanel::Placeholder(msg) => {
            ui.label(RichText::new(msg).italics());
            return;
        }
        ChartPanel::Ready(decision) => decision,
    };

    if let Some(warning) = &decision.warning {
        ui.label(RichText::new(format!("⚠ {warning}")).color(Color32::from_rgb(230, 160, 0)));
    }

    let spec = &decision.chart;
    ui.strong(&spec.title);

    match (&spec.kind, &spec.data) {
        (ChartKind::Histogram, ChartData::Bins(bins)) => histogram_plot(ui, spec, bins),
        (ChartKind::Line, ChartData::Groups(groups)) => line_plot(ui, spec, groups),
        (ChartKind::Bar, ChartData::Groups(groups)) => bar_plot(ui, spec, groups),
        (kind, _) => {
            log::warn!("Chart kind {kind:?} paired with mismatched data");
        }
    }
}

fn base_plot(spec: &ChartSpec) -> Plot<'static> {
    Plot::new(format!("chart_{:?}_{}_{}", spec.kind, spec.x_field, spec.y_field))
        .x_axis_label(spec.x_field.clone())
        .y_axis_label(spec.y_field.clone())
        .height(320.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
}

// ---------------------------------------------------------------------------
// Distribution view
// ---------------------------------------------------------------------------

fn histogram_plot(ui: &mut Ui, spec: &ChartSpec, bins: &[HistogramBin]) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                .width(b.upper - b.lower)
                .name(format!("{:.2} to {:.2}", b.lower, b.upper))
        })
        .collect();

    base_plot(spec).show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR));
    });
}

// ---------------------------------------------------------------------------
// Trend view
// ---------------------------------------------------------------------------

/// Position of a group key on a continuous axis. Dates map to days since
/// the Unix epoch; anything non-numeric falls back to its rank.
fn key_position(key: &CellValue, rank: usize) -> f64 {
    match key {
        CellValue::Date(d) => d.and_utc().timestamp() as f64 / SECONDS_PER_DAY,
        other => other.as_f64().unwrap_or(rank as f64),
    }
}

fn format_day(days: f64) -> String {
    DateTime::from_timestamp((days * SECONDS_PER_DAY) as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn line_plot(ui: &mut Ui, spec: &ChartSpec, groups: &[(CellValue, f64)]) {
    let dated = groups.iter().any(|(k, _)| matches!(k, CellValue::Date(_)));
    let points: PlotPoints = groups
        .iter()
        .enumerate()
        .map(|(rank, (key, value))| [key_position(key, rank), *value])
        .collect();

    let mut plot = base_plot(spec);
    if dated {
        plot = plot.x_axis_formatter(|mark: GridMark, _range| format_day(mark.value));
    }
    plot.show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(points)
                .name(&spec.y_field)
                .color(SERIES_COLOR)
                .width(2.0),
        );
    });
}

// ---------------------------------------------------------------------------
// Comparative view
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, spec: &ChartSpec, groups: &[(CellValue, f64)]) {
    let labels: Vec<String> = groups.iter().map(|(k, _)| k.to_string()).collect();
    let colors = generate_palette(groups.len());

    let bars: Vec<Bar> = groups
        .iter()
        .zip(labels.iter())
        .zip(colors)
        .enumerate()
        .map(|(i, (((_, value), label), color))| {
            Bar::new(i as f64, *value)
                .width(0.7)
                .name(label)
                .fill(color)
        })
        .collect();

    base_plot(spec)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let v = mark.value;
            if v.fract().abs() > f64::EPSILON || v < 0.0 {
                return String::new();
            }
            labels.get(v as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::dates::parse_date;

    #[test]
    fn test_dates_round_trip_through_axis_positions() {
        let key = CellValue::Date(parse_date("2024-03-09").unwrap());
        let pos = key_position(&key, 0);
        assert_eq!(format_day(pos), "2024-03-09");
    }

    #[test]
    fn test_non_date_keys_use_value_or_rank() {
        assert_eq!(key_position(&CellValue::Integer(7), 2), 7.0);
        assert_eq!(key_position(&CellValue::Text("x".into()), 2), 2.0);
    }
}
