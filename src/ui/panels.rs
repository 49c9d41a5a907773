use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::insight::summary::{KpiCard, SummaryPanel};
use crate::insight::view::{Preview, ViewModel};
use crate::state::AppState;

use super::plot;

const QUESTION_HINT: &str = "Ask a business question (e.g., Explain revenue trends)";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, view: &ViewModel) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Copy view as JSON").clicked() {
                copy_view_json(ui, state, view);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(name) = &state.source_name {
            ui.label(format!(
                "{name}: {} rows, {} columns",
                view.row_count,
                view.columns.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn copy_view_json(ui: &Ui, state: &mut AppState, view: &ViewModel) {
    match serde_json::to_string_pretty(view) {
        Ok(json) => ui.ctx().copy_text(json),
        Err(e) => {
            log::error!("Failed to serialise view: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard body
// ---------------------------------------------------------------------------

/// Render the whole dashboard page in the central panel.
pub fn dashboard(ui: &mut Ui, state: &mut AppState, view: &ViewModel) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("InsightCopilot AI").size(28.0));
            ui.label(RichText::new("Enterprise KPI Intelligence Assistant").size(16.0));
            ui.separator();

            upload_section(ui, state, view);
            ui.add_space(8.0);
            kpi_row(ui, &view.kpi_cards);
            ui.separator();

            ui.heading("Ask InsightCopilot");
            ui.add(
                egui::TextEdit::singleline(&mut state.selections.question)
                    .hint_text(QUESTION_HINT)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(8.0);

            let (chart_width, summary_width) =
                two_to_one(ui.available_width(), ui.spacing().item_spacing.x);
            ui.horizontal_top(|ui: &mut Ui| {
                let layout = egui::Layout::top_down(egui::Align::Min);
                ui.allocate_ui_with_layout(egui::vec2(chart_width, 0.0), layout, |ui: &mut Ui| {
                    ui.set_width(chart_width);
                    visualization(ui, state, view);
                });
                ui.allocate_ui_with_layout(
                    egui::vec2(summary_width, 0.0),
                    layout,
                    |ui: &mut Ui| {
                        ui.set_width(summary_width);
                        summary_panel(ui, &view.summary);
                    },
                );
            });
        });
}

/// Split `total` into a 2:1 pair of widths with `gap` between them.
fn two_to_one(total: f32, gap: f32) -> (f32, f32) {
    let usable = (total - gap).max(0.0);
    let wide = usable * 2.0 / 3.0;
    (wide, usable - wide)
}

fn upload_section(ui: &mut Ui, state: &mut AppState, view: &ViewModel) {
    ui.heading("Upload Business Dataset");
    if ui.button("Upload CSV…").clicked() {
        open_file_dialog(state);
    }

    let Some(preview) = &view.preview else {
        return;
    };
    ui.label(RichText::new("Dataset loaded successfully").color(Color32::from_rgb(40, 160, 70)));
    ui.add_space(4.0);
    ui.strong("Data Preview");
    preview_table(ui, preview);
}

/// First rows of the dataset, all columns.
fn preview_table(ui: &mut Ui, preview: &Preview) {
    if preview.columns.is_empty() {
        return;
    }
    ui.push_id("preview_table", |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0), preview.columns.len())
                .header(20.0, |mut header| {
                    for col in &preview.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for row in &preview.rows {
                        body.row(18.0, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui: &mut Ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
    });
}

/// Three labelled numbers side by side.
fn kpi_row(ui: &mut Ui, cards: &[KpiCard]) {
    ui.columns(cards.len().max(1), |cols: &mut [Ui]| {
        for (col, card) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.label(RichText::new(&card.label).weak());
                ui.label(RichText::new(&card.value).size(24.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Visualisation panel
// ---------------------------------------------------------------------------

fn visualization(ui: &mut Ui, state: &mut AppState, view: &ViewModel) {
    ui.heading("Data Visualization");

    if view.loaded {
        if let Some(col) =
            axis_picker(ui, "x_axis", "Select X-axis", &view.x_choices, view.x_axis.as_deref())
        {
            state.set_x_axis(col);
        }
        if let Some(col) =
            axis_picker(ui, "y_axis", "Select Y-axis", &view.y_choices, view.y_axis.as_deref())
        {
            state.set_y_axis(col);
        }
        ui.add_space(4.0);
    }

    plot::chart_panel(ui, &view.chart);
}

/// A labelled select box. Returns the newly clicked column, if any.
fn axis_picker(
    ui: &mut Ui,
    id: &str,
    label: &str,
    choices: &[String],
    current: Option<&str>,
) -> Option<String> {
    let mut picked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.unwrap_or("—"))
            .show_ui(ui, |ui: &mut Ui| {
                for col in choices {
                    if ui
                        .selectable_label(current == Some(col.as_str()), col)
                        .clicked()
                    {
                        picked = Some(col.clone());
                    }
                }
            });
    });
    picked
}

// ---------------------------------------------------------------------------
// Executive summary panel
// ---------------------------------------------------------------------------

fn summary_panel(ui: &mut Ui, panel: &SummaryPanel) {
    ui.heading("Executive Summary");

    let summary = match panel {
        SummaryPanel::Prompt(msg) => {
            ui.label(RichText::new(msg).italics());
            return;
        }
        SummaryPanel::Ready(summary) => summary,
    };

    for (heading, body) in summary.sections() {
        ui.add_space(6.0);
        ui.label(RichText::new(heading).size(18.0).strong());
        emphasised_text(ui, body);
    }

    ui.add_space(6.0);
    if ui.button("Copy summary").clicked() {
        ui.ctx().copy_text(summary.to_markdown());
    }
}

/// Render `**bold**` spans; everything else is plain.
fn emphasised_text(ui: &mut Ui, text: &str) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for (i, part) in text.split("**").enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 1 {
                ui.label(RichText::new(part).strong());
            } else {
                ui.label(part);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload business dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    match crate::data::loader::load_file(&path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} rows with columns {:?}",
                dataset.len(),
                dataset.column_names
            );
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_dataset(dataset, name);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.set_load_error(format!("Error: {e:#}"));
        }
    }
}
