use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series toggles and summary
// ---------------------------------------------------------------------------

/// Render the left panel: split selector, series visibility, summary table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    if state.results.is_none() {
        ui.label("No results loaded.");
        return;
    }

    // ---- Split selector ----
    ui.strong("Split");
    let current = state.split.clone();
    egui::ComboBox::from_id_salt("split")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for split in state.splits() {
                if ui.selectable_label(current == split, split.as_str()).clicked() {
                    state.set_split(split);
                }
            }
        });
    ui.separator();

    let Some(chart) = state.chart.clone() else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.show_all();
        }
        if ui.small_button("None").clicked() {
            state.hide_all();
        }
    });

    ScrollArea::vertical()
        .id_salt("series_toggles")
        .max_height(ui.available_height() * 0.5)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for series in &chart.series {
                let mut text = RichText::new(&series.label);
                if let Some(colors) = &state.colors {
                    text = text.color(colors.color_for(&series.label));
                }
                let mut checked = state.is_visible(&series.label);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_series(&series.label);
                }
            }
        });

    ui.separator();
    ui.strong("Summary");

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(80.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            for title in ["Series", "Epochs", "Last", "Best (epoch)"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for series in &chart.series {
                let summary = series.summary();
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(series.label.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(summary.epochs.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(fmt_score(summary.last));
                    });
                    row.col(|ui: &mut Ui| {
                        match summary.best {
                            Some((epoch, score)) => ui.label(format!("{score:.4} ({epoch})")),
                            None => ui.label("–"),
                        };
                    });
                });
            }
        });
}

fn fmt_score(score: Option<f64>) -> String {
    score.map(|s| format!("{s:.4}")).unwrap_or_else(|| "–".to_string())
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(path.display().to_string());
        }

        if let Some(chart) = &state.chart {
            ui.separator();
            ui.label(format!(
                "{} series, {} visible",
                chart.series.len(),
                chart
                    .series
                    .iter()
                    .filter(|s| state.is_visible(&s.label))
                    .count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open training results")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
