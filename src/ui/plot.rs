use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metric curve plot (central panel)
// ---------------------------------------------------------------------------

/// Render the metric-over-epochs chart in the central panel.
pub fn curve_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.results.is_none() {
                    ui.heading("Open a results file to view curves  (File → Open…)");
                } else {
                    ui.heading(format!("No split '{}' in these results", state.split));
                }
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title.as_str());
    });

    Plot::new("curve_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                if !state.is_visible(&series.label) {
                    continue;
                }

                let color = state
                    .colors
                    .as_ref()
                    .map(|c| c.color_for(&series.label))
                    .unwrap_or(eframe::egui::Color32::LIGHT_BLUE);

                let points: PlotPoints = series.points.iter().copied().collect();

                let line = Line::new(points)
                    .name(&series.label)
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
