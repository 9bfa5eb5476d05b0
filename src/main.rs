mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::CurveViewerApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Plot per-epoch metric curves from a training results JSON file.
#[derive(Debug, Parser)]
#[command(name = "esci-toolkit", version, about)]
struct Cli {
    /// Results file: `{ split: { series: [score per epoch] } }`
    results: Option<PathBuf>,

    /// Split to show first
    #[arg(short, long, default_value = "valid")]
    split: String,

    /// Metric name for the title and y axis
    #[arg(short, long, default_value = "Accuracy")]
    metric: String,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::new(cli.split, cli.metric);
    if let Some(path) = &cli.results {
        state.open(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ESCI Toolkit – Metric Curves",
        options,
        Box::new(|_cc| Ok(Box::new(CurveViewerApp::new(state)))),
    )
}
