mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::PenguinDashApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_cli(Cli::parse())?;

    // The dataset is loaded once, before the window opens; failure is fatal.
    let (dataset, source) = match &config.data {
        Some(path) => {
            let dataset = data::loader::load_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            (dataset, path.display().to_string())
        }
        None => (data::loader::load_bundled()?, "bundled sample".to_string()),
    };
    if dataset.is_empty() {
        log::warn!("{source} contains no penguins");
    } else {
        log::info!(
            "Loaded {} penguins from {source} ({} islands)",
            dataset.len(),
            dataset.islands.len()
        );
    }

    let state = AppState::new(dataset, source, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Palmer Penguins Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(PenguinDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
