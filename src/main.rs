mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::DashboardState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load();
    let store = match data::loader::load_file(&config.dataset_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to load {}: {e}", config.dataset_path.display());
            return Err(e).with_context(|| {
                format!("loading launch records from {}", config.dataset_path.display())
            });
        }
    };
    log::info!(
        "Loaded {} launches from {} sites, payload {}–{} kg",
        store.len(),
        store.sites().len(),
        store.min_payload_mass(),
        store.max_payload_mass()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let state = DashboardState::new(Arc::new(store), Some(config.dataset_path.clone()));

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(state, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
