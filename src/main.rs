mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::TipsDashboardApp;
use config::DashboardConfig;
use data::loader::DatasetSource;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default();

    // A dataset that cannot be loaded at startup is fatal.
    let source = DatasetSource::new(&config.data_path);
    let state = match AppState::open(source, config.reload_interval()) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start dashboard: {e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(TipsDashboardApp::new(state, config)))),
    )
}
