mod app;
mod config;
mod error;
mod session;
mod state;
mod ui;

use anyhow::anyhow;
use eframe::egui;
use tracing::info;

use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;
    info!("Storing line lists in {}", config.lists_dir.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Prompt Line Builder")
            .with_inner_size([1440.0, 900.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Prompt Line Builder",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app::App::new(&config)))),
    )
    .map_err(|err| anyhow!("failed to launch eframe app: {err}"))?;

    Ok(())
}
