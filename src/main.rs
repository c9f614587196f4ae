mod app;
mod ui;

use app::CatalogueApp;
use eframe::egui;
use mak_catalogue::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();
    log::info!("Starting with source {}", config.source.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MAK – Catalogue of Times",
        options,
        Box::new(move |_cc| Ok(Box::new(CatalogueApp::new(&config)))),
    )
}
