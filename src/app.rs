use eframe::egui;

use mak_catalogue::config::AppConfig;
use mak_catalogue::state::AppState;

use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CatalogueApp {
    pub state: AppState,
    /// Repaint at least this often so an expired snapshot gets reloaded.
    refresh_every: std::time::Duration,
}

impl CatalogueApp {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::from_config(config),
            refresh_every: config.repaint_interval(),
        }
    }
}

impl eframe::App for CatalogueApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.refresh();
        ctx.request_repaint_after(self.refresh_every);

        // ---- Top panel: menu, title, language ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Filter row ----
        egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
            panels::filter_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: result count ----
        egui::TopBottomPanel::bottom("results_bar").show(ctx, |ui| {
            panels::results_caption(ui, &self.state);
        });

        // ---- Central panel: results table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_table(ui, &self.state);
        });
    }
}
