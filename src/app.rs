use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TipsDashboardApp {
    pub state: AppState,
    config: DashboardConfig,
}

impl TipsDashboardApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for TipsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_source();
        self.state.process_events();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.config);
            });

        // Commit this frame's input before any output is drawn.
        if self.state.process_events() > 0 {
            ctx.request_repaint();
        }

        // ---- Central panel: summary, rows, plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::summary_cards(ui, self.state.view(), &self.config);
            ui.separator();

            let rows = &self.state.view().rows;
            egui::CollapsingHeader::new(format!("Filtered rows ({})", rows.len()))
                .default_open(false)
                .show(ui, |ui| {
                    table::rows_table(ui, rows, &self.config);
                });
            ui.separator();

            ui.heading("Total Bill vs Tip");
            plot::scatter_plot(ui, &self.state, &self.config);
        });

        // Keep polling the dataset file while idle.
        ctx.request_repaint_after(self.config.reload_interval());
    }
}
