use anyhow::{Context, Result};
use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Build the app and load the configured dataset. Any failure here is
    /// fatal: the window shows only the error.
    pub fn new(config: Result<DashboardConfig>) -> Self {
        let state = Self::startup(config).unwrap_or_else(|e| {
            log::error!("Startup failed: {e:#}");
            let mut state = AppState::default();
            state.fail_load(format!("{e:#}"));
            state
        });
        Self { state }
    }

    fn startup(config: Result<DashboardConfig>) -> Result<AppState> {
        let config = config.context("invalid configuration")?;
        let colors = config.chart_colors()?;
        let mut state = AppState::from_config(&config, colors);

        let dataset = loader::load_file(&config.data_path).context("could not load dataset")?;
        log::info!(
            "Loaded {} rows from {}",
            dataset.len(),
            config.data_path.display()
        );
        state.set_dataset(dataset);
        Ok(state)
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(err) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.heading(egui::RichText::new(err).color(egui::Color32::RED));
                });
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: date range ----
        egui::SidePanel::left("range_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
