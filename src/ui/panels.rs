use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – image and date range
// ---------------------------------------------------------------------------

/// Render the left panel with the date-range picker.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(path) = state.image_path.as_ref().filter(|p| p.exists()) {
        let uri = format!("file://{}", path.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(uri)
                    .max_width(ui.available_width())
                    .max_height(200.0)
                    .corner_radius(10.0),
            );
        });
        ui.add_space(8.0);
    }

    ui.heading("Date range");
    ui.separator();

    let Some(ds) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.label(
        RichText::new(format!("Available: {} to {}", ds.min_date(), ds.max_date())).small(),
    );
    ui.add_space(4.0);

    let mut start = state.start;
    let mut end = state.end;
    let mut changed = false;

    egui::Grid::new("range_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            changed |= ui
                .add(DatePickerButton::new(&mut start).id_salt("start_date"))
                .changed();
            ui.end_row();

            ui.label("To");
            changed |= ui
                .add(DatePickerButton::new(&mut end).id_salt("end_date"))
                .changed();
            ui.end_row();
        });

    if changed {
        state.set_range(start, end);
    }

    ui.add_space(4.0);
    if ui.button("Reset").clicked() {
        state.reset_range();
    }

    if let Some(err) = &state.range_error {
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("{err}. Pick an end date on or after the start date."))
                .color(Color32::RED),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(days)) = (&state.dataset, state.selected_days()) {
            let total_days = (ds.max_date() - ds.min_date()).num_days() + 1;
            ui.label(format!("{days} of {total_days} days selected"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open bike sharing data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} rows from {}", dataset.len(), path.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                // Keep whatever was loaded before.
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
