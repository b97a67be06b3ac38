use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::{GROUPED_BINS_RANGE, STACKED_BINS_RANGE};
use crate::data::model::{NumericAttribute, Species};
use crate::state::AppState;

const PROJECT_URL: &str = "https://allisonhorst.github.io/palmerpenguins/";

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the sidebar. Every change is forwarded to an `AppState` handler.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sidebar");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Attribute selector ----
            ui.strong("Select Attribute:");
            let current = state.attribute;
            egui::ComboBox::from_id_salt("selected_attribute")
                .selected_text(current.column_name())
                .show_ui(ui, |ui: &mut Ui| {
                    for attr in NumericAttribute::ALL {
                        if ui
                            .selectable_label(current == attr, attr.column_name())
                            .clicked()
                        {
                            state.set_attribute(attr);
                        }
                    }
                });
            ui.add_space(6.0);

            // ---- Bin counts ----
            ui.strong("Grouped Histogram Bin Count:");
            let mut grouped = state.grouped_bins;
            if ui
                .add(egui::DragValue::new(&mut grouped).range(GROUPED_BINS_RANGE))
                .changed()
            {
                state.set_grouped_bins(grouped);
            }
            ui.add_space(6.0);

            ui.strong("Stacked Histogram Bin Count:");
            let mut stacked = state.stacked_bins;
            if ui
                .add(egui::Slider::new(&mut stacked, STACKED_BINS_RANGE))
                .changed()
            {
                state.set_stacked_bins(stacked);
            }
            ui.add_space(6.0);

            // ---- Species checkboxes ----
            ui.strong("Filter Species:");
            let counts = state.store.dataset().species_counts();
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for species in Species::ALL {
                    let mut checked = state.store.is_selected(species);
                    let text = RichText::new(format!("{species} ({})", counts[species.index()]))
                        .color(state.palette.color_for(species));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_species(species);
                    }
                }
            });
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            ui.separator();
            ui.hyperlink_to("Palmer Penguins", PROJECT_URL);
        });
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

        let view = state.store.filtered_view();
        ui.label(format!(
            "{}: {} penguins loaded, {} visible",
            state.source,
            state.store.dataset().len(),
            view.len()
        ));

        for (name, color) in state.palette.legend_entries() {
            ui.label(RichText::new(format!("■ {name}")).color(color));
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
        .set_title("Open penguin data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
