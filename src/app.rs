use eframe::egui::{self, ScrollArea, Ui};

use crate::chart::histogram::HistogramMode;
use crate::state::AppState;
use crate::ui::{card, panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinDashApp {
    pub state: AppState,
}

impl PenguinDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PenguinDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("sidebar")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Palmer Penguins Dashboard");
                    ui.add_space(8.0);

                    ui.columns(2, |cols: &mut [Ui]| {
                        card(&mut cols[0], "Penguin Data Table", |ui: &mut Ui| {
                            tables::data_table(ui, &mut self.state);
                        });
                        card(&mut cols[1], "Penguin Data Grid", |ui: &mut Ui| {
                            tables::data_grid(ui, &mut self.state);
                        });
                    });
                    ui.add_space(8.0);

                    ui.columns(2, |cols: &mut [Ui]| {
                        card(&mut cols[0], "Grouped Histogram", |ui: &mut Ui| {
                            plot::histogram_plot(ui, &self.state, HistogramMode::Grouped);
                        });
                        card(&mut cols[1], "Stacked Histogram", |ui: &mut Ui| {
                            plot::histogram_plot(ui, &self.state, HistogramMode::Stacked);
                        });
                    });
                    ui.add_space(8.0);

                    card(ui, "Species Scatterplot", |ui: &mut Ui| {
                        plot::scatter_plot(ui, &self.state);
                    });
                });
        });
    }
}
