pub mod panels;
pub mod plot;
pub mod tables;

use eframe::egui::{self, Ui};

/// A framed section with a heading, like a dashboard card.
pub fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(title);
        ui.add_space(4.0);
        add_contents(ui);
    });
}
