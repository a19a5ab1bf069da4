use egui::{Color32, Frame, Margin, RichText, Ui};

use crate::utils::colors::COLOR_RED;

/// Red banner with a dismiss button. Returns `true` when dismissed.
pub fn error_banner(ui: &mut Ui, message: &str) -> bool {
    let mut dismissed = false;

    Frame::NONE
        .fill(COLOR_RED.gamma_multiply(0.15))
        .stroke((1.0, COLOR_RED))
        .inner_margin(Margin::symmetric(10, 6))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message).color(COLOR_RED));
                if ui
                    .small_button(RichText::new("Dismiss").color(Color32::GRAY))
                    .clicked()
                {
                    dismissed = true;
                }
            });
        });

    dismissed
}
