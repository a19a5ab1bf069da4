use egui::{Color32, Frame, Margin, Response, RichText, Ui};
use roster_business::Role;

use crate::utils::colors::role_color;

/// Pill with the role label on the role color.
pub fn role_badge(ui: &mut Ui, role: Role) -> Response {
    Frame::NONE
        .fill(role_color(role))
        .inner_margin(Margin::symmetric(6, 2))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.label(RichText::new(role.label()).color(Color32::WHITE).small());
        })
        .response
}
