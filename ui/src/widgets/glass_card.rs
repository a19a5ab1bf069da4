//! Translucent rounded card used by the login form and the metric tiles.

use egui::{Color32, Frame, InnerResponse, Margin, Stroke, Ui, epaint::Shadow};

pub fn glass_frame(ui: &Ui) -> Frame {
    let visuals = ui.visuals();
    let (fill, edge) = if visuals.dark_mode {
        (
            Color32::from_white_alpha(10),
            Color32::from_white_alpha(28),
        )
    } else {
        (
            Color32::from_white_alpha(200),
            Color32::from_black_alpha(20),
        )
    };

    Frame::NONE
        .fill(fill)
        .stroke(Stroke::new(1.0, edge))
        .inner_margin(Margin::symmetric(16, 12))
        .corner_radius(12.0)
        .shadow(Shadow {
            offset: [0, 4],
            blur: 16,
            spread: 0,
            color: Color32::from_black_alpha(40),
        })
}

pub fn glass_card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    glass_frame(ui).show(ui, add_contents)
}
