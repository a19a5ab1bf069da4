use egui::{Id, Response, RichText, Ui};

use super::chart_tooltip::{Slice, chart_tooltip};
use super::{animated_counter, glass_card};
use crate::utils::colors::COLOR_MUTED;

/// A stat tile: caption, animated value and a hover breakdown.
pub fn metric_card(
    ui: &mut Ui,
    caption: &str,
    value: u64,
    whole: u64,
    breakdown: &[Slice<'_>],
) -> Response {
    let response = glass_card(ui, |ui| {
        ui.set_min_width(140.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(caption).color(COLOR_MUTED));
            animated_counter(ui, Id::new(("metric", caption)), value);
        });
    })
    .response;

    if breakdown.is_empty() {
        response
    } else {
        response.on_hover_ui(|ui| chart_tooltip(ui, caption, whole, breakdown))
    }
}
