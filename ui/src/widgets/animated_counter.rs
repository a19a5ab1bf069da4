//! A number that eases towards its target instead of jumping.

use egui::{Id, Response, RichText, Ui};

const EASE_SECONDS: f32 = 0.6;

/// Shows `target` as a large integer, animated from the previous value under `id`.
pub fn animated_counter(ui: &mut Ui, id: Id, target: u64) -> Response {
    #[allow(clippy::cast_precision_loss)]
    let shown = ui
        .ctx()
        .animate_value_with_time(id, target as f32, EASE_SECONDS);

    ui.label(RichText::new(format!("{:.0}", shown.max(0.0))).size(28.0).strong())
}
