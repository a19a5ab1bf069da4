//! Hover breakdown shown over a metric tile.

use egui::{Color32, ProgressBar, RichText, Ui};

/// One labelled share of a tooltip breakdown.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    pub label: &'a str,
    pub value: u64,
    pub color: Color32,
}

/// Lists every slice with its share of `whole`.
pub fn chart_tooltip(ui: &mut Ui, title: &str, whole: u64, slices: &[Slice<'_>]) {
    ui.label(RichText::new(title).strong());
    ui.add_space(4.0);

    for slice in slices {
        #[allow(clippy::cast_precision_loss)]
        let share = if whole == 0 {
            0.0
        } else {
            slice.value as f32 / whole as f32
        };

        ui.horizontal(|ui| {
            ui.colored_label(slice.color, "●");
            ui.label(format!("{}: {}", slice.label, slice.value));
        });
        ui.add(
            ProgressBar::new(share.clamp(0.0, 1.0))
                .desired_width(160.0)
                .fill(slice.color)
                .text(format!("{:.0}%", share * 100.0)),
        );
    }
}
