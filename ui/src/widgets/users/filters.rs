use egui::{ComboBox, TextEdit, Ui};
use roster_business::{Role, StatusFilter, UserFilter};

pub(super) fn filters_row(ui: &mut Ui, filter: &mut UserFilter) {
    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(&mut filter.search)
                .hint_text("Search by name or email")
                .desired_width(240.0),
        );

        ComboBox::from_id_salt("role_filter")
            .selected_text(filter.role.map_or("All roles", Role::label))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.role, None, "All roles");
                for role in Role::ALL {
                    ui.selectable_value(&mut filter.role, Some(role), role.label());
                }
            });

        ComboBox::from_id_salt("status_filter")
            .selected_text(filter.status.label())
            .show_ui(ui, |ui| {
                for status in StatusFilter::ALL {
                    ui.selectable_value(&mut filter.status, status, status.label());
                }
            });

        if *filter != UserFilter::default() && ui.button("Clear filters").clicked() {
            *filter = UserFilter::default();
        }
    });
}
