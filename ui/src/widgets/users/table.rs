//! Users grid.
//!
//! Rows are drawn with [`egui::Grid`] so every cell is an ordinary widget in the
//! accessibility tree.

use egui::{Button, Grid, RichText, Ui};
use roster_business::{DeleteConfirm, User};

use super::UserIntent;
use crate::utils::colors::{COLOR_BLUE, COLOR_GREEN, COLOR_MUTED, COLOR_RED};
use crate::widgets::role_badge;

const COLUMNS: [&str; 7] = [
    "Name",
    "Role",
    "Status",
    "Department",
    "Phone",
    "Created",
    "Actions",
];

const MISSING: &str = "—";

pub(super) fn users_table(
    ui: &mut Ui,
    rows: &[&User],
    confirm: &DeleteConfirm,
    busy: bool,
    intents: &mut Vec<UserIntent>,
) {
    Grid::new("users_grid")
        .num_columns(COLUMNS.len())
        .striped(true)
        .spacing([16.0, 8.0])
        .min_col_width(60.0)
        .show(ui, |ui| {
            for column in COLUMNS {
                ui.label(RichText::new(column).strong());
            }
            ui.end_row();

            for user in rows {
                user_row(ui, user, confirm.is_armed(&user.id), busy, intents);
                ui.end_row();
            }
        });
}

fn user_row(ui: &mut Ui, user: &User, armed: bool, busy: bool, intents: &mut Vec<UserIntent>) {
    ui.vertical(|ui| {
        ui.label(RichText::new(&user.full_name).strong());
        ui.label(RichText::new(&user.email).small().color(COLOR_MUTED));
    });

    role_badge(ui, user.role);

    ui.horizontal(|ui| {
        if user.is_active {
            ui.colored_label(COLOR_GREEN, "Active");
        } else {
            ui.colored_label(COLOR_RED, "Inactive");
        }
        if user.is_verified {
            ui.label(RichText::new("✔ Verified").small().color(COLOR_BLUE))
                .on_hover_text("Email address confirmed");
        }
    });

    ui.label(optional(user.department.as_deref()));
    ui.label(optional(user.phone.as_deref()));
    ui.label(user.created_display())
        .on_hover_text(format!("Updated {}", user.updated_display()));

    ui.horizontal(|ui| {
        if armed {
            if ui
                .add_enabled(
                    !busy,
                    Button::new(RichText::new("Confirm").color(COLOR_RED)),
                )
                .clicked()
            {
                intents.push(UserIntent::ConfirmDelete(user.id.clone()));
            }
            if ui.button("Cancel").clicked() {
                intents.push(UserIntent::CancelDelete);
            }
        } else {
            if ui
                .add_enabled(!busy, Button::new("✏ Edit"))
                .on_hover_text("Edit user")
                .clicked()
            {
                intents.push(UserIntent::OpenEdit(user.clone()));
            }
            if ui
                .add_enabled(!busy, Button::new("🗑 Delete"))
                .on_hover_text("Delete user")
                .clicked()
            {
                intents.push(UserIntent::ArmDelete(user.id.clone()));
            }
        }
    });
}

fn optional(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

#[cfg(test)]
mod table_test {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use roster_business::{DeleteConfirm, Role, User};

    use super::users_table;

    fn user(id: &str, name: &str, verified: bool, department: Option<&str>) -> User {
        User {
            id: id.to_owned(),
            email: format!("{id}@x.com"),
            full_name: name.to_owned(),
            role: Role::Moderator,
            is_active: true,
            is_verified: verified,
            phone: None,
            department: department.map(str::to_owned),
            created_at: "2024-03-05T08:00:00Z".to_owned(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_rows_show_placeholders_and_markers() {
        let users = vec![
            user("a", "Ana Ruiz", true, Some("Ops")),
            user("b", "Bob Lee", false, Some("  ")),
        ];

        let harness = Harness::new_ui_state(
            |ui, users: &mut Vec<User>| {
                let rows: Vec<&User> = users.iter().collect();
                let mut intents = Vec::new();
                users_table(ui, &rows, &DeleteConfirm::default(), false, &mut intents);
            },
            users,
        );

        assert_eq!(harness.query_all_by_label("✔ Verified").count(), 1);
        assert!(harness.query_by_label("Ops").is_some());
        // Bob's blank department and both phones.
        assert_eq!(harness.query_all_by_label("—").count(), 3);
        assert_eq!(harness.query_all_by_label("Moderator").count(), 2);
        assert_eq!(harness.query_all_by_label("2024-03-05 08:00").count(), 2);
    }

    #[test]
    fn test_armed_row_swaps_actions() {
        let mut confirm = DeleteConfirm::default();
        confirm.arm("b");
        let users = vec![user("a", "Ana Ruiz", true, None), user("b", "Bob Lee", true, None)];

        let harness = Harness::new_ui_state(
            move |ui, users: &mut Vec<User>| {
                let rows: Vec<&User> = users.iter().collect();
                let mut intents = Vec::new();
                users_table(ui, &rows, &confirm, false, &mut intents);
            },
            users,
        );

        assert_eq!(harness.query_all_by_label("🗑 Delete").count(), 1);
        assert_eq!(harness.query_all_by_label("✏ Edit").count(), 1);
        assert!(harness.query_by_label("Confirm").is_some());
        assert!(harness.query_by_label("Cancel").is_some());
    }
}
