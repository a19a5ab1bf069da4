//! Create and edit dialogs.

use egui::{Align2, Button, ComboBox, Grid, RichText, TextEdit, Ui, Window};
use roster_business::{
    CreateUserForm, EditUserForm, Role, UserActionKind, UserActionState, UserListViewState,
    UserModal,
};

use super::UserIntent;
use crate::utils::colors::{COLOR_MUTED, COLOR_RED};

pub(super) fn user_modal(
    ui: &mut Ui,
    view: &mut UserListViewState,
    action: &UserActionState,
    intents: &mut Vec<UserIntent>,
) {
    let form_error = view.form_error.clone();

    match &mut view.modal {
        UserModal::Closed => {}
        UserModal::Create => {
            let server_error = action.failure(UserActionKind::Create);
            let saving = action.is_in_flight() && action.kind() == Some(UserActionKind::Create);
            let error = form_error.as_deref().or(server_error);
            create_modal(ui, &mut view.create_form, error, saving, intents);
        }
        UserModal::Edit(form) => {
            let server_error = action.failure(UserActionKind::Update);
            let saving = action.is_in_flight() && action.kind() == Some(UserActionKind::Update);
            let refreshing = action.is_in_flight() && action.kind() == Some(UserActionKind::Get);
            let error = form_error.as_deref().or(server_error);
            edit_modal(ui, form, error, saving, refreshing, intents);
        }
    }
}

fn create_modal(
    ui: &mut Ui,
    form: &mut CreateUserForm,
    error: Option<&str>,
    saving: bool,
    intents: &mut Vec<UserIntent>,
) {
    let mut open = true;

    Window::new("Add user")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            error_line(ui, error);

            Grid::new("create_user_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    text_row(ui, "Full name *", &mut form.full_name, false);
                    text_row(ui, "Email *", &mut form.email, false);
                    text_row(ui, "Password *", &mut form.password, true);
                    role_row(ui, "create_role", &mut form.role);
                    text_row(ui, "Phone", &mut form.phone, false);
                    text_row(ui, "Department", &mut form.department, false);
                });

            ui.add_space(12.0);
            footer(ui, "Create user", saving, intents, UserIntent::SubmitCreate);
        });

    if !open {
        intents.push(UserIntent::CloseModal);
    }
}

fn edit_modal(
    ui: &mut Ui,
    form: &mut EditUserForm,
    error: Option<&str>,
    saving: bool,
    refreshing: bool,
    intents: &mut Vec<UserIntent>,
) {
    let mut open = true;

    Window::new("Edit user")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            error_line(ui, error);
            if refreshing {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading latest details...").color(COLOR_MUTED));
                });
            }

            Grid::new("edit_user_form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Email");
                    ui.label(RichText::new(&form.email).color(COLOR_MUTED));
                    ui.end_row();

                    text_row(ui, "Full name *", &mut form.full_name, false);
                    role_row(ui, "edit_role", &mut form.role);
                    text_row(ui, "Phone", &mut form.phone, false);
                    text_row(ui, "Department", &mut form.department, false);

                    ui.label("Status");
                    ui.checkbox(&mut form.is_active, "Active account");
                    ui.end_row();
                });

            ui.add_space(12.0);
            footer(ui, "Save changes", saving, intents, UserIntent::SubmitEdit);
        });

    if !open {
        intents.push(UserIntent::CloseModal);
    }
}

fn error_line(ui: &mut Ui, error: Option<&str>) {
    if let Some(error) = error {
        ui.colored_label(COLOR_RED, error);
        ui.add_space(8.0);
    }
}

fn text_row(ui: &mut Ui, caption: &str, value: &mut String, password: bool) {
    ui.label(caption);
    ui.add(
        TextEdit::singleline(value)
            .password(password)
            .desired_width(220.0),
    );
    ui.end_row();
}

fn role_row(ui: &mut Ui, id_salt: &str, role: &mut Role) {
    ui.label("Role");
    ComboBox::from_id_salt(id_salt)
        .selected_text(role.label())
        .show_ui(ui, |ui| {
            for option in Role::ALL {
                ui.selectable_value(role, option, option.label());
            }
        });
    ui.end_row();
}

fn footer(
    ui: &mut Ui,
    submit_label: &str,
    saving: bool,
    intents: &mut Vec<UserIntent>,
    submit: UserIntent,
) {
    ui.horizontal(|ui| {
        if saving {
            ui.spinner();
            ui.label("Saving...");
        } else if ui.add(Button::new(submit_label)).clicked() {
            intents.push(submit);
        }

        if ui.add_enabled(!saving, Button::new("Cancel")).clicked() {
            intents.push(UserIntent::CloseModal);
        }
    });
}
