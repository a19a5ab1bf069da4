use egui::{Align, Layout, Response, RichText, ScrollArea, Ui};
use log::debug;
use roster_business::{
    CreateUserCommand, DeleteUserCommand, FetchUserCommand, FetchUsersCommand, UpdateUserCommand,
    UserListViewState, UserModal, UsersState,
};
use roster_states::StateCtx;

use super::filters::filters_row;
use super::metrics::metrics_row;
use super::modals::user_modal;
use super::table::users_table;
use super::UserIntent;
use crate::utils::colors::{COLOR_AMBER, COLOR_MUTED};
use crate::widgets::error_banner;

/// Renders the whole users page and applies what the user asked for.
///
/// The first render after entering the page triggers one list fetch.
pub fn users_panel(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    if state_ctx
        .state_mut::<UserListViewState>()
        .take_initial_fetch()
    {
        state_ctx.dispatch(FetchUsersCommand::default());
    }

    let users = state_ctx.state::<UsersState>().clone();
    let mut view = state_ctx.state::<UserListViewState>().clone();
    let mut intents = Vec::new();

    let busy = users.action().is_in_flight();

    let response = ui
        .vertical(|ui| {
            ui.horizontal(|ui| {
                ui.heading("User management");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("➕ Add user").clicked() {
                        intents.push(UserIntent::OpenCreate);
                    }
                    if ui
                        .add_enabled(!users.is_loading(), egui::Button::new("⟳ Refresh"))
                        .clicked()
                    {
                        intents.push(UserIntent::Refresh);
                    }
                });
            });
            ui.add_space(8.0);

            if let Some(error) = users.error()
                && error_banner(ui, error)
            {
                intents.push(UserIntent::DismissError);
            }

            metrics_row(ui, users.users(), users.total());
            ui.add_space(8.0);
            filters_row(ui, &mut view.filter);
            ui.add_space(8.0);

            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Processing...").color(COLOR_AMBER));
                });
            }

            let rows = view.filter.apply(users.users());

            if users.is_loading() && users.users().is_empty() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading users...");
                });
            } else if rows.is_empty() {
                ui.label(RichText::new("No users found").color(COLOR_MUTED).italics());
            } else {
                ScrollArea::vertical()
                    .auto_shrink([false, true])
                    .max_height((ui.available_height() - 32.0).max(160.0))
                    .show(ui, |ui| {
                        users_table(ui, &rows, &view.delete_confirm, busy, &mut intents);
                    });
            }

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "Showing {} of {} users",
                    rows.len(),
                    users.total()
                ))
                .color(COLOR_MUTED),
            );

            user_modal(ui, &mut view, users.action(), &mut intents);
        })
        .response;

    *state_ctx.state_mut::<UserListViewState>() = view;

    for intent in intents {
        apply(state_ctx, intent);
    }

    response
}

fn apply(state_ctx: &mut StateCtx, intent: UserIntent) {
    debug!("Users page: {intent:?}");

    match intent {
        UserIntent::Refresh => {
            state_ctx.dispatch(FetchUsersCommand::default());
        }
        UserIntent::DismissError => state_ctx.update::<UsersState>(UsersState::clear_error),
        UserIntent::OpenCreate => {
            state_ctx.update::<UsersState>(UsersState::clear_action);
            state_ctx.update::<UserListViewState>(UserListViewState::open_create);
        }
        UserIntent::OpenEdit(user) => {
            state_ctx.update::<UsersState>(UsersState::clear_action);
            state_ctx.update::<UserListViewState>(|view| view.open_edit(&user));
            state_ctx.dispatch(FetchUserCommand { id: user.id });
        }
        UserIntent::CloseModal => {
            state_ctx.update::<UserListViewState>(UserListViewState::close_modal);
        }
        UserIntent::SubmitCreate => {
            let request = state_ctx
                .state::<UserListViewState>()
                .create_form
                .to_request();
            match request {
                Ok(request) => {
                    state_ctx.update::<UserListViewState>(|view| view.form_error = None);
                    state_ctx.dispatch(CreateUserCommand { request });
                }
                Err(e) => {
                    state_ctx
                        .update::<UserListViewState>(|view| view.form_error = Some(e.to_string()));
                }
            }
        }
        UserIntent::SubmitEdit => submit_edit(state_ctx),
        UserIntent::ArmDelete(id) => {
            state_ctx.update::<UserListViewState>(|view| view.delete_confirm.arm(&id));
        }
        UserIntent::CancelDelete => {
            state_ctx.update::<UserListViewState>(|view| view.delete_confirm.disarm());
        }
        UserIntent::ConfirmDelete(id) => {
            state_ctx.dispatch(DeleteUserCommand { id });
        }
    }
}

fn submit_edit(state_ctx: &mut StateCtx) {
    let UserModal::Edit(form) = &state_ctx.state::<UserListViewState>().modal else {
        return;
    };
    let id = form.id.to_string();

    match form.to_request() {
        Ok(request) if request.is_empty() => {
            debug!("No changes for user {id}");
            state_ctx.update::<UserListViewState>(UserListViewState::close_modal);
        }
        Ok(request) => {
            state_ctx.update::<UserListViewState>(|view| view.form_error = None);
            state_ctx.dispatch(UpdateUserCommand { id, request });
        }
        Err(e) => {
            state_ctx.update::<UserListViewState>(|view| view.form_error = Some(e.to_string()));
        }
    }
}
