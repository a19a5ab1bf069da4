//! Top bar shown while signed in.

use egui::{Align, Layout, Response, RichText, Ui};
use roster_business::{AuthState, LogoutCommand, RefreshTokenCommand};
use roster_states::StateCtx;

use crate::utils::colors::COLOR_MUTED;

pub fn nav_bar(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let account = state_ctx
        .state::<AuthState>()
        .user()
        .map(|user| {
            let name = if user.full_name.trim().is_empty() {
                user.email.clone()
            } else {
                user.full_name.clone()
            };
            (name, user.email.clone(), user.role)
        });

    let mut refresh = false;
    let mut sign_out = false;

    let response = ui
        .horizontal(|ui| {
            ui.label(RichText::new("Roster").strong().size(18.0));
            ui.separator();
            let _ = ui.selectable_label(true, "Users");

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let title = account
                    .as_ref()
                    .map_or_else(|| "Account".to_owned(), |(name, _, _)| name.clone());

                ui.menu_button(title, |ui| {
                    if let Some((_, email, role)) = &account {
                        ui.label(RichText::new(email).color(COLOR_MUTED));
                        ui.label(RichText::new(role.label()).small());
                        ui.separator();
                    }
                    if ui.button("Refresh session").clicked() {
                        refresh = true;
                        ui.close();
                    }
                    if ui.button("Sign out").clicked() {
                        sign_out = true;
                        ui.close();
                    }
                });
            });
        })
        .response;

    if refresh {
        state_ctx.dispatch(RefreshTokenCommand);
    }
    if sign_out {
        state_ctx.dispatch(LogoutCommand);
    }

    response
}
