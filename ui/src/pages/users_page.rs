//! User administration page, shown while signed in.

use crate::{state::State, widgets};
use egui::{Response, Ui};
use roster_business::AuthState;

/// Renders the navigation bar above the users panel.
///
/// Session errors, e.g. a rejected "Refresh session", show between the two.
pub fn users_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical(|ui| {
        widgets::nav_bar(&mut state.ctx, ui);

        let session_error = state.ctx.state::<AuthState>().error().map(str::to_owned);
        if let Some(message) = session_error {
            ui.add_space(4.0);
            if widgets::error_banner(ui, &message) {
                state.ctx.update::<AuthState>(AuthState::clear_error);
            }
        }

        ui.separator();
        widgets::users_panel(&mut state.ctx, ui);
    })
    .response
}
