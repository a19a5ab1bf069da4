//! Login page for anonymous visitors.

use crate::{state::State, widgets};
use egui::{Response, Ui};

/// Renders the centered sign-in card.
pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    widgets::login_widget(&mut state.ctx, ui)
}
