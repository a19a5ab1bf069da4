use egui::Ui;
use log::info;
use roster_business::{AuthState, LoginForm, Route};

use crate::{pages, state::State};

pub struct RosterApp {
    state: State,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(mut state: State, egui_ctx: &egui::Context) -> Self {
        let repaint = egui_ctx.clone();
        state.ctx.set_repaint_hook(move || repaint.request_repaint());

        Self { state }
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            render(&mut self.state, ui);
        });
    }
}

/// Apply finished commands, follow the session to the right page and draw it.
pub fn render(state: &mut State, ui: &mut Ui) {
    state.ctx.sync();

    let auth = state.ctx.state::<AuthState>().clone();
    if state.ctx.state_mut::<Route>().follow(&auth) && *state.ctx.state::<Route>() == Route::Users
    {
        info!("Signed in, clearing the login form");
        state.ctx.update::<LoginForm>(|form| *form = LoginForm::default());
    }

    match *state.ctx.state::<Route>() {
        Route::Login => {
            pages::login_page(state, ui);
        }
        Route::Users => {
            pages::users_page(state, ui);
        }
    }
}
