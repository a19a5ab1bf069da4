//! Sign-in and registration form.
//!
//! Editing any field clears the last error. While a request is in flight the submit button is
//! replaced by a spinner so a second submission cannot start.

use egui::{Align, Button, Key, Layout, Response, RichText, TextEdit, Ui};
use roster_business::{AuthState, LoginForm, LoginMode};
use roster_states::StateCtx;

use super::{error_banner, glass_card};
use crate::utils::colors::COLOR_MUTED;

pub fn login_widget(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let (loading, error) = {
        let auth = state_ctx.state::<AuthState>();
        (auth.is_loading(), auth.error().map(str::to_owned))
    };
    let mut form = state_ctx.state::<LoginForm>().clone();

    let mut submit = false;
    let mut edited = false;
    let mut toggle = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(48.0);

            glass_card(ui, |ui| {
                ui.set_width(320.0);
                ui.vertical_centered(|ui| {
                    ui.heading(match form.mode {
                        LoginMode::SignIn => "Welcome back",
                        LoginMode::Register => "Create your account",
                    });
                    ui.label(RichText::new("Roster administration console").color(COLOR_MUTED));
                });
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    if let Some(err) = &error {
                        edited |= error_banner(ui, err);
                        ui.add_space(8.0);
                    }

                    if form.mode == LoginMode::Register {
                        edited |= field(ui, "Full name", &mut form.full_name, "Ana Ruiz").changed();
                    }
                    edited |= field(ui, "Email", &mut form.email, "you@company.com").changed();

                    ui.label("Password");
                    let password = ui.add(
                        TextEdit::singleline(&mut form.password)
                            .password(true)
                            .desired_width(f32::INFINITY),
                    );
                    edited |= password.changed();
                    if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        submit = true;
                    }

                    ui.add_space(12.0);

                    if loading {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(match form.mode {
                                LoginMode::SignIn => "Signing in...",
                                LoginMode::Register => "Creating account...",
                            });
                        });
                    } else {
                        let label = match form.mode {
                            LoginMode::SignIn => "Sign in",
                            LoginMode::Register => "Create account",
                        };
                        if ui
                            .add_sized([ui.available_width(), 32.0], Button::new(label))
                            .clicked()
                        {
                            submit = true;
                        }
                    }

                    ui.add_space(8.0);
                    let switch = match form.mode {
                        LoginMode::SignIn => "Create an account",
                        LoginMode::Register => "Already have an account? Sign in",
                    };
                    if ui
                        .add_enabled(!loading, Button::new(switch).frame(false))
                        .clicked()
                    {
                        toggle = true;
                    }
                });
            });
        })
        .response;

    if toggle {
        form.toggle_mode();
        edited = true;
    }
    if edited && error.is_some() {
        state_ctx.update::<AuthState>(AuthState::clear_error);
    }

    let mode = form.mode;
    *state_ctx.state_mut::<LoginForm>() = form;

    if submit && !loading {
        submit_form(state_ctx, mode);
    }

    response
}

fn field(ui: &mut Ui, caption: &str, value: &mut String, hint: &str) -> Response {
    ui.label(caption);
    ui.add(
        TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
}

fn submit_form(state_ctx: &mut StateCtx, mode: LoginMode) {
    let result = match mode {
        LoginMode::SignIn => state_ctx
            .state::<LoginForm>()
            .login_command()
            .map(|command| state_ctx.dispatch(command)),
        LoginMode::Register => state_ctx
            .state::<LoginForm>()
            .register_command()
            .map(|command| state_ctx.dispatch(command)),
    };

    if let Err(e) = result {
        state_ctx.update::<AuthState>(|auth| auth.fail(e.to_string()));
    }
}
