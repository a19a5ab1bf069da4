//! Manual-only commands for the session.
//!
//! Each command marks [`AuthState`] as loading in its synchronous part, then performs the
//! network call on a Tokio task and reports back through the [`Updater`].

use log::{error, info, warn};
use roster_states::{Command, CommandFuture, Dep, Updater};

use crate::storage::keys;
use crate::{
    ApiError, AuthResponse, AuthState, KeyValueStore, RegisterRequest, Services,
    UserListViewState, UsersState,
};

pub const LOGIN_FALLBACK: &str = "Unable to sign in";
pub const REFRESH_FALLBACK: &str = "Unable to refresh session";
pub const REGISTER_FALLBACK: &str = "Unable to create account";

/// Persist tokens and the user blob. Write failures are logged, never fatal.
fn persist_session(store: &dyn KeyValueStore, response: &AuthResponse) {
    if let Err(e) = store.set(keys::ACCESS_TOKEN, &response.access_token) {
        error!("Failed to persist access token: {e}");
    }
    if let Err(e) = store.set(keys::REFRESH_TOKEN, &response.refresh_token) {
        error!("Failed to persist refresh token: {e}");
    }
    match serde_json::to_string(&response.user) {
        Ok(user) => {
            if let Err(e) = store.set(keys::USER, &user) {
                error!("Failed to persist user: {e}");
            }
        }
        Err(e) => error!("Failed to serialize user: {e}"),
    }
}

fn clear_session(store: &dyn KeyValueStore) {
    for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN, keys::USER] {
        if let Err(e) = store.remove(key) {
            error!("Failed to remove {key} from store: {e}");
        }
    }
}

fn finish_sign_in(
    services: &Services,
    updater: &Updater,
    result: Result<AuthResponse, ApiError>,
    fallback: &'static str,
) {
    match result {
        Ok(response) => {
            info!("Session established for {}", response.user.email);
            persist_session(services.store.as_ref(), &response);
            updater.update::<AuthState>(move |auth| auth.sign_in(response));
        }
        Err(e) => {
            warn!("Authentication request failed: {e}");
            let message = e.display_message(fallback);
            updater.update::<AuthState>(move |auth| auth.fail(message));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl Command for LoginCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        updater.update::<AuthState>(AuthState::start);

        Box::pin(async move {
            let result = services.auth.login(&self.email, &self.password).await;
            finish_sign_in(&services, &updater, result, LOGIN_FALLBACK);
        })
    }
}

/// Best-effort server logout, then an unconditional local sign out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        let token = deps
            .get_state_ref::<AuthState>()
            .access_token()
            .map(str::to_owned);

        Box::pin(async move {
            if let Some(token) = token {
                if let Err(e) = services.auth.logout(&token).await {
                    warn!("Logout request failed, signing out locally: {e}");
                }
            }

            clear_session(services.store.as_ref());
            updater.update::<AuthState>(AuthState::reset);
            updater.set(UsersState::default());
            updater.set(UserListViewState::default());
            info!("Signed out");
        })
    }
}

/// Exchange the refresh token for a new pair. Never scheduled automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshTokenCommand;

impl Command for RefreshTokenCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        let refresh_token = deps
            .get_state_ref::<AuthState>()
            .refresh_token()
            .map(str::to_owned);

        let Some(refresh_token) = refresh_token else {
            updater.update::<AuthState>(|auth| auth.fail("No session to refresh"));
            return Box::pin(async {});
        };
        updater.update::<AuthState>(AuthState::start);

        Box::pin(async move {
            let result = services.auth.refresh_token(&refresh_token).await;
            finish_sign_in(&services, &updater, result, REFRESH_FALLBACK);
        })
    }
}

/// Create an account, then sign in with the same credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl Command for RegisterCommand {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture {
        let services = deps.get_state_ref::<Services>().clone();
        updater.update::<AuthState>(AuthState::start);

        Box::pin(async move {
            let request = RegisterRequest {
                email: self.email,
                password: self.password,
                full_name: self.full_name,
            };

            match services.auth.register(&request).await {
                Ok(profile) => {
                    info!("Registered {} ({})", profile.email, profile.id);
                    let result = services
                        .auth
                        .login(&request.email, &request.password)
                        .await;
                    finish_sign_in(&services, &updater, result, LOGIN_FALLBACK);
                }
                Err(e) => {
                    warn!("Registration failed: {e}");
                    let message = e.display_message(REGISTER_FALLBACK);
                    updater.update::<AuthState>(move |auth| auth.fail(message));
                }
            }
        })
    }
}
