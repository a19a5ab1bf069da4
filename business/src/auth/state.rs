use log::warn;
use roster_states::State;

use crate::storage::keys;
use crate::{AuthResponse, AuthUser, FormError, KeyValueStore};

/// The current session.
///
/// Only mutated through its own methods. Whether the session is authenticated is derived from
/// the access token, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<AuthUser>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl State for AuthState {}

impl AuthState {
    /// Rebuild the session from the persisted keys. An unparsable user blob is dropped.
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        let user = store
            .get(keys::USER)
            .and_then(|raw| match serde_json::from_str::<AuthUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Ignoring unreadable cached user: {e}");
                    None
                }
            });

        Self {
            user,
            access_token: store.get(keys::ACCESS_TOKEN).filter(|t| !t.is_empty()),
            refresh_token: store.get(keys::REFRESH_TOKEN).filter(|t| !t.is_empty()),
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn sign_in(&mut self, response: AuthResponse) {
        self.user = Some(response.user);
        self.access_token = Some(response.access_token);
        self.refresh_token = Some(response.refresh_token);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    Register,
}

/// Values typed into the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl State for LoginForm {}

impl LoginForm {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::Register,
            LoginMode::Register => LoginMode::SignIn,
        };
    }

    pub fn login_command(&self) -> Result<super::LoginCommand, FormError> {
        let email = required("Email", &self.email)?;
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }

        Ok(super::LoginCommand {
            email,
            password: self.password.clone(),
        })
    }

    pub fn register_command(&self) -> Result<super::RegisterCommand, FormError> {
        let full_name = required("Full name", &self.full_name)?;
        let email = required("Email", &self.email)?;
        crate::users::validate_password(&self.password)?;

        Ok(super::RegisterCommand {
            email,
            password: self.password.clone(),
            full_name,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value.to_owned())
    }
}
