mod api;
mod commands;
mod state;

pub use api::{AuthApi, HttpAuthApi};
pub use commands::{
    LOGIN_FALLBACK, LoginCommand, LogoutCommand, REFRESH_FALLBACK, REGISTER_FALLBACK,
    RefreshTokenCommand, RegisterCommand,
};
pub use state::{AuthState, LoginForm, LoginMode};
