//! Everything in the console that is not drawing.
//!
//! - Adapters for the auth and user services ([`AuthApi`], [`UsersApi`]) and the session
//!   [`KeyValueStore`].
//! - State containers ([`AuthState`], [`UsersState`]) with the commands that update them.
//! - Pure view logic for the list page and the root [`Route`].

mod auth;
mod config;
mod error;
pub mod http;
mod model;
mod route;
mod services;
pub mod storage;
mod users;

#[cfg(test)]
mod test_utils;

pub use auth::{
    AuthApi, AuthState, HttpAuthApi, LOGIN_FALLBACK, LoginCommand, LoginForm, LoginMode,
    LogoutCommand, REFRESH_FALLBACK, REGISTER_FALLBACK, RefreshTokenCommand, RegisterCommand,
};
pub use config::{BusinessConfig, ConfigError};
pub use error::{ApiError, FormError, extract_detail};
pub use model::{
    AuthResponse, AuthUser, CreateUserRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest, RegisteredUser, Role, UpdateUserRequest, User, UserListResponse,
    display_timestamp,
};
pub use route::Route;
pub use services::{Services, build_state_ctx};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use users::{
    CREATE_FALLBACK, CreateUserCommand, CreateUserForm, DELETE_FALLBACK, DeleteConfirm,
    DeleteUserCommand, EditUserForm, FETCH_FALLBACK, FetchUserCommand, FetchUsersCommand,
    GET_FALLBACK, HttpUsersApi, MIN_PASSWORD_LEN, StatusFilter, UPDATE_FALLBACK,
    UpdateUserCommand, UserActionKind, UserActionState, UserFilter, UserListViewState,
    UserModal, UserStats, UsersApi, UsersState, validate_password,
};
