mod api;
mod commands;
mod state;
mod view;

pub use api::{HttpUsersApi, UsersApi};
pub use commands::{
    CREATE_FALLBACK, CreateUserCommand, DELETE_FALLBACK, DeleteUserCommand, FETCH_FALLBACK,
    FetchUserCommand, FetchUsersCommand, GET_FALLBACK, UPDATE_FALLBACK, UpdateUserCommand,
};
pub use state::{UserActionKind, UserActionState, UsersState};
pub use view::{
    CreateUserForm, DeleteConfirm, EditUserForm, MIN_PASSWORD_LEN, StatusFilter, UserFilter,
    UserListViewState, UserModal, UserStats, validate_password,
};
