//! The user administration page: metrics, filters, the table and its modals.
//!
//! Widgets render from clones of [`UsersState`](roster_business::UsersState) and
//! [`UserListViewState`](roster_business::UserListViewState) and report what the user did as
//! [`UserIntent`]s. The panel writes the edited view state back before applying them, so an
//! update synced during a dispatch is never overwritten by a stale clone.

mod filters;
mod metrics;
mod modals;
mod panel;
mod table;

use roster_business::User;

pub use panel::users_panel;

#[derive(Debug, Clone, PartialEq, Eq)]
enum UserIntent {
    Refresh,
    DismissError,
    OpenCreate,
    OpenEdit(User),
    CloseModal,
    SubmitCreate,
    SubmitEdit,
    ArmDelete(String),
    CancelDelete,
    ConfirmDelete(String),
}
