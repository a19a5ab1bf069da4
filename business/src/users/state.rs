use roster_states::State;
use ustr::Ustr;

use crate::{User, UserListResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserActionKind {
    Create,
    Update,
    Delete,
    Get,
}

impl UserActionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Get => "load",
        }
    }
}

/// Outcome of the most recent single-user action.
///
/// `target` is the user id, or `None` for a create that has not returned yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserActionState {
    #[default]
    Idle,
    InFlight {
        kind: UserActionKind,
        target: Option<Ustr>,
    },
    Succeeded {
        kind: UserActionKind,
        target: Option<Ustr>,
    },
    Failed {
        kind: UserActionKind,
        target: Option<Ustr>,
        message: String,
    },
}

impl UserActionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn kind(&self) -> Option<UserActionKind> {
        match self {
            Self::Idle => None,
            Self::InFlight { kind, .. }
            | Self::Succeeded { kind, .. }
            | Self::Failed { kind, .. } => Some(*kind),
        }
    }

    /// The failure message when the last `kind` action failed.
    pub fn failure(&self, of: UserActionKind) -> Option<&str> {
        match self {
            Self::Failed { kind, message, .. } if *kind == of => Some(message),
            _ => None,
        }
    }
}

/// Client copy of the user collection.
///
/// Replaced wholesale by a list fetch and patched in place by single-user actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    users: Vec<User>,
    total: u64,
    loading: bool,
    error: Option<String>,
    action: UserActionState,
}

impl State for UsersState {}

impl UsersState {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn action(&self) -> &UserActionState {
        &self.action
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Forget the last action outcome, e.g. when a modal reopens.
    pub fn clear_action(&mut self) {
        if !self.action.is_in_flight() {
            self.action = UserActionState::Idle;
        }
    }

    pub fn start_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, page: UserListResponse) {
        self.users = page.users;
        self.total = page.total;
        self.loading = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn begin_action(&mut self, kind: UserActionKind, target: Option<Ustr>) {
        self.loading = true;
        self.error = None;
        self.action = UserActionState::InFlight { kind, target };
    }

    pub fn fail_action(
        &mut self,
        kind: UserActionKind,
        target: Option<Ustr>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        self.fail(message.clone());
        self.action = UserActionState::Failed {
            kind,
            target,
            message,
        };
    }

    fn succeed(&mut self, kind: UserActionKind, target: &str) {
        self.loading = false;
        self.action = UserActionState::Succeeded {
            kind,
            target: Some(Ustr::from(target)),
        };
    }

    pub fn user_created(&mut self, user: User) {
        self.succeed(UserActionKind::Create, &user.id);
        self.users.push(user);
        self.total += 1;
    }

    pub fn user_updated(&mut self, user: User) {
        self.succeed(UserActionKind::Update, &user.id);
        self.patch(user);
    }

    pub fn user_loaded(&mut self, user: User) {
        self.succeed(UserActionKind::Get, &user.id);
        self.patch(user);
    }

    pub fn user_deleted(&mut self, id: &str) {
        self.succeed(UserActionKind::Delete, id);
        self.users.retain(|u| u.id != id);
        self.total = self.total.saturating_sub(1);
    }

    /// Replace the record with the same id, or append it when it is not listed.
    fn patch(&mut self, user: User) {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_owned(),
            email: format!("{id}@x.com"),
            full_name: name.to_owned(),
            role: Role::User,
            is_active: true,
            is_verified: false,
            phone: None,
            department: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn loaded(users: Vec<User>, total: u64) -> UsersState {
        let mut state = UsersState::default();
        state.start_fetch();
        state.finish_fetch(UserListResponse {
            users,
            total,
            skip: 0,
            limit: 100,
        });
        state
    }

    #[test]
    fn fetch_replaces_collection() {
        let mut state = loaded(vec![user("1", "Ana")], 1);
        assert!(!state.is_loading());

        state.start_fetch();
        assert!(state.is_loading());
        state.finish_fetch(UserListResponse {
            users: vec![user("2", "Bob"), user("3", "Cy")],
            total: 40,
            skip: 0,
            limit: 100,
        });

        assert_eq!(state.users().len(), 2);
        assert_eq!(state.total(), 40);
        assert!(state.find("1").is_none());
    }

    #[test]
    fn create_appends_and_counts() {
        let mut state = loaded(vec![user("1", "Ana")], 1);
        state.begin_action(UserActionKind::Create, None);
        assert!(state.action().is_in_flight());

        state.user_created(user("2", "Bob"));
        assert_eq!(state.users().len(), 2);
        assert_eq!(state.total(), 2);
        assert_eq!(
            state.action(),
            &UserActionState::Succeeded {
                kind: UserActionKind::Create,
                target: Some(Ustr::from("2"))
            }
        );
    }

    #[test]
    fn update_and_load_patch_by_id() {
        let mut state = loaded(vec![user("1", "Ana"), user("2", "Bob")], 2);

        state.user_updated(user("2", "Robert"));
        assert_eq!(state.find("2").map(|u| u.full_name.as_str()), Some("Robert"));
        assert_eq!(state.users().len(), 2);

        state.user_loaded(user("9", "Zed"));
        assert_eq!(state.users().len(), 3);
        assert_eq!(state.total(), 2);
    }

    #[test]
    fn delete_removes_and_saturates() {
        let mut state = loaded(vec![user("1", "Ana"), user("2", "Bob")], 2);

        state.user_deleted("1");
        assert_eq!(state.total(), 1);
        assert!(state.find("1").is_none());

        state.user_deleted("7");
        assert_eq!(state.total(), 0, "off-page delete still counts");
        assert_eq!(state.users().len(), 1);

        let mut state = loaded(vec![user("1", "Ana")], 0);
        state.user_deleted("1");
        assert_eq!(state.total(), 0);
    }

    #[test]
    fn failed_action_keeps_collection() {
        let mut state = loaded(vec![user("1", "Ana")], 1);
        let target = Some(Ustr::from("1"));
        state.begin_action(UserActionKind::Delete, target);
        state.fail_action(UserActionKind::Delete, target, "User not found");

        assert_eq!(state.users().len(), 1);
        assert_eq!(state.error(), Some("User not found"));
        assert_eq!(
            state.action().failure(UserActionKind::Delete),
            Some("User not found")
        );
        assert_eq!(state.action().failure(UserActionKind::Create), None);
        assert!(!state.is_loading());

        state.clear_error();
        assert_eq!(state.error(), None);

        state.clear_action();
        assert_eq!(state.action(), &UserActionState::Idle);
    }

    #[test]
    fn clear_action_keeps_in_flight() {
        let mut state = UsersState::default();
        state.begin_action(UserActionKind::Create, None);
        state.clear_action();
        assert!(state.action().is_in_flight());
    }
}
