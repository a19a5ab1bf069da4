//! Root page state machine.

use roster_states::State;

use crate::AuthState;

/// Which page the shell renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// Shown whenever there is no access token.
    #[default]
    Login,
    Users,
}

impl State for Route {}

impl Route {
    pub fn for_session(auth: &AuthState) -> Self {
        if auth.is_authenticated() {
            Self::Users
        } else {
            Self::Login
        }
    }

    /// Move to the page the session calls for. Returns true when the route changed.
    pub fn follow(&mut self, auth: &AuthState) -> bool {
        let next = Self::for_session(auth);
        if *self == next {
            return false;
        }

        log::info!("Route {self:?} -> {next:?}");
        *self = next;
        true
    }
}
