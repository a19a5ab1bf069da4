use std::sync::Arc;

use log::{info, warn};
use roster_states::{State, StateCtx};

use crate::{
    AuthApi, AuthState, BusinessConfig, FileStore, HttpAuthApi, HttpUsersApi, KeyValueStore,
    LoginForm, MemoryStore, Route, UserListViewState, UsersApi, UsersState,
};

/// Collaborators the commands talk to, registered as a state so tests can swap in doubles.
#[derive(Debug, Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthApi>,
    pub users: Arc<dyn UsersApi>,
    pub store: Arc<dyn KeyValueStore>,
}

impl State for Services {}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        users: Arc<dyn UsersApi>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self { auth, users, store }
    }

    /// HTTP adapters for `config`, backed by the given store.
    pub fn http(config: &BusinessConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            auth: Arc::new(HttpAuthApi::new(config.auth_api_url.clone())),
            users: Arc::new(HttpUsersApi::new(
                config.users_api_url.clone(),
                store.clone(),
            )),
            store,
        }
    }

    /// HTTP adapters plus the on-disk store from `config`.
    ///
    /// Falls back to an in-memory store when the file cannot be opened, so the console still
    /// starts (the session just does not survive a restart).
    pub fn from_config(config: &BusinessConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => match FileStore::open(path) {
                Ok(store) => {
                    info!("Session store at {}", store.path().display());
                    Arc::new(store)
                }
                Err(e) => {
                    warn!("Falling back to in-memory session store: {e}");
                    Arc::new(MemoryStore::new())
                }
            },
            None => Arc::new(MemoryStore::new()),
        };

        Self::http(config, store)
    }

    /// Register every business state in `ctx`, restoring the session from the store.
    pub fn install(self, ctx: &mut StateCtx, config: BusinessConfig) {
        let auth = AuthState::restore(self.store.as_ref());
        ctx.add_state(Route::for_session(&auth));
        ctx.add_state(auth);
        ctx.add_state(UsersState::default());
        ctx.add_state(UserListViewState::default());
        ctx.add_state(LoginForm::default());
        ctx.add_state(config);
        ctx.add_state(self);
    }
}

/// A fully wired context for `config`.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();
    Services::from_config(&config).install(&mut ctx, config);
    ctx
}
