use std::sync::Arc;

use roster_business::{BusinessConfig, MemoryStore, Services, build_state_ctx};
use roster_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default())
    }
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            ctx: build_state_ctx(config),
        }
    }

    /// Both services at `base_url`, with a session store that lives in memory only.
    pub fn test(base_url: String) -> Self {
        Self::test_with_store(base_url, Arc::new(MemoryStore::new()))
    }

    pub fn test_with_store(base_url: String, store: Arc<MemoryStore>) -> Self {
        let config = BusinessConfig::new(base_url.clone(), base_url);
        let mut ctx = StateCtx::new();
        Services::http(&config, store).install(&mut ctx, config);

        Self { ctx }
    }
}
