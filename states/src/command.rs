use std::future::Future;
use std::pin::Pin;

use crate::{State, StateCtx, Updater};

/// The async half of a command, spawned onto the Tokio runtime.
pub type CommandFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Read-only view of the registered states, handed to a command when it is dispatched.
#[derive(Debug, Clone, Copy)]
pub struct Dep<'a> {
    ctx: &'a StateCtx,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(ctx: &'a StateCtx) -> Self {
        Self { ctx }
    }

    /// Borrow a registered state.
    ///
    /// # Panics
    /// Panics if `T` was never registered with [`StateCtx::add_state`].
    pub fn get_state_ref<T: State>(&self) -> &'a T {
        self.ctx.state::<T>()
    }
}

/// Manual-only side effect (network IO), dispatched explicitly by the UI.
///
/// `run` executes synchronously at dispatch time so it can snapshot whatever it needs from
/// `deps` and queue immediate updates (a loading flag for example). The returned future runs
/// on the Tokio runtime and reports back exclusively through `updater`.
pub trait Command: Send + 'static {
    fn run(self, deps: Dep<'_>, updater: Updater) -> CommandFuture;
}
