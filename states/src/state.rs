use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

use flume::Sender;
use log::warn;

/// A piece of application state owned by a [`StateCtx`](crate::StateCtx).
///
/// States are stored by type, so every registered state must be a distinct type.
pub trait State: Any + Send {}

pub(crate) type RepaintHook = Arc<dyn Fn() + Send + Sync>;

/// A deferred mutation of one registered state.
pub(crate) struct Update {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) apply: Box<dyn FnOnce(&mut dyn Any) + Send>,
}

/// Send-able handle used by async work to change state.
///
/// Mutations are queued and applied on the owning thread during
/// [`StateCtx::sync`](crate::StateCtx::sync), in the order they were sent.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    repaint: Option<RepaintHook>,
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("pending", &self.send.len())
            .field("repaint", &self.repaint.is_some())
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>, repaint: Option<RepaintHook>) -> Self {
        Self { send, repaint }
    }

    /// Replace the whole state with `state`.
    pub fn set<T: State>(&self, state: T) {
        self.update::<T>(move |current| *current = state);
    }

    /// Mutate the state in place once it is synced.
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let apply = Box::new(move |any: &mut dyn Any| {
            if let Some(state) = any.downcast_mut::<T>() {
                f(state);
            }
        });

        let update = Update {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            apply,
        };

        if self.send.send(update).is_err() {
            warn!(
                "Updater: state context dropped, discarding update for {}",
                type_name::<T>()
            );
            return;
        }

        if let Some(repaint) = &self.repaint {
            repaint();
        }
    }
}
