use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio::task::JoinHandle;

use crate::state::{RepaintHook, Update};
use crate::{Command, Dep, Error, State, TaskId, Updater};

/// Owner of every registered state plus the queue of pending mutations.
///
/// The context lives on the UI thread. Commands spawned through [`StateCtx::dispatch`] only
/// hold an [`Updater`]; their changes become visible after the next [`StateCtx::sync`].
pub struct StateCtx {
    storage: BTreeMap<TypeId, (&'static str, Box<dyn Any + Send>)>,

    send: Sender<Update>,
    recv: Receiver<Update>,

    repaint: Option<RepaintHook>,

    tasks: Vec<(TaskId, JoinHandle<()>)>,
    generation: u64,
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field(
                "states",
                &self.storage.values().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .field("pending_updates", &self.recv.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();

        Self {
            storage: BTreeMap::new(),
            send,
            recv,
            repaint: None,
            tasks: Vec::new(),
            generation: 0,
        }
    }

    /// Register `state`, replacing any previous value of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        self.storage
            .insert(TypeId::of::<T>(), (type_name::<T>(), Box::new(state)));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|(_, boxed)| boxed.downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "StateCtx::try_state"))
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    /// Panics if `T` was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|(_, boxed)| boxed.downcast_mut::<T>())
            .unwrap_or_else(|| panic!("State {} is not registered", type_name::<T>()))
    }

    /// Mutate a state right away, on the owning thread.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone(), self.repaint.clone())
    }

    /// Called after every update sent by a spawned command, typically
    /// `egui::Context::request_repaint`.
    pub fn set_repaint_hook(&mut self, hook: impl Fn() + Send + Sync + 'static) {
        self.repaint = Some(Arc::new(hook));
    }

    /// Run `command`: its synchronous part now, its future on the current Tokio runtime.
    ///
    /// Updates queued by the synchronous part are applied before this returns, so a loading
    /// flag set there is visible in the same frame.
    pub fn dispatch<C: Command>(&mut self, command: C) -> TaskId {
        self.generation += 1;
        let task_id = TaskId::new(TypeId::of::<C>(), self.generation);

        let future = command.run(Dep::new(self), self.updater());

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!(
                    "StateCtx: spawned {} (generation {})",
                    type_name::<C>(),
                    task_id.generation()
                );
                self.tasks.push((task_id, handle.spawn(future)));
            }
            Err(e) => {
                error!(
                    "StateCtx: no Tokio runtime available, dropping {}: {e}",
                    type_name::<C>()
                );
            }
        }

        self.sync();
        task_id
    }

    /// Apply every queued update in arrival order. Returns how many were applied.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;

        while let Ok(update) = self.recv.try_recv() {
            match self.storage.get_mut(&update.id) {
                Some((_, boxed)) => {
                    (update.apply)(boxed.as_mut());
                    applied += 1;
                }
                None => warn!("StateCtx: update for unregistered state {}", update.name),
            }
        }

        self.tasks.retain(|(_, handle)| !handle.is_finished());
        applied
    }

    /// Number of dispatched commands whose future has not completed yet.
    pub fn in_flight(&self) -> usize {
        self.tasks
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    /// Wait for every dispatched command to finish, then [`sync`](Self::sync).
    pub async fn settle(&mut self) {
        let tasks = std::mem::take(&mut self.tasks);

        for (task_id, handle) in tasks {
            if let Err(e) = handle.await {
                error!(
                    "StateCtx: task generation {} failed: {e}",
                    task_id.generation()
                );
            }
        }

        self.sync();
    }
}
