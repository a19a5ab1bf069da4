//! Identifiers for spawned command tasks.
//!
//! Every dispatch gets a [`TaskId`] combining the command's `TypeId` with a generation
//! counter, so log lines from overlapping dispatches of the same command can be told apart.

use std::any::TypeId;

/// Unique identifier for a spawned command task.
///
/// # Example
///
/// ```
/// use std::any::TypeId;
/// use roster_states::TaskId;
///
/// let first = TaskId::new(TypeId::of::<String>(), 1);
/// let second = TaskId::new(TypeId::of::<String>(), 2);
///
/// assert_eq!(first.type_id(), second.type_id());
/// assert_ne!(first, second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    /// Creates a new `TaskId` with the given type and generation.
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    /// Returns the `TypeId` of the command that spawned the task.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations were dispatched later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
