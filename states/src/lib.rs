//! Type-keyed state runtime shared by the business and UI crates.
//!
//! - [`StateCtx`] owns every [`State`] and is only touched from the UI thread.
//! - [`Command`]s perform side effects on Tokio tasks and report back through an [`Updater`].
//! - [`StateCtx::sync`] applies queued updates in arrival order, once per frame.

mod command;
mod ctx;
mod error;
mod state;
mod task;

pub use command::{Command, CommandFuture, Dep};
pub use ctx::StateCtx;
pub use error::Error;
pub use state::{State, Updater};
pub use task::TaskId;
