//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or command results,
//! and the [`Command`] type naming the asynchronous units of work the dispatcher
//! runs against `zfs` and the report store.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! them in order; every [`Command`] eventually re-enters the handler as exactly
//! one result event.
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::{Action, Command};
//!
//! let actions = vec![
//!     Action::Dispatch(Command::LoadAll { generation: 1 }),
//!     Action::ExpireStatusAfter { seq: 3, seconds: 4.0 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

/// Asynchronous unit of work against an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List snapshots and datasets.
    LoadAll { generation: u64 },

    /// Create one snapshot, `dataset@name`.
    Create { identity: String },

    /// Destroy every listed snapshot, one outcome per entry.
    DestroyAll { identities: Vec<String> },

    /// Read the health report at `path`.
    LoadHealth { path: String, generation: u64 },
}

impl Command {
    /// Short name used in span and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LoadAll { .. } => "load_all",
            Self::Create { .. } => "create",
            Self::DestroyAll { .. } => "destroy_all",
            Self::LoadHealth { .. } => "load_health",
        }
    }
}

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hands a command to the dispatcher.
    Dispatch(Command),

    /// Arms a one-shot timer that clears status `seq` if it is still current.
    ExpireStatusAfter { seq: u64, seconds: f64 },

    /// Closes the plugin pane.
    Quit,
}
