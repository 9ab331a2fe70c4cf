//! Screen state for the application.
//!
//! Exactly one [`Screen`] is active at a time. Each screen has its own key
//! handling rules in [`crate::app::handler`]; overlays such as the help panel
//! and the filter bar are flags on the state, not screens.
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::Screen;
//!
//! let screen = Screen::default();
//! assert_eq!(screen, Screen::List);
//! assert!(Screen::ConfirmDeleteAll.is_confirmation());
//! ```

/// The active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Snapshot list, the initial screen.
    #[default]
    List,

    /// New snapshot form: dataset picker plus name input.
    CreateForm,

    /// Confirmation for destroying the selected snapshots.
    ConfirmDelete,

    /// Confirmation for destroying every loaded snapshot.
    ConfirmDeleteAll,

    /// Scrollable view of the monitor's health report.
    HealthReport,
}

impl Screen {
    /// `true` for the two delete confirmation dialogs.
    #[must_use]
    pub const fn is_confirmation(self) -> bool {
        matches!(self, Self::ConfirmDelete | Self::ConfirmDeleteAll)
    }
}
