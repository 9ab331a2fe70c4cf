//! Error types for the ZFSGuard plugin.
//!
//! This module defines the centralized error type [`ZfsGuardError`] and a type alias
//! [`Result`] used throughout the plugin. Validation failures that block a command
//! from being issued live in their own [`ValidationError`] enum so the state machine
//! can surface them inline without treating them as provider failures.

use thiserror::Error;

/// Reasons a snapshot creation request is rejected before any command runs.
///
/// Both variants are recoverable by editing the create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The trimmed snapshot name is blank.
    #[error("Snapshot name cannot be empty")]
    EmptyName,

    /// No dataset could be resolved for the new snapshot.
    #[error("No dataset selected")]
    NoContainerSelected,
}

/// The main error type for ZFSGuard operations.
///
/// Provider and report failures never terminate the plugin; they are converted
/// into status messages or inline banners where the corresponding result event is
/// consumed.
///
/// # Examples
///
/// ```
/// use zfsguard::domain::{ValidationError, ZfsGuardError};
///
/// let err = ZfsGuardError::from(ValidationError::EmptyName);
/// assert_eq!(err.to_string(), "Snapshot name cannot be empty");
/// ```
#[derive(Debug, Error)]
pub enum ZfsGuardError {
    /// User input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The `zfs` command line reported a failure.
    ///
    /// The string carries the command's stderr (or exit status when stderr is empty).
    #[error("{0}")]
    Provider(String),

    /// A provider failure recognized as missing privileges.
    #[error("permission denied; destroying snapshots requires elevated privileges (run with sudo or configure NOPASSWD)")]
    PermissionDenied,

    /// The health report could not be read or parsed.
    #[error("Health report unavailable: {0}")]
    ReportUnavailable(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

impl ZfsGuardError {
    /// Marker searched (case-insensitively) in provider messages to detect privilege failures.
    pub const PERMISSION_MARKER: &'static str = "permission denied";

    /// Classifies a raw provider message, collapsing privilege failures into
    /// [`ZfsGuardError::PermissionDenied`].
    ///
    /// ```
    /// use zfsguard::domain::ZfsGuardError;
    ///
    /// let err = ZfsGuardError::from_provider_message("cannot destroy: Permission Denied");
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn from_provider_message(message: &str) -> Self {
        if message.to_lowercase().contains(Self::PERMISSION_MARKER) {
            Self::PermissionDenied
        } else {
            Self::Provider(message.to_string())
        }
    }

    /// Returns `true` for privilege-related failures.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied)
    }
}

/// A specialized `Result` type for ZFSGuard operations.
pub type Result<T> = std::result::Result<T, ZfsGuardError>;
