//! Domain layer for the ZFSGuard plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`snapshot`]: Snapshot record model
//! - [`report`]: Health report model read from the monitor's JSON file
//!
//! # Examples
//!
//! ```
//! use zfsguard::domain::{Result, Snapshot, ValidationError};
//!
//! fn compose(dataset: &str, name: &str) -> Result<String> {
//!     if name.trim().is_empty() {
//!         return Err(ValidationError::EmptyName.into());
//!     }
//!     Ok(format!("{dataset}@{}", name.trim()))
//! }
//!
//! assert_eq!(compose("tank", " daily ").unwrap(), "tank@daily");
//! let snap = Snapshot::new("tank@daily", "0B", "96K", None);
//! assert_eq!(snap.short_name, "daily");
//! ```

pub mod error;
pub mod report;
pub mod snapshot;

pub use error::{Result, ValidationError, ZfsGuardError};
pub use report::{DiskReport, HealthReport, PoolReport};
pub use snapshot::{DestroyOutcome, Snapshot};
