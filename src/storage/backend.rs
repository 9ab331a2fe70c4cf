//! Report store abstraction.
//!
//! This module defines the [`ReportStore`] trait, the read side of the health
//! report contract. The monitor service owns writing; the plugin only reads.
//! Keeping the read behind a trait lets the worker be exercised against an
//! in-memory store in tests.

use crate::domain::error::Result;
use crate::domain::HealthReport;

/// Read access to the health report written by the monitor.
///
/// # Implementations
///
/// - [`JsonReportStore`](crate::storage::JsonReportStore): reads the JSON file from disk (default)
///
/// # Examples
///
/// ```no_run
/// use zfsguard::storage::{JsonReportStore, ReportStore};
///
/// let store = JsonReportStore::new();
/// let report = store.read_report("/host/var/lib/zfsguard/health-report.json")?;
/// println!("{} pools", report.pools.len());
/// # Ok::<(), zfsguard::ZfsGuardError>(())
/// ```
pub trait ReportStore: Send {
    /// Reads and parses the report at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ZfsGuardError::ReportUnavailable`](crate::domain::ZfsGuardError::ReportUnavailable)
    /// when the file is missing, unreadable, or not a valid report.
    fn read_report(&self, path: &str) -> Result<HealthReport>;
}
