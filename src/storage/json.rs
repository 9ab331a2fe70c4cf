//! JSON file-based report store.
//!
//! Reads the report the monitor writes after each check cycle. The monitor
//! replaces the file atomically (write to a temporary file, then rename), so a
//! single read always sees a complete document.
//!
//! # File Format
//!
//! ```json
//! {
//!   "timestamp": "2025-02-27T10:30:00+01:00",
//!   "pools": [
//!     { "name": "tank", "state": "ONLINE", "errors": "No known data errors", "raw": "..." }
//!   ],
//!   "disks": [
//!     { "device": "/dev/sda", "healthy": true, "summary": "PASSED", "raw": "..." }
//!   ],
//!   "pool_error": "optional",
//!   "disk_error": "optional"
//! }
//! ```

use crate::domain::error::{Result, ZfsGuardError};
use crate::domain::HealthReport;
use crate::infrastructure::strip_host_prefix;
use crate::storage::backend::ReportStore;

/// Default location of the report on the host.
pub const DEFAULT_REPORT_PATH: &str = "/var/lib/zfsguard/health-report.json";

/// Report store reading JSON from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportStore;

impl JsonReportStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a report document.
    ///
    /// # Errors
    ///
    /// Returns [`ZfsGuardError::ReportUnavailable`] if the content is not a valid report.
    pub fn parse(contents: &str) -> Result<HealthReport> {
        serde_json::from_str(contents)
            .map_err(|e| ZfsGuardError::ReportUnavailable(format!("failed to parse health report: {e}")))
    }
}

impl ReportStore for JsonReportStore {
    fn read_report(&self, path: &str) -> Result<HealthReport> {
        let _span = tracing::debug_span!("read_report", path = %path).entered();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            tracing::debug!(error = %e, "report read failed");
            ZfsGuardError::ReportUnavailable(format!(
                "failed to read health report {}: {e}",
                strip_host_prefix(path)
            ))
        })?;

        let report = Self::parse(&contents)?;
        tracing::debug!(
            pools = report.pools.len(),
            disks = report.disks.len(),
            "report loaded"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_report_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"timestamp":"2025-02-27T10:30:00Z","pools":null,"disks":[{{"device":"/dev/sda","healthy":true,"summary":"PASSED","raw":""}}],"pool_error":"zpool: command not found"}}"#
        )
        .unwrap();

        let report = JsonReportStore::new()
            .read_report(file.path().to_str().unwrap())
            .unwrap();
        assert!(report.pools.is_empty());
        assert_eq!(report.disks[0].device, "/dev/sda");
        assert_eq!(report.pool_error.as_deref(), Some("zpool: command not found"));
    }

    #[test]
    fn missing_file_is_report_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = JsonReportStore::new()
            .read_report(path.to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, ZfsGuardError::ReportUnavailable(_)));
        assert!(err.to_string().contains("failed to read health report"));
    }

    #[test]
    fn malformed_json_is_report_unavailable() {
        let err = JsonReportStore::parse("{ not json").unwrap_err();
        assert!(matches!(err, ZfsGuardError::ReportUnavailable(_)));
    }
}
