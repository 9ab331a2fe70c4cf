//! Health report model.
//!
//! The report is produced by the external monitor service after each check
//! cycle and written as JSON. The plugin only ever reads it; a loaded report is
//! replaced wholesale on every successful reload.
//!
//! Arrays written by the monitor may be `null` when a check produced no rows, so
//! both `pools` and `disks` accept `null` as an empty list.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Pool error text the monitor emits for a clean pool.
pub const NO_KNOWN_DATA_ERRORS: &str = "No known data errors";

/// Pool state considered nominal.
pub const POOL_ONLINE: &str = "ONLINE";

/// One timestamped health snapshot.
///
/// # Examples
///
/// ```
/// use zfsguard::domain::HealthReport;
///
/// let json = r#"{
///     "timestamp": "2025-02-27T10:30:00+01:00",
///     "pools": [{"name": "tank", "state": "ONLINE", "errors": "No known data errors", "raw": ""}],
///     "disks": null
/// }"#;
/// let report: HealthReport = serde_json::from_str(json).unwrap();
/// assert_eq!(report.pools.len(), 1);
/// assert!(report.disks.is_empty());
/// assert!(report.pool_error.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub pools: Vec<PoolReport>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub disks: Vec<DiskReport>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable_text")]
    pub pool_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable_text")]
    pub disk_error: Option<String>,
}

/// Status of a single storage pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    pub name: String,
    pub state: String,
    /// Error summary line from `zpool status`, empty when not captured.
    #[serde(default)]
    pub errors: String,
    /// Verbatim `zpool status` output.
    #[serde(default)]
    pub raw: String,
}

impl PoolReport {
    /// `true` unless the pool state is something other than `ONLINE`.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.state == POOL_ONLINE
    }

    /// Error summary with the clean-pool text substituted for a blank value.
    #[must_use]
    pub fn error_summary(&self) -> &str {
        if self.errors.is_empty() {
            NO_KNOWN_DATA_ERRORS
        } else {
            &self.errors
        }
    }

    /// `true` when the pool reports data errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_summary() != NO_KNOWN_DATA_ERRORS
    }
}

/// SMART status of a single disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskReport {
    pub device: String,
    pub healthy: bool,
    #[serde(default)]
    pub summary: String,
    /// Verbatim `smartctl -H` output.
    #[serde(default)]
    pub raw: String,
}

fn nullable_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// Empty strings are treated as absent so `Some("")` never reaches the view.
fn nullable_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_monitor_output_with_errors() {
        let json = r#"{
          "timestamp": "2025-02-27T10:30:00.123456789Z",
          "pools": [
            {"name": "tank", "state": "DEGRADED", "errors": "2 data errors", "raw": "  pool: tank\n state: DEGRADED\n"}
          ],
          "disks": [
            {"device": "/dev/sda", "healthy": true, "summary": "PASSED", "raw": ""},
            {"device": "/dev/sdb", "healthy": false, "summary": "FAILED", "raw": "SMART overall-health: FAILED"}
          ],
          "disk_error": ""
        }"#;

        let report: HealthReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.pools[0].name, "tank");
        assert!(!report.pools[0].is_online());
        assert!(report.pools[0].has_errors());
        assert_eq!(report.disks.len(), 2);
        assert!(!report.disks[1].healthy);
        assert!(report.disk_error.is_none());
    }

    #[test]
    fn blank_pool_errors_read_as_clean() {
        let pool = PoolReport {
            name: "tank".into(),
            state: "ONLINE".into(),
            errors: String::new(),
            raw: String::new(),
        };
        assert_eq!(pool.error_summary(), NO_KNOWN_DATA_ERRORS);
        assert!(!pool.has_errors());
    }

    #[test]
    fn missing_timestamp_is_rejected() {
        let err = serde_json::from_str::<HealthReport>(r#"{"pools": []}"#);
        assert!(err.is_err());
    }
}
