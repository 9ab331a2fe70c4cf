//! Path manipulation utilities for Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`, and
//! the plugin's private data folder under `/data`. Once the plugin has been
//! granted full disk access it re-points `/host` at the host root, so an
//! absolute host path such as `/var/lib/zfsguard/health-report.json` is read
//! as `/host/var/lib/zfsguard/health-report.json`.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_MOUNT: &str = "/host";

/// Returns the plugin's private data directory (`/data` in the sandbox).
///
/// Trace output is written here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Maps an absolute host path to its sandbox location under `/host`.
///
/// Relative paths are taken relative to the host root. Paths already under
/// `/host` are returned unchanged.
///
/// # Examples
///
/// ```
/// use zfsguard::infrastructure::host_path;
///
/// assert_eq!(
///     host_path("/var/lib/zfsguard/health-report.json").to_str(),
///     Some("/host/var/lib/zfsguard/health-report.json")
/// );
/// assert_eq!(host_path("/host/tmp/r.json").to_str(), Some("/host/tmp/r.json"));
/// assert_eq!(host_path("tmp/r.json").to_str(), Some("/host/tmp/r.json"));
/// ```
#[must_use]
pub fn host_path(path: &str) -> PathBuf {
    if path == HOST_MOUNT || path.starts_with("/host/") {
        return PathBuf::from(path);
    }
    PathBuf::from(HOST_MOUNT).join(path.trim_start_matches('/'))
}

/// Removes the `/host` prefix from sandbox paths for display purposes.
///
/// # Examples
///
/// ```
/// use zfsguard::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/var/lib/zfsguard"), "/var/lib/zfsguard");
/// assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix(HOST_MOUNT)
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or(path)
        .to_string()
}
