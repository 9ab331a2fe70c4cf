//! ZFSGuard: a Zellij plugin for managing ZFS snapshots and reviewing pool health.
//!
//! ZFSGuard is a terminal multiplexer plugin that provides:
//! - A scrollable, filterable table of every snapshot on the host
//! - Multi-selection with bulk destroy behind a confirmation dialog
//! - Snapshot creation with a dataset picker and a timestamped default name
//! - A health view of the pool and SMART report written by an external monitor

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling (pure reducer)                    │
//! │  - Record store, filter, selection                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Provider      │   │ Worker Layer  │
//! │ (ui/)         │   │ (provider/)   │   │ (worker/)     │
//! │ - Rendering   │   │ - zfs argv    │   │ - Report read │
//! │ - Theming     │   │ - Dispatcher  │   │ - IPC bridge  │
//! │ - Components  │   │ - Parsers     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage & Infrastructure                   │
//! │  - Snapshot / report models, errors (domain/)       │
//! │  - Report file access (storage/)                    │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zfsguard.wasm" {
//!         report_path "/var/lib/zfsguard/health-report.json"
//!         zfs_command "sudo -n zfs"
//!         snapshot_prefix "manual"
//!         theme "zfsguard-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::Key;
//! use zfsguard::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (changed, actions) = handle_event(&mut state, &Event::Key(Key::Char('?')))?;
//! assert!(changed && actions.is_empty());
//! assert!(state.show_help);
//! # Ok::<(), zfsguard::ZfsGuardError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod provider;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Command, Event};
pub use domain::{Result, Snapshot, ZfsGuardError};
pub use provider::{Dispatcher, ZfsCli};
pub use ui::Theme;

use std::collections::BTreeMap;
use storage::DEFAULT_REPORT_PATH;

/// Plugin configuration parsed from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host path of the monitor's JSON health report.
    pub report_path: String,

    /// Program prefix for `zfs` invocations, split on whitespace
    /// (for example `sudo -n zfs`). Default: `zfs`
    pub zfs_command: String,

    /// Prefix for generated snapshot names (`<prefix>_<timestamp>`).
    pub snapshot_prefix: Option<String>,

    /// Built-in theme name: `zfsguard-dark` or `zfsguard-light`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_path: DEFAULT_REPORT_PATH.to_string(),
            zfs_command: "zfs".to_string(),
            snapshot_prefix: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads typed values out of Zellij's configuration map.
    ///
    /// Blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zfsguard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("zfs_command".to_string(), "sudo -n zfs".to_string());
    /// map.insert("snapshot_prefix".to_string(), " ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.zfs_command, "sudo -n zfs");
    /// assert_eq!(config.snapshot_prefix, None);
    /// assert_eq!(config.report_path, "/var/lib/zfsguard/health-report.json");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            report_path: get("report_path").unwrap_or(defaults.report_path),
            zfs_command: get("zfs_command").unwrap_or(defaults.zfs_command),
            snapshot_prefix: get("snapshot_prefix"),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// The `zfs` argv builder for this configuration.
    #[must_use]
    pub fn zfs_cli(&self) -> ZfsCli {
        ZfsCli::new(&self.zfs_command)
    }
}

/// Builds the initial state for `config`.
///
/// The theme comes from `theme_file`, then `theme`, then the built-in
/// default; a theme that fails to load falls back to the default with a
/// warning rather than failing plugin start.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(report_path = %config.report_path, "initializing zfsguard plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config
                .theme_name
                .as_ref()
                .map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(theme);
    state.report_path.clone_from(&config.report_path);
    state.snapshot_prefix.clone_from(&config.snapshot_prefix);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn initialize_applies_report_path_and_prefix() {
        let config = Config {
            report_path: "/tmp/report.json".to_string(),
            snapshot_prefix: Some("manual".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.report_path, "/tmp/report.json");
        assert_eq!(state.snapshot_prefix.as_deref(), Some("manual"));
        assert!(state.loading);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, Theme::default().name);
    }

    #[test]
    fn theme_file_wins_over_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let dark = include_str!("../themes/zfsguard-dark.toml").replace(
            "name = \"zfsguard-dark\"",
            "name = \"custom\"",
        );
        std::fs::write(&path, dark).unwrap();

        let config = Config {
            theme_name: Some("zfsguard-light".to_string()),
            theme_file: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "custom");
    }
}
