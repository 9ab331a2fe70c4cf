//! Snapshot domain model.
//!
//! A [`Snapshot`] is one row of `zfs list -t snapshot` output: the full
//! `dataset@name` identity, the split dataset and short name, the space
//! columns as printed by `zfs`, and the creation time when it could be parsed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents a ZFS snapshot known to the plugin.
///
/// # Fields
///
/// - `name`: Full identity, `dataset@short_name`
/// - `dataset`: Everything before the first `@`
/// - `short_name`: Everything after the first `@`
/// - `used` / `refer`: Human-readable sizes exactly as `zfs` printed them
/// - `created`: Creation time, `None` when the provider's format was not recognized
/// - `selected`: Multi-select flag, owned by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub dataset: String,
    pub short_name: String,
    pub used: String,
    pub refer: String,
    pub created: Option<NaiveDateTime>,
    #[serde(default)]
    pub selected: bool,
}

impl Snapshot {
    /// Creates an unselected snapshot from its identity, splitting dataset and short name.
    ///
    /// Identities without `@` keep the whole string in both parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use zfsguard::domain::Snapshot;
    ///
    /// let snap = Snapshot::new("tank/home@daily", "1.2M", "40G", None);
    /// assert_eq!(snap.dataset, "tank/home");
    /// assert_eq!(snap.short_name, "daily");
    /// assert!(!snap.selected);
    /// ```
    #[must_use]
    pub fn new(name: &str, used: &str, refer: &str, created: Option<NaiveDateTime>) -> Self {
        let (dataset, short_name) = name.split_once('@').unwrap_or((name, name));
        Self {
            name: name.to_string(),
            dataset: dataset.to_string(),
            short_name: short_name.to_string(),
            used: used.to_string(),
            refer: refer.to_string(),
            created,
            selected: false,
        }
    }

    /// Creation time formatted for the list view, empty when unknown.
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Result of destroying one snapshot in a batch.
///
/// A batch yields one outcome per requested identity, in request order, with
/// duplicates preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyOutcome {
    pub identity: String,
    /// Provider error text, `None` on success.
    pub error: Option<String>,
}

impl DestroyOutcome {
    #[must_use]
    pub fn ok(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(identity: &str, error: &str) -> Self {
        Self {
            identity: identity.to_string(),
            error: Some(error.to_string()),
        }
    }
}
