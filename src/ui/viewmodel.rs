//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering: names are already truncated, the
//! visible window is already cut, and every piece of styled text carries a
//! [`Role`] rather than a color.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use zfsguard::domain::Snapshot;
//! use zfsguard::ui::viewmodel::DisplayItem;
//!
//! let snap = Snapshot::new("tank/home@zfsguard_2025-02-27_10-30-00", "0B", "96K", None);
//! let item = DisplayItem::from_snapshot(&snap, 20, true);
//! assert_eq!(item.name, "tank/home@zfsguar...");
//! assert_eq!(item.dataset_part, "tank/home");
//! assert!(item.is_cursor);
//! ```

use super::helpers::truncate;
use super::theme::Role;
use crate::domain::Snapshot;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    /// Screen-specific content.
    pub body: Body,
    pub status: Option<StatusLine>,
    pub legend: Legend,
    /// Persistent load error banner, rendered last.
    pub error: Option<String>,
}

/// Screen-specific part of the view model.
#[derive(Debug, Clone)]
pub enum Body {
    List(ListPanel),
    Create(CreateForm),
    Confirm(ConfirmDialog),
    Health(HealthPanel),
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// The snapshot table and its surroundings.
#[derive(Debug, Clone)]
pub struct ListPanel {
    pub filter_bar: Option<FilterBar>,
    /// Records in the store.
    pub total: usize,
    /// Selected records in the store, visible or not.
    pub selected: usize,
    pub name_width: usize,
    /// Rows inside the current window.
    pub display_items: Vec<DisplayItem>,
    pub scroll: Option<ScrollInfo>,
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single snapshot row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Identity, truncated to the name column.
    pub name: String,
    /// Part of `name` before the first `@`.
    pub dataset_part: String,
    /// Part of `name` from the first `@` on, empty if truncation removed it.
    pub snapshot_part: String,
    pub used: String,
    pub refer: String,
    pub created: String,
    pub is_cursor: bool,
    pub is_selected: bool,
}

impl DisplayItem {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, name_width: usize, is_cursor: bool) -> Self {
        let name = truncate(&snapshot.name, name_width);
        let (dataset_part, snapshot_part) = match name.find('@') {
            Some(at) => (name[..at].to_string(), name[at..].to_string()),
            None => (name.clone(), String::new()),
        };
        Self {
            name,
            dataset_part,
            snapshot_part,
            used: snapshot.used.clone(),
            refer: snapshot.refer.clone(),
            created: snapshot.created_label(),
            is_cursor,
            is_selected: snapshot.selected,
        }
    }
}

/// Filter bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    pub query: String,
    /// The bar has keyboard focus.
    pub editing: bool,
    pub matched: usize,
    pub total: usize,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Position of the visible window within a longer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollInfo {
    /// 1-based index of the first visible entry.
    pub first: usize,
    /// 1-based index of the last visible entry.
    pub last: usize,
    pub total: usize,
    pub percent: usize,
    /// Entries are report lines rather than records.
    pub lines: bool,
}

impl ScrollInfo {
    /// Describes the window `[start, end)` of `total` entries, or `None` when
    /// everything fits in `height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zfsguard::ui::viewmodel::ScrollInfo;
    ///
    /// assert!(ScrollInfo::for_window(0, 5, 5, 18, false).is_none());
    /// let info = ScrollInfo::for_window(22, 40, 40, 18, false).unwrap();
    /// assert_eq!((info.first, info.last, info.percent), (23, 40, 100));
    /// ```
    #[must_use]
    pub const fn for_window(
        start: usize,
        end: usize,
        total: usize,
        height: usize,
        lines: bool,
    ) -> Option<Self> {
        if total <= height {
            return None;
        }
        let range = total - height;
        let percent = (start * 200 + range) / (2 * range);
        Some(Self {
            first: start + 1,
            last: end,
            total,
            percent: if percent > 100 { 100 } else { percent },
            lines,
        })
    }
}

/// Create dialog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    /// Target dataset, `None` when there are no datasets.
    pub dataset: Option<String>,
    pub name: String,
}

/// Delete confirmation contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    /// Delete-all rather than delete-selected.
    pub all: bool,
    /// Snapshots the confirmation destroys.
    pub count: usize,
    /// Records in the store.
    pub total: usize,
    /// Selected records in the store.
    pub selected: usize,
    /// Names listed in the dialog.
    pub names: Vec<String>,
    /// Targets not listed.
    pub more: usize,
}

/// Windowed health report.
#[derive(Debug, Clone)]
pub struct HealthPanel {
    pub lines: Vec<Line>,
    pub scroll: Option<ScrollInfo>,
}

/// A run of text painted with one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub role: Role,
}

/// One line of styled text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn styled(role: Role, text: impl Into<String>) -> Self {
        Self::default().push(role, text)
    }

    /// Appends a span.
    #[must_use]
    pub fn push(mut self, role: Role, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            role,
        });
        self
    }

    /// The line without styling.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Key binding legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legend {
    /// Full help panel rather than the one-line legend.
    pub full: bool,
}
