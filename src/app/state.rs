//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It serves as the single source of truth for all transient UI state and is
//! mutated only by [`crate::app::handle_event`].
//!
//! # State Components
//!
//! - **Records**: Snapshot list, selection flags and filter ([`RecordStore`])
//! - **Containers**: Dataset names new snapshots can be created under
//! - **Cursor / offset**: Position within the visible projection and scroll window
//! - **Screen**: The active [`Screen`]
//! - **Overlays**: Help panel, filter bar, status message, load error banner
//! - **Health**: Last loaded report plus its loading/error/scroll state
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling windowing, truncation and the trailer lines.
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::AppState;
//! use zfsguard::ui::Theme;
//!
//! let state = AppState::new(Theme::default());
//! assert_eq!(state.viewport_height(), 18);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.error.is_none());
//! ```

use super::actions::Action;
use super::modes::Screen;
use super::records::RecordStore;
use super::text_input::TextInput;
use super::viewport::{self, clamp_cursor, clamp_scroll, ensure_visible};
use crate::domain::HealthReport;
use crate::storage::DEFAULT_REPORT_PATH;
use crate::ui::components::{dialog, health};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, ConfirmDialog, CreateForm, DisplayItem, EmptyState, FilterBar, HeaderInfo, HealthPanel,
    ListPanel, Legend, ScrollInfo, StatusLine, UIViewModel,
};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds a status message stays visible.
pub const STATUS_LIFETIME_SECS: f64 = 4.0;

/// Terminal size assumed until the first render reports the real one.
pub const DEFAULT_ROWS: usize = 24;
pub const DEFAULT_COLS: usize = 80;

/// Fixed columns of a list row: margins, selection mark, used, refer, created.
pub const FIXED_COLUMNS: usize = 47;

/// The name column never gets narrower than this.
pub const MIN_NAME_WIDTH: usize = 20;

/// Most snapshot names listed in the delete confirmation.
pub const CONFIRM_LIST_LIMIT: usize = 10;

/// A transient status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Identifies the expiry timer that may clear this message.
    pub seq: u64,
}

/// Health view state.
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    /// Last successfully loaded report; kept when a refresh fails.
    pub report: Option<HealthReport>,
    pub loading: bool,
    /// Reason the last load failed, cleared by the next success.
    pub error: Option<String>,
    pub scroll: usize,
    /// When the current report arrived, used for its age label.
    pub received_at: Option<DateTime<Utc>>,
    pub requested_generation: u64,
    pub applied_generation: u64,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub containers: Vec<String>,

    /// Position within the visible projection.
    pub cursor: usize,
    /// First visible position of the list window.
    pub offset: usize,

    pub screen: Screen,
    pub rows: usize,
    pub cols: usize,

    pub status: Option<StatusMessage>,
    status_seq: u64,

    pub show_help: bool,

    pub create_input: TextInput,
    /// Index into `containers` for the create form.
    pub create_container: usize,

    pub filter_input: TextInput,
    /// Filter bar has keyboard focus.
    pub filter_active: bool,

    pub health: HealthState,

    /// Identities captured when a delete confirmation opened; a reload while
    /// the dialog is up cannot change what `y` destroys.
    pub pending_destroy: Vec<String>,

    /// Persistent banner for the last failed snapshot load.
    pub load_error: Option<String>,
    /// `true` until the first load result arrives.
    pub loading: bool,
    pub load_generation: u64,
    pub applied_load_generation: u64,

    /// Host path of the monitor's report.
    pub report_path: String,
    /// Prepended (with `_`) to generated snapshot names when set.
    pub snapshot_prefix: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates the initial state: empty store, List screen, default terminal size.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            records: RecordStore::default(),
            containers: Vec::new(),
            cursor: 0,
            offset: 0,
            screen: Screen::List,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            status: None,
            status_seq: 0,
            show_help: false,
            create_input: TextInput::default(),
            create_container: 0,
            filter_input: TextInput::default(),
            filter_active: false,
            health: HealthState::default(),
            pending_destroy: Vec::new(),
            load_error: None,
            loading: true,
            load_generation: 0,
            applied_load_generation: 0,
            report_path: DEFAULT_REPORT_PATH.to_string(),
            snapshot_prefix: None,
            theme,
        }
    }

    /// `true` while the filter bar occupies a line.
    #[must_use]
    pub fn filter_bar_visible(&self) -> bool {
        self.filter_active || self.records.filter().is_active()
    }

    /// Data rows available on the current screen.
    ///
    /// The persistent error banner takes a line of its own below the legend.
    #[must_use]
    pub fn viewport_height(&self) -> usize {
        let filter_bar = self.screen != Screen::HealthReport && self.filter_bar_visible();
        let rows = self.rows.saturating_sub(usize::from(self.load_error.is_some()));
        viewport::viewport_height(rows, self.show_help, self.status.is_some(), filter_bar)
    }

    /// Re-establishes the cursor and scroll-follow invariants.
    ///
    /// Called at the end of every transition so that filtering, reloads, resizes
    /// and overlay toggles can never leave the cursor outside the window.
    pub fn follow_cursor(&mut self) {
        let count = self.records.visible_count();
        self.cursor = clamp_cursor(self.cursor, count);
        self.offset = ensure_visible(self.cursor, self.offset.min(self.cursor), self.viewport_height());
        let height = self.viewport_height();
        self.offset = ensure_visible(self.cursor, clamp_scroll(self.offset, count, height), height);

        if self.screen == Screen::HealthReport {
            self.health.scroll = clamp_scroll(self.health.scroll, self.health_line_count(), height);
        }
    }

    /// Moves the cursor by `delta` positions within the visible projection.
    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.records.visible_count();
        let target = self.cursor.saturating_add_signed(delta);
        self.cursor = clamp_cursor(target, count);
        self.offset = ensure_visible(self.cursor, self.offset, self.viewport_height());
    }

    /// Store index of the record under the cursor.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.records.visible_index(self.cursor)
    }

    /// Sets the status line and returns the action arming its expiry.
    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) -> Action {
        self.status_seq += 1;
        let text = text.into();
        tracing::debug!(seq = self.status_seq, is_error, status = %text, "status set");
        self.status = Some(StatusMessage {
            text,
            is_error,
            seq: self.status_seq,
        });
        Action::ExpireStatusAfter {
            seq: self.status_seq,
            seconds: STATUS_LIFETIME_SECS,
        }
    }

    /// Clears the status if `seq` still identifies it. Returns `true` when cleared.
    pub fn expire_status(&mut self, seq: u64) -> bool {
        if self.status.as_ref().is_some_and(|s| s.seq == seq) {
            self.status = None;
            true
        } else {
            false
        }
    }

    /// Allocates the generation for a new snapshot load.
    pub fn next_load_generation(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Allocates the generation for a new report load and marks it in flight.
    pub fn next_health_generation(&mut self) -> u64 {
        self.health.requested_generation += 1;
        self.health.loading = true;
        self.health.requested_generation
    }

    /// Default name offered by the create form.
    #[must_use]
    pub fn default_snapshot_name(&self, now: NaiveDateTime) -> String {
        let stamp = now.format("%Y-%m-%d_%H-%M-%S").to_string();
        match self.snapshot_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}_{stamp}"),
            _ => stamp,
        }
    }

    /// Dataset the create form currently targets.
    #[must_use]
    pub fn selected_container(&self) -> Option<&str> {
        self.containers.get(self.create_container).map(String::as_str)
    }

    /// Total lines of the health view body, for scroll clamping.
    #[must_use]
    pub fn health_line_count(&self) -> usize {
        health::report_lines(&self.health, self.cols).len()
    }

    /// Width of the name column for `cols` terminal columns.
    #[must_use]
    pub const fn name_column_width(cols: usize) -> usize {
        let width = cols.saturating_sub(FIXED_COLUMNS);
        if width < MIN_NAME_WIDTH {
            MIN_NAME_WIDTH
        } else {
            width
        }
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// Windowing uses the same viewport arithmetic as the handler, so the rows
    /// shown are exactly `[offset, offset + viewport_height)` of the visible projection.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let mut sized = std::borrow::Cow::Borrowed(self);
        if rows != self.rows || cols != self.cols {
            let owned = sized.to_mut();
            owned.rows = rows;
            owned.cols = cols;
            owned.follow_cursor();
        }
        let state = sized.as_ref();

        let body = match state.screen {
            Screen::List => Body::List(state.compute_list(cols)),
            Screen::CreateForm => Body::Create(state.compute_create_form()),
            Screen::ConfirmDelete | Screen::ConfirmDeleteAll => {
                Body::Confirm(state.compute_confirm_dialog())
            }
            Screen::HealthReport => Body::Health(state.compute_health(cols)),
        };

        UIViewModel {
            header: HeaderInfo {
                title: format!(" ZFSGuard v{} - ZFS Snapshot Manager ", env!("CARGO_PKG_VERSION")),
            },
            body,
            status: state.status.as_ref().map(|s| StatusLine {
                text: s.text.clone(),
                is_error: s.is_error,
            }),
            legend: Legend {
                full: state.show_help,
            },
            error: state.load_error.as_ref().map(|e| format!("Error: {e}")),
        }
    }

    fn compute_list(&self, cols: usize) -> ListPanel {
        let visible = self.records.visible_indices();
        let height = self.viewport_height();
        let name_width = Self::name_column_width(cols);

        let start = self.offset.min(visible.len());
        let end = (start + height).min(visible.len());

        let display_items = visible[start..end]
            .iter()
            .enumerate()
            .filter_map(|(relative, &index)| {
                let record = self.records.get(index)?;
                Some(DisplayItem::from_snapshot(
                    record,
                    name_width,
                    start + relative == self.cursor,
                ))
            })
            .collect();

        let empty_state = if !visible.is_empty() {
            None
        } else if self.loading {
            Some(EmptyState {
                message: "Loading snapshots...".to_string(),
            })
        } else if self.records.is_empty() {
            Some(EmptyState {
                message: "No snapshots found. Press 'c' to create one.".to_string(),
            })
        } else {
            Some(EmptyState {
                message: "No snapshots match the filter.".to_string(),
            })
        };

        ListPanel {
            filter_bar: self.compute_filter_bar(visible.len()),
            total: self.records.len(),
            selected: self.records.selected_count(),
            name_width,
            display_items,
            scroll: ScrollInfo::for_window(start, end, visible.len(), height, false),
            empty_state,
        }
    }

    fn compute_filter_bar(&self, matched: usize) -> Option<FilterBar> {
        if self.filter_active {
            Some(FilterBar {
                query: self.filter_input.value().to_string(),
                editing: true,
                matched,
                total: self.records.len(),
            })
        } else if self.records.filter().is_active() {
            Some(FilterBar {
                query: self.records.filter().query.clone(),
                editing: false,
                matched,
                total: self.records.len(),
            })
        } else {
            None
        }
    }

    fn compute_create_form(&self) -> CreateForm {
        CreateForm {
            dataset: self.selected_container().map(String::from),
            name: self.create_input.value().to_string(),
        }
    }

    fn compute_confirm_dialog(&self) -> ConfirmDialog {
        let all = self.screen == Screen::ConfirmDeleteAll;
        let names = if all {
            Vec::new()
        } else {
            self.pending_destroy.clone()
        };
        let (shown, more) = dialog::limit_names(names, CONFIRM_LIST_LIMIT);

        ConfirmDialog {
            all,
            count: self.pending_destroy.len(),
            total: self.records.len(),
            selected: self.records.selected_count(),
            names: shown,
            more,
        }
    }

    fn compute_health(&self, cols: usize) -> HealthPanel {
        let lines = health::report_lines(&self.health, cols);
        let height = self.viewport_height();
        let total = lines.len();
        let scroll = clamp_scroll(self.health.scroll, total, height);
        let end = (scroll + height).min(total);

        HealthPanel {
            lines: lines[scroll..end].to_vec(),
            scroll: ScrollInfo::for_window(scroll, end, total, height, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Snapshot;

    fn state_with(count: usize) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.records.replace_all(
            (0..count)
                .map(|i| Snapshot::new(&format!("tank@s{i:03}"), "1K", "2K", None))
                .collect(),
        );
        state.loading = false;
        state
    }

    #[test]
    fn moving_past_the_window_scrolls() {
        let mut state = state_with(40);
        for _ in 0..20 {
            state.move_cursor(1);
        }
        assert_eq!(state.cursor, 20);
        assert_eq!(state.offset, 3);
    }

    #[test]
    fn shrinking_terminal_keeps_cursor_visible() {
        let mut state = state_with(40);
        state.move_cursor(15);
        state.rows = 10;
        state.follow_cursor();
        let height = state.viewport_height();
        assert!(state.offset <= state.cursor && state.cursor < state.offset + height);
    }

    #[test]
    fn status_sequence_protects_newer_messages() {
        let mut state = state_with(0);
        state.set_status("first", false);
        state.set_status("second", true);
        assert!(!state.expire_status(1));
        assert_eq!(state.status.as_ref().map(|s| s.text.as_str()), Some("second"));
        assert!(state.expire_status(2));
        assert!(state.status.is_none());
    }

    #[test]
    fn default_name_uses_prefix() {
        let mut state = state_with(0);
        let now = NaiveDateTime::parse_from_str("2025-02-27 10:30:05", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(state.default_snapshot_name(now), "2025-02-27_10-30-05");
        state.snapshot_prefix = Some("zfsguard".into());
        assert_eq!(state.default_snapshot_name(now), "zfsguard_2025-02-27_10-30-05");
    }

    #[test]
    fn name_column_has_a_floor() {
        assert_eq!(AppState::name_column_width(80), 33);
        assert_eq!(AppState::name_column_width(50), MIN_NAME_WIDTH);
    }

    #[test]
    fn viewmodel_windows_the_visible_projection() {
        let mut state = state_with(40);
        state.move_cursor(25);
        let vm = state.compute_viewmodel(24, 80);
        let Body::List(list) = vm.body else {
            panic!("expected list body");
        };
        assert_eq!(list.display_items.len(), 18);
        assert!(list.display_items.last().unwrap().is_cursor);
        let scroll = list.scroll.unwrap();
        assert_eq!((scroll.first, scroll.last, scroll.total), (9, 26, 40));
    }
}
