//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes key input,
//! command results, timers and worker responses, translating them into state
//! changes and action sequences. It is the only place [`AppState`] is mutated.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime, the dispatcher or the worker thread
//! 2. [`handle_event`] pattern-matches the event type (and, for keys, the screen)
//! 3. State mutations occur via `AppState` and `RecordStore` methods
//! 4. Actions are collected and returned for execution
//!
//! Every transition ends with [`AppState::follow_cursor`], so the cursor and
//! scroll invariants hold no matter which branch ran.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Started`, `PermissionDenied`, `Resize`
//! - **Input**: `Key`, routed per [`Screen`]
//! - **Command results**: `RecordsLoaded`, `LoadFailed`, `CreateFinished`, `DestroyFinished`
//! - **Worker**: `WorkerResponse` with typed message variants
//! - **Timers**: `StatusExpired`
//!
//! # Example
//!
//! ```rust
//! use zfsguard::app::{handle_event, Action, AppState, Command, Event};
//! use zfsguard::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Started)?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::Dispatch(Command::LoadAll { generation: 1 })]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::keys::{Binding, Key};
use super::modes::Screen;
use crate::app::{Action, AppState, Command};
use crate::domain::error::{Result, ValidationError, ZfsGuardError};
use crate::domain::{DestroyOutcome, Snapshot};
use crate::worker::WorkerResponse;

/// Events triggered by user input, command completion, timers or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Permissions were granted; the initial load can start.
    Started,

    /// Permissions were refused. Shown as the persistent error banner.
    PermissionDenied,

    /// A decoded key press.
    Key(Key),

    /// The terminal surface changed size.
    Resize {
        rows: usize,
        cols: usize,
    },

    /// Result of [`Command::LoadAll`].
    RecordsLoaded {
        generation: u64,
        /// Snapshots in provider order.
        records: Vec<Snapshot>,
        /// Dataset names, possibly empty when the dataset listing failed.
        containers: Vec<String>,
    },

    /// [`Command::LoadAll`] failed to list snapshots.
    LoadFailed {
        generation: u64,
        message: String,
    },

    /// Result of [`Command::Create`].
    CreateFinished {
        identity: String,
        result: std::result::Result<(), String>,
    },

    /// Result of [`Command::DestroyAll`], one outcome per requested identity.
    DestroyFinished {
        outcomes: Vec<DestroyOutcome>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// A status expiry timer fired.
    StatusExpired {
        seq: u64,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. The actions are executed in order by the plugin
/// runtime; each [`Action::Dispatch`] eventually re-enters as one result event.
///
/// # Errors
///
/// Reserved for transitions that cannot be expressed as UI state. Provider,
/// validation and report failures are converted to status messages or banners
/// and never returned from here.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::cognitive_complexity, clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let outcome = match event {
        Event::Started => {
            tracing::debug!("permissions granted, loading snapshots");
            state.loading = true;
            let generation = state.next_load_generation();
            Ok((true, vec![Action::Dispatch(Command::LoadAll { generation })]))
        }
        Event::PermissionDenied => {
            tracing::warn!("permissions denied");
            state.loading = false;
            state.load_error = Some(
                "permission to run commands was denied; reopen the plugin and grant it".to_string(),
            );
            Ok((true, vec![]))
        }
        Event::Resize { rows, cols } => {
            if state.rows == *rows && state.cols == *cols {
                return Ok((false, vec![]));
            }
            state.rows = *rows;
            state.cols = *cols;
            Ok((true, vec![]))
        }
        Event::Key(key) => handle_key(state, *key),
        Event::RecordsLoaded {
            generation,
            records,
            containers,
        } => {
            if *generation < state.applied_load_generation {
                tracing::debug!(
                    generation,
                    applied = state.applied_load_generation,
                    "discarding stale load result"
                );
                return Ok((false, vec![]));
            }
            tracing::debug!(
                generation,
                snapshots = records.len(),
                datasets = containers.len(),
                "snapshots loaded"
            );
            state.applied_load_generation = *generation;
            state.loading = false;
            state.load_error = None;
            state.records.replace_all(records.clone());
            state.containers.clone_from(containers);
            if state.create_container >= state.containers.len() {
                state.create_container = 0;
            }
            Ok((true, vec![]))
        }
        Event::LoadFailed {
            generation,
            message,
        } => {
            if *generation < state.applied_load_generation {
                tracing::debug!(generation, "discarding stale load failure");
                return Ok((false, vec![]));
            }
            tracing::warn!(generation, error = %message, "snapshot load failed");
            state.applied_load_generation = *generation;
            state.loading = false;
            state.load_error = Some(message.clone());
            Ok((true, vec![]))
        }
        Event::CreateFinished { identity, result } => {
            let status = match result {
                Ok(()) => {
                    tracing::debug!(identity = %identity, "snapshot created");
                    state.set_status(format!("Created snapshot: {identity}"), false)
                }
                Err(message) => {
                    tracing::warn!(identity = %identity, error = %message, "snapshot creation failed");
                    state.set_status(format!("Failed to create: {message}"), true)
                }
            };
            let generation = state.next_load_generation();
            Ok((
                true,
                vec![status, Action::Dispatch(Command::LoadAll { generation })],
            ))
        }
        Event::DestroyFinished { outcomes } => {
            let (text, is_error) = destroy_summary(outcomes);
            tracing::debug!(
                requested = outcomes.len(),
                failed = outcomes.iter().filter(|o| o.error.is_some()).count(),
                "destroy batch finished"
            );
            let status = state.set_status(text, is_error);
            let generation = state.next_load_generation();
            Ok((
                true,
                vec![status, Action::Dispatch(Command::LoadAll { generation })],
            ))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::ReportLoaded { generation, report } => {
                if *generation < state.health.applied_generation {
                    tracing::debug!(generation, "discarding stale health report");
                    return Ok((false, vec![]));
                }
                state.health.applied_generation = *generation;
                if *generation >= state.health.requested_generation {
                    state.health.loading = false;
                }
                state.health.report = Some(report.clone());
                state.health.received_at = Some(chrono::Utc::now());
                state.health.error = None;
                Ok((true, vec![]))
            }
            WorkerResponse::ReportUnavailable {
                generation,
                message,
            } => {
                if *generation < state.health.applied_generation {
                    tracing::debug!(generation, "discarding stale health failure");
                    return Ok((false, vec![]));
                }
                tracing::warn!(generation, error = %message, "health report unavailable");
                state.health.applied_generation = *generation;
                if *generation >= state.health.requested_generation {
                    state.health.loading = false;
                }
                state.health.error = Some(message.clone());
                let status = state.set_status(format!("Health report: {message}"), true);
                Ok((true, vec![status]))
            }
        },
        Event::StatusExpired { seq } => Ok((state.expire_status(*seq), vec![])),
    };

    state.follow_cursor();
    outcome
}

fn handle_key(state: &mut AppState, key: Key) -> Result<(bool, Vec<Action>)> {
    match state.screen {
        Screen::List if state.filter_active => Ok(handle_filter_key(state, key)),
        Screen::List => Ok(handle_list_key(state, key)),
        Screen::CreateForm => Ok(handle_create_key(state, key)),
        Screen::ConfirmDelete | Screen::ConfirmDeleteAll => Ok(handle_confirm_key(state, key)),
        Screen::HealthReport => Ok(handle_health_key(state, key)),
    }
}

fn handle_list_key(state: &mut AppState, key: Key) -> (bool, Vec<Action>) {
    let page = isize::try_from(state.viewport_height()).unwrap_or(isize::MAX);

    if Binding::Quit.matches(key) {
        return (false, vec![Action::Quit]);
    }
    if Binding::Up.matches(key) {
        state.move_cursor(-1);
    } else if Binding::Down.matches(key) {
        state.move_cursor(1);
    } else if Binding::PageUp.matches(key) {
        state.move_cursor(-page);
    } else if Binding::PageDown.matches(key) {
        state.move_cursor(page);
    } else if Binding::Select.matches(key) {
        let Some(index) = state.current_index() else {
            return (false, vec![]);
        };
        state.records.toggle_selection(index);
    } else if Binding::SelectAll.matches(key) {
        let visible = state.records.visible_indices();
        state.records.toggle_select_all(&visible);
    } else if Binding::Filter.matches(key) {
        tracing::debug!("entering filter mode");
        state.filter_active = true;
        state.filter_input.set(&state.records.filter().query.clone());
    } else if Binding::Create.matches(key) {
        let name = state.default_snapshot_name(chrono::Local::now().naive_local());
        state.create_input.set(&name);
        if state.create_container >= state.containers.len() {
            state.create_container = 0;
        }
        state.screen = Screen::CreateForm;
    } else if Binding::Delete.matches(key) {
        if state.records.selected_count() == 0 {
            let Some(index) = state.current_index() else {
                tracing::debug!("nothing to delete");
                return (false, vec![]);
            };
            state.records.select(index);
        }
        state.pending_destroy = state
            .records
            .selected_records()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        state.screen = Screen::ConfirmDelete;
    } else if Binding::DeleteAll.matches(key) {
        if state.records.is_empty() {
            return (false, vec![]);
        }
        state.pending_destroy = state.records.records().iter().map(|r| r.name.clone()).collect();
        state.screen = Screen::ConfirmDeleteAll;
    } else if Binding::Refresh.matches(key) {
        let generation = state.next_load_generation();
        return (true, vec![Action::Dispatch(Command::LoadAll { generation })]);
    } else if Binding::Health.matches(key) {
        return (true, enter_health(state));
    } else if Binding::Help.matches(key) {
        state.show_help = !state.show_help;
    } else {
        return (false, vec![]);
    }
    (true, vec![])
}

fn handle_filter_key(state: &mut AppState, key: Key) -> (bool, Vec<Action>) {
    match key {
        Key::Enter => {
            tracing::debug!(query = %state.filter_input.value(), "leaving filter mode");
            state.filter_active = false;
        }
        Key::Esc => {
            tracing::debug!("filter cleared");
            state.filter_active = false;
            state.filter_input.clear();
            state.records.apply_filter("");
        }
        Key::Backspace => {
            state.filter_input.backspace();
            state.records.apply_filter(&state.filter_input.value().to_string());
        }
        other => {
            let Some(c) = other.printable() else {
                return (false, vec![]);
            };
            if !state.filter_input.push(c) {
                return (false, vec![]);
            }
            state.records.apply_filter(&state.filter_input.value().to_string());
        }
    }
    (true, vec![])
}

fn handle_create_key(state: &mut AppState, key: Key) -> (bool, Vec<Action>) {
    let count = state.containers.len();
    match key {
        Key::Esc => {
            state.create_input.clear();
            state.screen = Screen::List;
            (true, vec![])
        }
        Key::Tab => {
            if count > 0 {
                state.create_container = (state.create_container + 1) % count;
            }
            (true, vec![])
        }
        Key::BackTab => {
            if count > 0 {
                state.create_container = (state.create_container + count - 1) % count;
            }
            (true, vec![])
        }
        Key::Backspace => {
            state.create_input.backspace();
            (true, vec![])
        }
        Key::Enter => match compose_identity(state) {
            Ok(identity) => {
                tracing::debug!(identity = %identity, "creating snapshot");
                state.create_input.clear();
                state.screen = Screen::List;
                (true, vec![Action::Dispatch(Command::Create { identity })])
            }
            Err(e) => {
                tracing::debug!(error = %e, "create rejected");
                let status = state.set_status(e.to_string(), true);
                (true, vec![status])
            }
        },
        other => match other.printable() {
            Some(c) => (state.create_input.push(c), vec![]),
            None => (false, vec![]),
        },
    }
}

/// Validates the create form and returns `dataset@name`.
fn compose_identity(state: &AppState) -> Result<String> {
    let name = state.create_input.value().trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    let dataset = state
        .selected_container()
        .ok_or(ZfsGuardError::Validation(ValidationError::NoContainerSelected))?;
    Ok(format!("{dataset}@{name}"))
}

fn handle_confirm_key(state: &mut AppState, key: Key) -> (bool, Vec<Action>) {
    if Binding::Cancel.matches(key) {
        state.pending_destroy.clear();
        state.screen = Screen::List;
        return (true, vec![]);
    }
    if !Binding::Confirm.matches(key) {
        return (false, vec![]);
    }

    let identities = std::mem::take(&mut state.pending_destroy);
    state.screen = Screen::List;

    tracing::debug!(count = identities.len(), "destroying snapshots");
    (true, vec![Action::Dispatch(Command::DestroyAll { identities })])
}

fn enter_health(state: &mut AppState) -> Vec<Action> {
    state.screen = Screen::HealthReport;
    state.health.scroll = 0;
    let generation = state.next_health_generation();
    vec![Action::Dispatch(Command::LoadHealth {
        path: state.report_path.clone(),
        generation,
    })]
}

fn handle_health_key(state: &mut AppState, key: Key) -> (bool, Vec<Action>) {
    let height = state.viewport_height();
    let total = state.health_line_count();
    let max_scroll = total.saturating_sub(height);

    if Binding::Quit.matches(key) {
        return (false, vec![Action::Quit]);
    }
    if Binding::Cancel.matches(key) || Binding::Health.matches(key) {
        state.screen = Screen::List;
    } else if Binding::Up.matches(key) {
        state.health.scroll = state.health.scroll.saturating_sub(1);
    } else if Binding::Down.matches(key) {
        state.health.scroll = (state.health.scroll + 1).min(max_scroll);
    } else if Binding::PageUp.matches(key) {
        state.health.scroll = state.health.scroll.saturating_sub(height);
    } else if Binding::PageDown.matches(key) {
        state.health.scroll = (state.health.scroll + height).min(max_scroll);
    } else if Binding::Refresh.matches(key) {
        let generation = state.next_health_generation();
        return (
            true,
            vec![Action::Dispatch(Command::LoadHealth {
                path: state.report_path.clone(),
                generation,
            })],
        );
    } else if Binding::Help.matches(key) {
        state.show_help = !state.show_help;
    } else {
        return (false, vec![]);
    }
    (true, vec![])
}

/// Classifies a destroy batch into a status line and its error flag.
///
/// A permission failure anywhere in the batch wins over every other outcome.
///
/// # Examples
///
/// ```
/// use zfsguard::app::handler::destroy_summary;
/// use zfsguard::domain::DestroyOutcome;
///
/// let outcomes = vec![
///     DestroyOutcome::ok("tank@a"),
///     DestroyOutcome::failed("tank@b", "dataset is busy"),
/// ];
/// assert_eq!(destroy_summary(&outcomes), ("Delete failed for 1 snapshot(s)".to_string(), true));
/// ```
#[must_use]
pub fn destroy_summary(outcomes: &[DestroyOutcome]) -> (String, bool) {
    let failures: Vec<&str> = outcomes.iter().filter_map(|o| o.error.as_deref()).collect();

    if failures
        .iter()
        .any(|message| ZfsGuardError::from_provider_message(message).is_permission_denied())
    {
        return (
            format!("Delete failed: {}", ZfsGuardError::PermissionDenied),
            true,
        );
    }
    if !failures.is_empty() {
        return (format!("Delete failed for {} snapshot(s)", failures.len()), true);
    }
    (format!("Deleted {} snapshot(s)", outcomes.len()), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;

    fn loaded(names: &[&str], containers: &[&str]) -> AppState {
        let mut state = AppState::new(Theme::default());
        handle_event(&mut state, &Event::Started).unwrap();
        handle_event(
            &mut state,
            &Event::RecordsLoaded {
                generation: 1,
                records: names
                    .iter()
                    .map(|n| Snapshot::new(n, "1K", "2K", None))
                    .collect(),
                containers: containers.iter().map(|c| (*c).to_string()).collect(),
            },
        )
        .unwrap();
        state
    }

    fn press(state: &mut AppState, key: Key) -> Vec<Action> {
        handle_event(state, &Event::Key(key)).unwrap().1
    }

    #[test]
    fn delete_without_selection_selects_cursor_record() {
        let mut state = loaded(&["tank@a", "tank@b"], &["tank"]);
        press(&mut state, Key::Down);
        press(&mut state, Key::Char('d'));
        assert_eq!(state.screen, Screen::ConfirmDelete);
        let selected: Vec<_> = state.records.selected_records().iter().map(|r| r.name.clone()).collect();
        assert_eq!(selected, vec!["tank@b"]);
    }

    #[test]
    fn delete_on_empty_store_stays_in_list() {
        let mut state = loaded(&[], &[]);
        assert!(press(&mut state, Key::Char('d')).is_empty());
        assert!(press(&mut state, Key::Char('D')).is_empty());
        assert_eq!(state.screen, Screen::List);
    }

    #[test]
    fn create_form_types_n_instead_of_cancelling() {
        let mut state = loaded(&[], &["tank"]);
        press(&mut state, Key::Char('c'));
        state.create_input.clear();
        press(&mut state, Key::Char('n'));
        assert_eq!(state.screen, Screen::CreateForm);
        assert_eq!(state.create_input.value(), "n");
    }

    #[test]
    fn create_without_dataset_is_rejected() {
        let mut state = loaded(&[], &[]);
        press(&mut state, Key::Char('c'));
        let actions = press(&mut state, Key::Enter);
        assert_eq!(state.screen, Screen::CreateForm);
        assert!(matches!(actions.as_slice(), [Action::ExpireStatusAfter { .. }]));
        assert_eq!(
            state.status.as_ref().map(|s| s.text.as_str()),
            Some("No dataset selected")
        );
    }

    #[test]
    fn tab_cycles_datasets_both_ways() {
        let mut state = loaded(&[], &["tank", "tank/home", "tank/var"]);
        press(&mut state, Key::Char('c'));
        press(&mut state, Key::BackTab);
        assert_eq!(state.selected_container(), Some("tank/var"));
        press(&mut state, Key::Tab);
        press(&mut state, Key::Tab);
        assert_eq!(state.selected_container(), Some("tank/home"));
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut state = loaded(&["tank@a"], &["tank"]);
        let (render, _) = handle_event(
            &mut state,
            &Event::RecordsLoaded {
                generation: 0,
                records: vec![],
                containers: vec![],
            },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.records.len(), 1);
    }

    #[test]
    fn load_failure_keeps_previous_records() {
        let mut state = loaded(&["tank@a"], &["tank"]);
        handle_event(
            &mut state,
            &Event::LoadFailed {
                generation: 2,
                message: "zfs: command not found".into(),
            },
        )
        .unwrap();
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.load_error.as_deref(), Some("zfs: command not found"));
    }

    #[test]
    fn permission_failure_wins_over_other_failures() {
        let outcomes = vec![
            DestroyOutcome::failed("tank@a", "dataset is busy"),
            DestroyOutcome::failed("tank@b", "cannot destroy: Permission denied"),
        ];
        let (text, is_error) = destroy_summary(&outcomes);
        assert!(is_error);
        assert!(text.contains("elevated privileges"));
    }

    #[test]
    fn success_counts_every_outcome() {
        let outcomes = vec![DestroyOutcome::ok("tank@a"), DestroyOutcome::ok("tank@a")];
        assert_eq!(destroy_summary(&outcomes), ("Deleted 2 snapshot(s)".to_string(), false));
    }

    #[test]
    fn filter_escape_clears_query() {
        let mut state = loaded(&["tank@a", "pool@b"], &[]);
        press(&mut state, Key::Char('/'));
        press(&mut state, Key::Char('p'));
        assert_eq!(state.records.visible_count(), 1);
        press(&mut state, Key::Esc);
        assert!(!state.filter_active);
        assert_eq!(state.records.visible_count(), 2);
    }

    #[test]
    fn health_key_requests_report() {
        let mut state = loaded(&[], &[]);
        let actions = press(&mut state, Key::Char('h'));
        assert_eq!(state.screen, Screen::HealthReport);
        assert!(state.health.loading);
        assert_eq!(
            actions,
            vec![Action::Dispatch(Command::LoadHealth {
                path: state.report_path.clone(),
                generation: 1
            })]
        );
    }
}
