//! Zellij plugin wrapper and entry point.
//!
//! This is the only place that talks to the host. It converts Zellij events
//! into library [`Event`]s, runs them through [`handle_event`], and carries
//! out the resulting [`Action`]s: `zfs` invocations go through the
//! [`Dispatcher`], report reads go to the worker thread, and status expiry
//! uses host timers.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │   run_command(zfs …) ──► RunCommandResult
//! │  │ State (plugin)         │──┼──────────────────────────────────┐
//! │  │  AppState + Dispatcher │◄─┼──────────────────────────────────┘
//! │  └────────────────────────┘  │
//! │        │ IPC (JSON)  ▲       │
//! │        ▼             │       │
//! │  ┌────────────────────────┐  │
//! │  │ ZfsGuardWorker         │  │   reads the health report file
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`, request
//!    permissions and subscribe
//! 2. **Granted**: Re-point `/host` at `/` and emit `Event::Started`, which
//!    loads snapshots and datasets
//! 3. **Update**: Translate host events, run the reducer, execute actions
//! 4. **Render**: Report size changes to the reducer, then print the frame

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use zfsguard::app::Key;
use zfsguard::provider::Effect;
use zfsguard::worker::{WorkerMessage, WorkerResponse, ZfsGuardWorker};
use zfsguard::{handle_event, Action, Command, Config, Dispatcher, Event};

register_plugin!(State);
register_worker!(ZfsGuardWorker, zfsguard_worker, ZFSGUARD_WORKER);

/// Name shared by the worker registration and its custom messages.
const WORKER_NAME: &str = "zfsguard";

/// Plugin state wrapper: the library state plus host-facing bookkeeping.
struct State {
    app: zfsguard::AppState,
    dispatcher: Dispatcher,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: zfsguard::initialize(&config),
            dispatcher: Dispatcher::new(config.zfs_cli()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions and subscribes to events.
    ///
    /// Nothing is loaded until the permission request is answered.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zfsguard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            report_path = %config.report_path,
            zfs_command = %config.zfs_command,
            "parsed configuration"
        );
        self.app = zfsguard::initialize(&config);
        self.dispatcher = Dispatcher::new(config.zfs_cli());

        request_permission(&[
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Key::from_zellij(key) {
                Some(key) => Event::Key(key),
                None => return false,
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                match self
                    .dispatcher
                    .complete(exit_code, &stdout, &stderr, &context)
                {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => match self.dispatcher.timer_fired() {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Self::map_permission_result(status)
            }
            _ => return false,
        };

        self.handle(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if rows != self.app.rows || cols != self.app.cols {
            self.handle(&Event::Resize { rows, cols });
        }
        zfsguard::ui::render(&self.app, rows, cols).print();
    }
}

impl State {
    /// Runs `event` through the reducer and executes the resulting actions.
    fn handle(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                let mut render = should_render;
                for action in actions {
                    render |= self.execute_action(action);
                }
                render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_permission_result(status: PermissionStatus) -> Event {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - mounting host root");
                change_host_folder(PathBuf::from("/"));
                Event::Started
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied");
                Event::PermissionDenied
            }
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Carries out one action. Returns `true` if it changed state that needs a redraw.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::Dispatch(command) => self.dispatch(&command),
            Action::ExpireStatusAfter { seq, seconds } => {
                self.dispatcher.schedule_expiry(seq);
                set_timeout(seconds);
                false
            }
            Action::Quit => {
                tracing::debug!("closing plugin");
                close_self();
                false
            }
        }
    }

    fn dispatch(&mut self, command: &Command) -> bool {
        let mut render = false;
        for effect in self.dispatcher.begin(command) {
            match effect {
                Effect::Run { argv, context } => {
                    let args: Vec<&str> = argv.iter().map(String::as_str).collect();
                    tracing::debug!(argv = ?args, "running command");
                    run_command(&args, context);
                }
                Effect::Worker(message) => Self::post_worker_message(&message),
                Effect::Emit(event) => render |= self.handle(&event),
            }
        }
        render
    }
}
