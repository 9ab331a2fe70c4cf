//! Command dispatcher: turns [`Command`]s into host effects and folds the
//! host's results back into exactly one [`Event`] per command.
//!
//! The plugin host runs external programs asynchronously (`run_command`) and
//! reports each one as a separate `RunCommandResult` carrying the context map
//! it was started with. The dispatcher tags every invocation with a batch id,
//! a kind and a slot, and keeps the partially collected batch until every
//! invocation of the command has reported.
//!
//! It performs no I/O itself, so the fan-out/fan-in logic is tested without a host.

use super::zfs::{failure_message, parse_datasets, parse_snapshots, ZfsCli};
use crate::app::{Command, Event};
use crate::domain::DestroyOutcome;
use crate::infrastructure::host_path;
use crate::worker::WorkerMessage;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Context key holding the batch id.
pub const CONTEXT_BATCH: &str = "zfsguard.batch";
/// Context key holding the invocation kind.
pub const CONTEXT_KIND: &str = "zfsguard.kind";
/// Context key holding the slot within a destroy batch.
pub const CONTEXT_SLOT: &str = "zfsguard.slot";
/// Context key holding the identity a destroy slot targets.
pub const CONTEXT_IDENTITY: &str = "zfsguard.identity";

const KIND_SNAPSHOTS: &str = "snapshots";
const KIND_DATASETS: &str = "datasets";
const KIND_CREATE: &str = "create";
const KIND_DESTROY: &str = "destroy";

/// A side effect the plugin shim must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run `argv` through the host, echoing `context` in the result.
    Run {
        argv: Vec<String>,
        context: BTreeMap<String, String>,
    },
    /// Post a message to the worker thread.
    Worker(WorkerMessage),
    /// Feed an event straight back into the handler.
    Emit(Event),
}

/// Output of one finished invocation.
type Outcome = std::result::Result<String, String>;

#[derive(Debug)]
enum Batch {
    Load {
        generation: u64,
        snapshots: Option<Outcome>,
        datasets: Option<Outcome>,
    },
    Create {
        identity: String,
        result: Option<std::result::Result<(), String>>,
    },
    Destroy {
        outcomes: Vec<Option<DestroyOutcome>>,
    },
}

/// Correlates host command results with the command that started them.
#[derive(Debug, Default)]
pub struct Dispatcher {
    cli: ZfsCli,
    next_batch: u64,
    batches: HashMap<u64, Batch>,
    timers: VecDeque<u64>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(cli: ZfsCli) -> Self {
        Self {
            cli,
            ..Self::default()
        }
    }

    /// Number of commands still waiting for results.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.batches.len()
    }

    /// Starts `command`, returning the effects that carry it out.
    pub fn begin(&mut self, command: &Command) -> Vec<Effect> {
        let _span = tracing::debug_span!("dispatch", kind = command.kind()).entered();

        match command {
            Command::LoadAll { generation } => {
                let batch = self.open(Batch::Load {
                    generation: *generation,
                    snapshots: None,
                    datasets: None,
                });
                vec![
                    Self::run(self.cli.list_snapshots(), batch, KIND_SNAPSHOTS, None),
                    Self::run(self.cli.list_datasets(), batch, KIND_DATASETS, None),
                ]
            }
            Command::Create { identity } => {
                let batch = self.open(Batch::Create {
                    identity: identity.clone(),
                    result: None,
                });
                vec![Self::run(self.cli.snapshot(identity), batch, KIND_CREATE, None)]
            }
            Command::DestroyAll { identities } => {
                if identities.is_empty() {
                    return vec![Effect::Emit(Event::DestroyFinished { outcomes: vec![] })];
                }
                let batch = self.open(Batch::Destroy {
                    outcomes: vec![None; identities.len()],
                });
                identities
                    .iter()
                    .enumerate()
                    .map(|(slot, identity)| {
                        Self::run(self.cli.destroy(identity), batch, KIND_DESTROY, Some(slot))
                    })
                    .collect()
            }
            Command::LoadHealth { path, generation } => {
                let sandbox_path = host_path(path).to_string_lossy().to_string();
                tracing::debug!(path = %sandbox_path, generation, "requesting health report");
                vec![Effect::Worker(WorkerMessage::load_report(
                    sandbox_path,
                    *generation,
                ))]
            }
        }
    }

    /// Records one host result. Returns the command's event once its batch is complete.
    ///
    /// Results whose context carries no batch id belong to someone else and are
    /// ignored, as are results for unknown batches.
    pub fn complete(
        &mut self,
        exit_code: Option<i32>,
        stdout: &[u8],
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let batch_id: u64 = context.get(CONTEXT_BATCH)?.parse().ok()?;
        let kind = context.get(CONTEXT_KIND)?.as_str();

        let outcome: Outcome = if exit_code == Some(0) {
            Ok(String::from_utf8_lossy(stdout).into_owned())
        } else {
            Err(failure_message(exit_code, stderr))
        };
        tracing::debug!(batch = batch_id, kind, ok = outcome.is_ok(), "command finished");

        let batch = self.batches.get_mut(&batch_id)?;
        let finished = match batch {
            Batch::Load {
                snapshots,
                datasets,
                ..
            } => {
                match kind {
                    KIND_SNAPSHOTS => *snapshots = Some(outcome),
                    KIND_DATASETS => *datasets = Some(outcome),
                    _ => return None,
                }
                snapshots.is_some() && datasets.is_some()
            }
            Batch::Create { result, .. } => {
                *result = Some(outcome.map(|_| ()));
                true
            }
            Batch::Destroy { outcomes } => {
                let slot: usize = context.get(CONTEXT_SLOT)?.parse().ok()?;
                let target = outcomes.get_mut(slot)?;
                let identity = context_identity(context);
                *target = Some(match &outcome {
                    Ok(_) => DestroyOutcome::ok(&identity),
                    Err(message) => DestroyOutcome::failed(&identity, message),
                });
                outcomes.iter().all(Option::is_some)
            }
        };

        if !finished {
            return None;
        }
        let batch = self.batches.remove(&batch_id)?;
        Some(Self::finish(batch))
    }

    /// Remembers that a status expiry timer was armed for `seq`.
    pub fn schedule_expiry(&mut self, seq: u64) {
        self.timers.push_back(seq);
    }

    /// Maps a fired timer to the status expiry it was armed for.
    ///
    /// Every status uses the same lifetime, so timers fire in the order they were armed.
    pub fn timer_fired(&mut self) -> Option<Event> {
        self.timers
            .pop_front()
            .map(|seq| Event::StatusExpired { seq })
    }

    fn open(&mut self, batch: Batch) -> u64 {
        self.next_batch += 1;
        self.batches.insert(self.next_batch, batch);
        self.next_batch
    }

    fn run(argv: Vec<String>, batch: u64, kind: &str, slot: Option<usize>) -> Effect {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_BATCH.to_string(), batch.to_string());
        context.insert(CONTEXT_KIND.to_string(), kind.to_string());
        if let Some(slot) = slot {
            context.insert(CONTEXT_SLOT.to_string(), slot.to_string());
            if let Some(identity) = argv.last() {
                context.insert(CONTEXT_IDENTITY.to_string(), identity.clone());
            }
        }
        Effect::Run { argv, context }
    }

    fn finish(batch: Batch) -> Event {
        match batch {
            Batch::Load {
                generation,
                snapshots,
                datasets,
            } => match snapshots.unwrap_or_else(|| Err("snapshot listing missing".to_string())) {
                Ok(output) => {
                    let containers = match datasets {
                        Some(Ok(output)) => parse_datasets(&output),
                        Some(Err(message)) => {
                            tracing::warn!(error = %message, "dataset listing failed");
                            Vec::new()
                        }
                        None => Vec::new(),
                    };
                    Event::RecordsLoaded {
                        generation,
                        records: parse_snapshots(&output),
                        containers,
                    }
                }
                Err(message) => Event::LoadFailed {
                    generation,
                    message: format!("Failed to list snapshots: {message}"),
                },
            },
            Batch::Create { identity, result } => Event::CreateFinished {
                identity,
                result: result.unwrap_or_else(|| Err("no result".to_string())),
            },
            Batch::Destroy { outcomes } => Event::DestroyFinished {
                outcomes: outcomes.into_iter().flatten().collect(),
            },
        }
    }
}

fn context_identity(context: &BTreeMap<String, String>) -> String {
    context.get(CONTEXT_IDENTITY).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(effects: &[Effect]) -> Vec<(Vec<String>, BTreeMap<String, String>)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Run { argv, context } => Some((argv.clone(), context.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn load_waits_for_both_listings() {
        let mut dispatcher = Dispatcher::default();
        let effects = runs(&dispatcher.begin(&Command::LoadAll { generation: 3 }));
        assert_eq!(effects.len(), 2);

        let snapshots = b"tank@a\t0B\t96K\tThu Feb 27 10:30 2025\n";
        assert_eq!(dispatcher.complete(Some(0), snapshots, b"", &effects[0].1), None);

        let event = dispatcher.complete(Some(0), b"tank\n", b"", &effects[1].1);
        let Some(Event::RecordsLoaded {
            generation,
            records,
            containers,
        }) = event
        else {
            panic!("expected RecordsLoaded, got {event:?}");
        };
        assert_eq!(generation, 3);
        assert_eq!(records.len(), 1);
        assert_eq!(containers, vec!["tank"]);
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[test]
    fn dataset_failure_degrades_to_empty_list() {
        let mut dispatcher = Dispatcher::default();
        let effects = runs(&dispatcher.begin(&Command::LoadAll { generation: 1 }));
        dispatcher.complete(Some(1), b"", b"boom", &effects[1].1);
        let event = dispatcher.complete(Some(0), b"", b"", &effects[0].1);
        assert!(matches!(
            event,
            Some(Event::RecordsLoaded { ref containers, .. }) if containers.is_empty()
        ));
    }

    #[test]
    fn snapshot_failure_fails_the_load() {
        let mut dispatcher = Dispatcher::default();
        let effects = runs(&dispatcher.begin(&Command::LoadAll { generation: 2 }));
        dispatcher.complete(Some(0), b"tank\n", b"", &effects[1].1);
        let event = dispatcher.complete(Some(1), b"", b"no such pool\n", &effects[0].1);
        assert_eq!(
            event,
            Some(Event::LoadFailed {
                generation: 2,
                message: "Failed to list snapshots: no such pool".into()
            })
        );
    }

    #[test]
    fn destroy_collects_every_slot_in_order() {
        let mut dispatcher = Dispatcher::default();
        let identities = vec!["tank@a".to_string(), "tank@b".to_string(), "tank@a".to_string()];
        let effects = runs(&dispatcher.begin(&Command::DestroyAll { identities }));
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[1].0.last().map(String::as_str), Some("tank@b"));

        assert_eq!(dispatcher.complete(Some(0), b"", b"", &effects[2].1), None);
        assert_eq!(
            dispatcher.complete(Some(1), b"", b"permission denied", &effects[0].1),
            None
        );
        let event = dispatcher.complete(Some(0), b"", b"", &effects[1].1);
        assert_eq!(
            event,
            Some(Event::DestroyFinished {
                outcomes: vec![
                    DestroyOutcome::failed("tank@a", "permission denied"),
                    DestroyOutcome::ok("tank@b"),
                    DestroyOutcome::ok("tank@a"),
                ]
            })
        );
    }

    #[test]
    fn create_reports_stderr() {
        let mut dispatcher = Dispatcher::new(ZfsCli::new("sudo -n zfs"));
        let effects = runs(&dispatcher.begin(&Command::Create {
            identity: "tank@new".into(),
        }));
        assert_eq!(effects[0].0, vec!["sudo", "-n", "zfs", "snapshot", "tank@new"]);
        let event = dispatcher.complete(Some(1), b"", b"dataset already exists\n", &effects[0].1);
        assert_eq!(
            event,
            Some(Event::CreateFinished {
                identity: "tank@new".into(),
                result: Err("dataset already exists".into())
            })
        );
    }

    #[test]
    fn foreign_results_are_ignored() {
        let mut dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.complete(Some(0), b"", b"", &BTreeMap::new()), None);
    }

    #[test]
    fn health_goes_to_worker_through_host_mount() {
        let mut dispatcher = Dispatcher::default();
        let effects = dispatcher.begin(&Command::LoadHealth {
            path: "/var/lib/zfsguard/health-report.json".into(),
            generation: 5,
        });
        assert!(matches!(
            effects.as_slice(),
            [Effect::Worker(WorkerMessage::LoadReport { path, generation: 5, .. })]
                if path == "/host/var/lib/zfsguard/health-report.json"
        ));
    }

    #[test]
    fn timers_fire_in_arming_order() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.schedule_expiry(1);
        dispatcher.schedule_expiry(2);
        assert_eq!(dispatcher.timer_fired(), Some(Event::StatusExpired { seq: 1 }));
        assert_eq!(dispatcher.timer_fired(), Some(Event::StatusExpired { seq: 2 }));
        assert_eq!(dispatcher.timer_fired(), None);
    }
}
