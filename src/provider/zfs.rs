//! `zfs` command line: argv builders and output parsers.
//!
//! Commands are executed by the plugin host (`run_command`), so this module
//! never spawns anything. It only knows how to spell each invocation and how
//! to read the tab-separated `-H` output back.

use crate::domain::Snapshot;
use chrono::NaiveDateTime;

/// Snapshot listing columns, in output order.
const SNAPSHOT_COLUMNS: &str = "name,used,refer,creation";

/// Creation time layouts `zfs` prints, after whitespace normalization.
const CREATION_FORMATS: [&str; 3] = [
    "%a %b %d %H:%M %Y",
    "%a %b %d %H:%M:%S %Y",
    "%a %b %e %H:%M %Y",
];

/// Builds argument vectors for the `zfs` invocations the plugin needs.
///
/// The program prefix is configurable so privileged setups can run, for
/// example, `sudo -n zfs`.
///
/// # Examples
///
/// ```
/// use zfsguard::provider::ZfsCli;
///
/// let cli = ZfsCli::new("sudo -n zfs");
/// assert_eq!(cli.destroy("tank@old"), vec!["sudo", "-n", "zfs", "destroy", "tank@old"]);
///
/// let plain = ZfsCli::new("  ");
/// assert_eq!(plain.snapshot("tank@new"), vec!["zfs", "snapshot", "tank@new"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZfsCli {
    program: Vec<String>,
}

impl Default for ZfsCli {
    fn default() -> Self {
        Self::new("zfs")
    }
}

impl ZfsCli {
    #[must_use]
    pub fn new(command: &str) -> Self {
        let program: Vec<String> = command.split_whitespace().map(String::from).collect();
        if program.is_empty() {
            return Self {
                program: vec!["zfs".to_string()],
            };
        }
        Self { program }
    }

    fn with(&self, args: &[&str]) -> Vec<String> {
        self.program
            .iter()
            .cloned()
            .chain(args.iter().map(|a| (*a).to_string()))
            .collect()
    }

    /// `zfs list -t snapshot -H -o name,used,refer,creation -s creation`
    #[must_use]
    pub fn list_snapshots(&self) -> Vec<String> {
        self.with(&[
            "list",
            "-t",
            "snapshot",
            "-H",
            "-o",
            SNAPSHOT_COLUMNS,
            "-s",
            "creation",
        ])
    }

    /// `zfs list -H -o name`
    #[must_use]
    pub fn list_datasets(&self) -> Vec<String> {
        self.with(&["list", "-H", "-o", "name"])
    }

    #[must_use]
    pub fn snapshot(&self, identity: &str) -> Vec<String> {
        self.with(&["snapshot", identity])
    }

    #[must_use]
    pub fn destroy(&self, identity: &str) -> Vec<String> {
        self.with(&["destroy", identity])
    }
}

/// Parses `zfs list -t snapshot -H -o name,used,refer,creation` output.
///
/// Blank lines and lines with fewer than four tab-separated fields are skipped.
/// The creation column is the rest of the line; an unrecognized date leaves
/// `created` empty rather than dropping the row.
///
/// # Examples
///
/// ```
/// use zfsguard::provider::zfs::parse_snapshots;
///
/// let out = "tank/home@daily\t1.2M\t40G\tThu Feb 27 10:30 2025\n";
/// let snaps = parse_snapshots(out);
/// assert_eq!(snaps[0].dataset, "tank/home");
/// assert_eq!(snaps[0].created_label(), "2025-02-27 10:30");
/// ```
#[must_use]
pub fn parse_snapshots(output: &str) -> Vec<Snapshot> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.splitn(4, '\t');
            let name = parts.next()?.trim();
            let used = parts.next()?.trim();
            let refer = parts.next()?.trim();
            let creation = parts.next()?.trim();
            Some(Snapshot::new(name, used, refer, parse_creation(creation)))
        })
        .collect()
}

/// Parses `zfs list -H -o name` output into dataset names.
#[must_use]
pub fn parse_datasets(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a `zfs` creation string such as `Thu Feb 27 10:30 2025` or
/// `Mon Jan  2 15:04 2006`.
#[must_use]
pub fn parse_creation(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    CREATION_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
}

/// Error text for a failed invocation: stderr when present, otherwise the exit status.
#[must_use]
pub fn failure_message(exit_code: Option<i32>, stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    exit_code.map_or_else(
        || "terminated without an exit status".to_string(),
        |code| format!("exit status {code}"),
    )
}
