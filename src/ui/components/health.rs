//! Health report component.
//!
//! Builds the full list of report lines; the caller windows it by the health
//! scroll offset. Pool and disk entries are colored by state, and each
//! entry's raw command output is reproduced verbatim between rules.

use crate::app::HealthState;
use crate::domain::{DiskReport, HealthReport, PoolReport};
use crate::ui::helpers::{pad, rule};
use crate::ui::theme::Role;
use crate::ui::viewmodel::Line;
use chrono::{DateTime, TimeDelta, Utc};

/// Raw output rules never grow past this width.
pub const MAX_RAW_RULE_WIDTH: usize = 80;

const POOL_NAME_WIDTH: usize = 20;
const DEVICE_WIDTH: usize = 16;

/// Every line of the health view for `health` at `cols` columns.
#[must_use]
pub fn report_lines(health: &HealthState, cols: usize) -> Vec<Line> {
    if health.loading && health.report.is_none() {
        return vec![
            Line::blank(),
            Line::styled(Role::Dim, "  Loading health report..."),
        ];
    }

    let Some(report) = &health.report else {
        return unavailable_lines(health.error.as_deref());
    };

    let mut lines = vec![Line::blank()];
    if let Some(error) = &health.error {
        lines.push(Line::styled(
            Role::Unhealthy,
            format!("  Refresh failed, showing last report: {error}"),
        ));
    }
    if health.loading {
        lines.push(Line::styled(Role::Dim, "  Refreshing..."));
    }
    lines.push(Line::styled(
        Role::Dim,
        format!(
            "  Last check: {}{}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S"),
            health
                .received_at
                .map(|at| format!(" ({} ago)", format_age(age(report, at))))
                .unwrap_or_default()
        ),
    ));
    lines.push(Line::blank());

    let raw_rule = rule(cols.saturating_sub(4).min(MAX_RAW_RULE_WIDTH));

    lines.push(Line::styled(Role::HealthTitle, "  ZFS Pool Health"));
    lines.push(Line::blank());
    if let Some(error) = &report.pool_error {
        lines.push(Line::styled(Role::Unhealthy, format!("  Error: {error}")));
        lines.push(Line::blank());
    } else if report.pools.is_empty() {
        lines.push(Line::styled(Role::Dim, "  No pools found."));
        lines.push(Line::blank());
    }
    for pool in &report.pools {
        pool_lines(&mut lines, pool, &raw_rule);
    }

    lines.push(Line::styled(Role::HealthTitle, "  SMART Disk Health"));
    lines.push(Line::blank());
    if let Some(error) = &report.disk_error {
        lines.push(Line::styled(Role::Unhealthy, format!("  Error: {error}")));
        lines.push(Line::blank());
    } else if report.disks.is_empty() {
        lines.push(Line::styled(Role::Dim, "  No disks found."));
        lines.push(Line::blank());
    }
    for disk in &report.disks {
        disk_lines(&mut lines, disk, &raw_rule);
    }

    lines.push(Line::styled(
        Role::Dim,
        "  Press 'r' to refresh | 'h'/Esc to go back",
    ));
    lines
}

fn unavailable_lines(error: Option<&str>) -> Vec<Line> {
    let mut lines = vec![
        Line::blank(),
        Line::styled(Role::Unhealthy, "  No health report available."),
    ];
    if let Some(error) = error {
        lines.push(Line::styled(Role::Dim, format!("  {error}")));
    }
    lines.extend([
        Line::blank(),
        Line::styled(Role::Label, "  Ensure the zfsguard-monitor service is running"),
        Line::styled(Role::Label, "  and has completed at least one health check cycle."),
        Line::blank(),
        Line::styled(Role::Dim, "  Press 'r' to retry | 'h'/Esc to go back"),
    ]);
    lines
}

fn pool_lines(lines: &mut Vec<Line>, pool: &PoolReport, raw_rule: &str) {
    let state_role = if pool.is_online() {
        Role::Healthy
    } else {
        Role::Unhealthy
    };
    lines.push(
        Line::styled(Role::Label, format!("  {} ", pad(&pool.name, POOL_NAME_WIDTH)))
            .push(state_role, pool.state.clone()),
    );

    let errors_role = if pool.has_errors() {
        Role::Unhealthy
    } else {
        Role::Dim
    };
    lines.push(
        Line::styled(Role::Label, format!("  {} ", pad("", POOL_NAME_WIDTH)))
            .push(errors_role, format!("Errors: {}", pool.error_summary())),
    );

    raw_block(lines, &format!("zpool status {}", pool.name), &pool.raw, raw_rule);
    lines.push(Line::blank());
}

fn disk_lines(lines: &mut Vec<Line>, disk: &DiskReport, raw_rule: &str) {
    let (verdict, role) = if disk.healthy {
        ("HEALTHY", Role::Healthy)
    } else {
        ("UNHEALTHY", Role::Unhealthy)
    };
    lines.push(
        Line::styled(Role::Label, format!("  {} ", pad(&disk.device, DEVICE_WIDTH)))
            .push(role, verdict)
            .push(Role::Value, format!("  {}", disk.summary)),
    );

    raw_block(lines, &format!("smartctl -H {}", disk.device), &disk.raw, raw_rule);
    lines.push(Line::blank());
}

fn raw_block(lines: &mut Vec<Line>, command: &str, raw: &str, raw_rule: &str) {
    let raw = raw.trim_end();
    if raw.is_empty() {
        return;
    }
    lines.push(Line::blank());
    lines.push(Line::styled(
        Role::Label,
        format!("  Detailed status ({command}):"),
    ));
    lines.push(Line::styled(Role::Dim, format!("  {raw_rule}")));
    for raw_line in raw.lines() {
        lines.push(Line::styled(Role::Value, format!("  {raw_line}")));
    }
    lines.push(Line::styled(Role::Dim, format!("  {raw_rule}")));
}

fn age(report: &HealthReport, received_at: DateTime<Utc>) -> TimeDelta {
    received_at.signed_duration_since(report.timestamp)
}

/// Formats an age as `1h2m3s`, dropping leading zero units.
///
/// Negative ages (clock skew between monitor and viewer) count as zero.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use zfsguard::ui::components::health::format_age;
///
/// assert_eq!(format_age(TimeDelta::seconds(42)), "42s");
/// assert_eq!(format_age(TimeDelta::seconds(3725)), "1h2m5s");
/// assert_eq!(format_age(TimeDelta::seconds(-5)), "0s");
/// ```
#[must_use]
pub fn format_age(age: TimeDelta) -> String {
    let total = age.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> HealthReport {
        serde_json::from_str(json).unwrap()
    }

    fn texts(health: &HealthState) -> Vec<String> {
        report_lines(health, 100).iter().map(Line::text).collect()
    }

    fn line_with<'a>(lines: &'a [Line], needle: &str) -> &'a Line {
        lines
            .iter()
            .find(|l| l.text().contains(needle))
            .unwrap_or_else(|| panic!("no line containing {needle}"))
    }

    #[test]
    fn loading_without_report() {
        let health = HealthState {
            loading: true,
            ..HealthState::default()
        };
        assert!(texts(&health).contains(&"  Loading health report...".to_string()));
    }

    #[test]
    fn unavailable_shows_reason_and_retry_hint() {
        let health = HealthState {
            error: Some("failed to read health report /host/x: not found".into()),
            ..HealthState::default()
        };
        let lines = texts(&health);
        assert!(lines.contains(&"  No health report available.".to_string()));
        assert!(lines.iter().any(|l| l.contains("not found")));
        assert!(lines.iter().any(|l| l.contains("'r' to retry")));
    }

    #[test]
    fn degraded_pool_is_colored_unhealthy() {
        let health = HealthState {
            report: Some(report(
                r#"{"timestamp":"2025-02-27T10:30:00Z",
                    "pools":[
                        {"name":"tank","state":"ONLINE","errors":"No known data errors","raw":""},
                        {"name":"backup","state":"DEGRADED","errors":"2 data errors","raw":"  pool: backup\n state: DEGRADED\n"}
                    ],
                    "disks":[{"device":"/dev/sda","healthy":false,"summary":"FAILING_NOW","raw":""}]}"#,
            )),
            ..HealthState::default()
        };
        let lines = report_lines(&health, 100);

        let tank = line_with(&lines, "tank");
        assert_eq!(tank.spans[1].role, Role::Healthy);
        let backup = line_with(&lines, "DEGRADED");
        assert_eq!(backup.spans[1].role, Role::Unhealthy);
        assert_eq!(line_with(&lines, "2 data errors").spans[1].role, Role::Unhealthy);
        assert_eq!(line_with(&lines, "No known data errors").spans[1].role, Role::Dim);

        assert!(lines.iter().any(|l| l.text() == "  Detailed status (zpool status backup):"));
        assert!(lines.iter().any(|l| l.text() == "   state: DEGRADED"));
        assert_eq!(line_with(&lines, "/dev/sda").spans[1].text, "UNHEALTHY");
    }

    #[test]
    fn pool_error_replaces_pool_list() {
        let health = HealthState {
            report: Some(report(
                r#"{"timestamp":"2025-02-27T10:30:00Z","pools":null,"disks":null,"pool_error":"zpool: not found"}"#,
            )),
            ..HealthState::default()
        };
        let lines = texts(&health);
        assert!(lines.contains(&"  Error: zpool: not found".to_string()));
        assert!(!lines.contains(&"  No pools found.".to_string()));
        assert!(lines.contains(&"  No disks found.".to_string()));
    }

    #[test]
    fn stale_report_is_kept_with_banner() {
        let health = HealthState {
            report: Some(report(r#"{"timestamp":"2025-02-27T10:30:00Z","pools":[],"disks":[]}"#)),
            error: Some("permission denied".into()),
            ..HealthState::default()
        };
        let lines = texts(&health);
        assert!(lines[1].starts_with("  Refresh failed"));
        assert!(lines.iter().any(|l| l.starts_with("  Last check: 2025-02-27 10:30:00")));
    }
}
