//! Frame-level rendering checks through the public API.

use zfsguard::app::Key;
use zfsguard::ui::render;
use zfsguard::worker::WorkerResponse;
use zfsguard::{handle_event, initialize, AppState, Config, Event, Snapshot};

fn loaded(names: &[String]) -> AppState {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::Started).unwrap();
    handle_event(
        &mut state,
        &Event::RecordsLoaded {
            generation: 1,
            records: names
                .iter()
                .map(|n| Snapshot::new(n, "12K", "96K", None))
                .collect(),
            containers: vec!["tank".into()],
        },
    )
    .unwrap();
    state
}

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("tank@snap-{i:02}")).collect()
}

#[test]
fn frame_never_exceeds_the_surface() {
    let state = loaded(&numbered(40));
    for rows in [1, 5, 12, 24, 60] {
        assert!(render(&state, rows, 80).lines.len() <= rows);
    }
}

#[test]
fn long_names_are_truncated_with_ellipsis() {
    let long = format!("tank/{}@daily", "very-long-dataset-name-".repeat(4));
    let state = loaded(&[long.clone()]);
    let lines = render(&state, 24, 80).plain_lines();

    assert!(lines.iter().all(|l| !l.contains(&long)));
    assert!(lines.iter().any(|l| l.contains("tank/very-long") && l.contains("...")));
}

#[test]
fn scroll_indicator_appears_only_when_needed() {
    let lines = render(&loaded(&numbered(40)), 24, 80).plain_lines();
    assert!(lines.iter().any(|l| l.contains("[1-18 of 40] 0%")));

    let lines = render(&loaded(&numbered(5)), 24, 80).plain_lines();
    assert!(lines.iter().all(|l| !l.contains(" of 5]")));
}

#[test]
fn error_banner_is_the_last_line_even_when_cramped() {
    let mut state = loaded(&numbered(40));
    handle_event(
        &mut state,
        &Event::LoadFailed {
            generation: 1,
            message: "zfs: command not found".into(),
        },
    )
    .unwrap();

    for rows in [3, 24] {
        let lines = render(&state, rows, 80).plain_lines();
        assert_eq!(
            lines.last().map(|l| l.trim()),
            Some("Error: zfs: command not found")
        );
    }
}

#[test]
fn error_banner_never_hides_the_cursor_row() {
    let mut state = loaded(&numbered(40));
    handle_event(&mut state, &Event::Resize { rows: 24, cols: 80 }).unwrap();
    for _ in 0..17 {
        handle_event(&mut state, &Event::Key(Key::Down)).unwrap();
    }
    handle_event(
        &mut state,
        &Event::LoadFailed {
            generation: 1,
            message: "zfs: command not found".into(),
        },
    )
    .unwrap();

    assert_eq!(state.viewport_height(), 17);
    assert!(state.cursor < state.offset + state.viewport_height());

    let lines = render(&state, 24, 80).plain_lines();
    assert!(lines.iter().any(|l| l.contains("tank@snap-17")));
    assert!(lines.iter().any(|l| l.contains("[2-18 of 40]")));
}

#[test]
fn help_toggles_between_legend_and_panel() {
    let mut state = loaded(&numbered(3));
    let short = render(&state, 24, 100).plain_lines();
    assert!(short.iter().all(|l| !l.contains("Key bindings")));

    handle_event(&mut state, &Event::Key(Key::Char('?'))).unwrap();
    let full = render(&state, 24, 100).plain_lines();
    assert!(full.iter().any(|l| l.contains("Key bindings")));
    assert!(full.iter().any(|l| l.contains("delete ALL snapshots")));
}

#[test]
fn empty_store_invites_creation() {
    let state = loaded(&[]);
    let lines = render(&state, 24, 80).plain_lines();
    assert!(lines
        .iter()
        .any(|l| l.contains("No snapshots found. Press 'c' to create one.")));
}

#[test]
fn selection_marks_follow_the_store() {
    let mut state = loaded(&numbered(3));
    handle_event(&mut state, &Event::Key(Key::Char('x'))).unwrap();
    let lines = render(&state, 24, 80).plain_lines();

    assert!(lines.iter().any(|l| l.contains("[x]") && l.contains("tank@snap-00")));
    assert!(lines.iter().any(|l| l.contains("[ ]") && l.contains("tank@snap-01")));
    assert!(lines.iter().any(|l| l.contains("3 snapshots | 1 selected")));
}

#[test]
fn health_view_colours_unhealthy_pool_and_keeps_raw_block() {
    let mut state = loaded(&[]);
    handle_event(&mut state, &Event::Key(Key::Char('h'))).unwrap();
    let report = serde_json::from_str(
        r#"{
            "timestamp": "2025-02-27T10:30:00Z",
            "pools": [{
                "name": "tank",
                "state": "DEGRADED",
                "errors": "2 data errors",
                "raw": "  pool: tank\n state: DEGRADED"
            }],
            "disks": []
        }"#,
    )
    .unwrap();
    handle_event(
        &mut state,
        &Event::WorkerResponse(WorkerResponse::ReportLoaded {
            generation: 1,
            report,
        }),
    )
    .unwrap();

    let lines = render(&state, 60, 100).plain_lines();
    assert!(lines.iter().any(|l| l.contains("DEGRADED")));
    assert!(lines.iter().any(|l| l.contains("  pool: tank")));
    assert!(lines.iter().any(|l| l.contains("Last check: 2025-02-27 10:30:00")));
}

#[test]
fn missing_report_offers_retry() {
    let mut state = loaded(&[]);
    handle_event(&mut state, &Event::Key(Key::Char('h'))).unwrap();
    handle_event(
        &mut state,
        &Event::WorkerResponse(WorkerResponse::ReportUnavailable {
            generation: 1,
            message: "No such file or directory".into(),
        }),
    )
    .unwrap();

    let lines = render(&state, 40, 100).plain_lines();
    assert!(lines.iter().any(|l| l.contains("No such file or directory")));
    assert!(lines.iter().any(|l| l.contains("'r'")));
}

#[test]
fn delete_all_dialog_keeps_the_store_counts() {
    let mut state = loaded(&numbered(3));
    handle_event(&mut state, &Event::Key(Key::Char('D'))).unwrap();
    let lines = render(&state, 24, 80).plain_lines();
    assert!(lines.iter().any(|l| l.contains("3 snapshots | 0 selected")));
    assert!(lines.iter().any(|l| l.contains("DELETE ALL 3 SNAPSHOTS?")));
}
