//! Replay tests
//!
//! These tests drive the replay path the `pagegrant` binary uses: access
//! data and an event log on disk, printed in each output format.

use std::fs;
use std::path::PathBuf;

use pagegrant::replay::{read_events, replay};
use pagegrant::{AccessError, GroupId, OutputFormat, Submission};
use tempfile::TempDir;

const DATA: &str = r#"{
    "groupInfo": {"1": "Admins", "2": "Editors", "3": "Guests"},
    "viewGroups": {"1": true},
    "editGroups": {"1": false}
}"#;

const EVENTS: &str = r#"{"type": "grant_new_group", "group": "3"}

{"type": "toggle_edit", "group": "3", "value": true}
{"type": "toggle_view", "group": "1", "value": false}
"#;

struct Fixture {
    _dir: TempDir,
    config: PathBuf,
    events: PathBuf,
}

fn fixture(events: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("access.json");
    let log = dir.path().join("events.jsonl");
    fs::write(&config, DATA).unwrap();
    fs::write(&log, events).unwrap();
    Fixture { _dir: dir, config, events: log }
}

// ============================================================================
// Output Formats
// ============================================================================

/// Verify form output lists view pairs then edit pairs after replay
#[test]
fn form_output_after_replay() {
    let f = fixture(EVENTS);
    let out = replay(&f.config, Some(f.events.as_path()), OutputFormat::Form).unwrap();
    assert_eq!(out, "view_groups[]=3\nedit_groups[]=3\n");
}

/// Verify JSON output is the submission payload
#[test]
fn json_output_is_submission() {
    let f = fixture(EVENTS);
    let out = replay(&f.config, Some(f.events.as_path()), OutputFormat::Json).unwrap();
    let submission: Submission = serde_json::from_str(&out).unwrap();

    assert_eq!(submission.view_groups, vec![GroupId::new("3")]);
    assert_eq!(submission.edit_groups, vec![GroupId::new("3")]);
}

/// Verify html output without an event log renders the initial state
#[test]
fn html_output_without_events() {
    let f = fixture("");
    let out = replay(&f.config, None, OutputFormat::Html).unwrap();

    assert!(out.contains("<tr data-group=\"1\">"));
    assert!(out.contains("<option value=\"1\" selected=\"selected\">Admins</option>"));
    assert_eq!(OutputFormat::default(), OutputFormat::Html);
}

// ============================================================================
// Failures
// ============================================================================

/// Verify a malformed event line is reported with its line number
#[test]
fn bad_event_line_is_numbered() {
    let f = fixture("{\"type\": \"grant_new_group\", \"group\": \"3\"}\n{\"type\": \"toggle_edit\"}\n");

    match read_events(&f.events) {
        Err(AccessError::Event(msg)) => assert!(msg.starts_with("line 2:"), "{}", msg),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        replay(&f.config, Some(f.events.as_path()), OutputFormat::Form),
        Err(AccessError::Event(_))
    ));
}

/// Verify a rejected event stops the replay
#[test]
fn rejected_event_stops_replay() {
    let f = fixture("{\"type\": \"toggle_edit\", \"group\": \"2\", \"value\": true}\n");
    let result = replay(&f.config, Some(f.events.as_path()), OutputFormat::Form);
    assert!(matches!(result, Err(AccessError::NotGranted(id)) if id.as_str() == "2"));
}

/// Verify a missing event log is an I/O error
#[test]
fn missing_event_log() {
    let f = fixture("");
    let absent = f.config.with_file_name("absent.jsonl");
    assert!(matches!(replay(&f.config, Some(absent.as_path()), OutputFormat::Html), Err(AccessError::Io(_))));
}
