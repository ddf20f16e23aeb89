//! Event dispatch and chooser selection tests
//!
//! These tests drive the state through `AccessEvent`s the way a hosting
//! page forwards widget interactions.

use pagegrant::{AccessData, AccessError, AccessEvent, AccessGrantState, GroupId, Mode, Permission};

fn id(s: &str) -> GroupId {
    GroupId::new(s)
}

fn ids(list: &[GroupId]) -> Vec<&str> {
    list.iter().map(GroupId::as_str).collect()
}

fn state() -> AccessGrantState {
    AccessData::from_json(
        r#"{
            "groupInfo": {"1": "Admins", "2": "Editors", "3": "Guests"},
            "inheritedViewGroups": {"3": true},
            "inheritPage": {"title": "Home", "path": "/"}
        }"#,
    )
    .unwrap()
    .into_state()
    .unwrap()
}

// ============================================================================
// Event Decoding
// ============================================================================

/// Verify the tagged JSON form of each event
#[test]
fn decode_events() {
    assert_eq!(
        AccessEvent::from_json(r#"{"type": "grant_new_group", "group": "2"}"#).unwrap(),
        AccessEvent::GrantNewGroup { group: id("2") }
    );
    assert_eq!(
        AccessEvent::from_json(r#"{"type": "toggle_edit", "group": "2", "value": true}"#).unwrap(),
        AccessEvent::ToggleEdit { group: id("2"), value: true }
    );
    assert_eq!(
        AccessEvent::from_json(r#"{"type": "toggle_view", "group": "2", "value": false}"#).unwrap(),
        AccessEvent::ToggleView { group: id("2"), value: false }
    );
    assert_eq!(
        AccessEvent::from_json(r#"{"type": "set_mode", "mode": "0"}"#).unwrap(),
        AccessEvent::SetMode { mode: Mode::Inherited }
    );
    assert_eq!(
        AccessEvent::from_json(r#"{"type": "set_mode", "mode": "managed_here"}"#).unwrap(),
        AccessEvent::SetMode { mode: Mode::ManagedHere }
    );
}

/// Verify malformed events are reported as event errors
#[test]
fn decode_rejects_malformed_events() {
    assert!(matches!(AccessEvent::from_json("{}"), Err(AccessError::Event(_))));
    assert!(matches!(
        AccessEvent::from_json(r#"{"type": "toggle_edit", "group": "2"}"#),
        Err(AccessError::Event(_))
    ));
    assert!(matches!(AccessEvent::from_json(r#"{"type": "delete_page"}"#), Err(AccessError::Event(_))));
}

// ============================================================================
// Dispatch
// ============================================================================

/// Verify applying events matches calling the handlers directly
#[test]
fn apply_matches_direct_calls() {
    let events = vec![
        AccessEvent::GrantNewGroup { group: id("2") },
        AccessEvent::GrantNewGroup { group: id("1") },
        AccessEvent::ToggleEdit { group: id("1"), value: true },
    ];
    let mut via_events = state();
    assert_eq!(via_events.apply_all(&events).unwrap(), 3);

    let mut direct = state();
    direct.grant_new_group(&id("2")).unwrap();
    direct.grant_new_group(&id("1")).unwrap();
    direct.set_permission(&id("1"), Permission::Edit, true).unwrap();

    assert_eq!(via_events.granted(), direct.granted());
    assert_eq!(via_events.submission(), direct.submission());
    assert_eq!(ids(&via_events.submission().view_groups), vec!["2", "1"]);
    assert_eq!(ids(&via_events.submission().edit_groups), vec!["1"]);
}

/// Verify replay stops at the first rejected event
#[test]
fn apply_all_stops_at_failure() {
    let events = vec![
        AccessEvent::GrantNewGroup { group: id("1") },
        AccessEvent::ToggleEdit { group: id("2"), value: true },
        AccessEvent::GrantNewGroup { group: id("3") },
    ];
    let mut state = state();
    assert!(matches!(state.apply_all(&events), Err(AccessError::NotGranted(_))));
    assert_eq!(ids(state.granted()), vec!["1"]);
}

/// Verify a mode event switches to the parent's grants
#[test]
fn mode_event_switches_display() {
    let mut state = state();
    state.apply(&AccessEvent::GrantNewGroup { group: id("1") }).unwrap();
    state.apply(&AccessEvent::SetMode { mode: Mode::Inherited }).unwrap();

    assert_eq!(ids(state.granted()), vec!["3"]);
    assert!(state.submission().is_empty());
}

// ============================================================================
// Chooser Selection
// ============================================================================

/// Verify committing a chooser selection grants the group and resets it
#[test]
fn commit_selection_grants_and_resets() {
    let mut state = state();
    state.select_group(&id("3")).unwrap();
    assert_eq!(state.selected_group(), Some(&id("3")));

    assert_eq!(state.commit_selection().unwrap(), Some(id("3")));
    assert_eq!(state.selected_group(), None);
    assert_eq!(ids(state.granted()), vec!["3"]);
    assert_eq!(state.selectable_count(), 2);
}

/// Verify committing with nothing chosen does nothing
#[test]
fn commit_without_selection() {
    let mut state = state();
    assert_eq!(state.commit_selection().unwrap(), None);
    assert!(state.granted().is_empty());
}

/// Verify granted groups cannot be chosen
#[test]
fn select_granted_group_rejected() {
    let mut state = state();
    state.grant_new_group(&id("1")).unwrap();
    assert!(matches!(state.select_group(&id("1")), Err(AccessError::NotSelectable(_))));
    assert!(matches!(state.select_group(&id("9")), Err(AccessError::UnknownGroup(_))));
    assert_eq!(state.selected_group(), None);
}

/// Verify a mode switch clears a pending selection
#[test]
fn mode_switch_clears_selection() {
    let mut state = state();
    state.select_group(&id("2")).unwrap();
    state.set_mode(Mode::Inherited).unwrap();
    assert_eq!(state.selected_group(), None);
}
