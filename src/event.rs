//! Operator interactions as explicit commands
//!
//! Hosts that route widget interactions generically (an event queue, a
//! recorded session, the CLI) send these instead of calling the state's
//! methods one by one.

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, Result};
use crate::group::GroupId;
use crate::mode::Mode;
use crate::state::AccessGrantState;

/// One interaction with the widget.
///
/// JSON form is internally tagged, e.g.
/// `{"type": "toggle_edit", "group": "3", "value": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessEvent {
    /// Manage-here / inherit radio changed
    SetMode { mode: Mode },
    /// Group picked in the add-group chooser
    GrantNewGroup { group: GroupId },
    /// View checkbox clicked
    ToggleView { group: GroupId, value: bool },
    /// Edit checkbox clicked
    ToggleEdit { group: GroupId, value: bool },
}

impl AccessEvent {
    /// Parse one JSON event
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| AccessError::Event(e.to_string()))
    }
}

impl AccessGrantState {
    /// Run the command handler matching an event.
    pub fn apply(&mut self, event: &AccessEvent) -> Result<()> {
        match event {
            AccessEvent::SetMode { mode } => self.set_mode(*mode),
            AccessEvent::GrantNewGroup { group } => self.grant_new_group(group),
            AccessEvent::ToggleView { group, value } => self.toggle_view(group, *value),
            AccessEvent::ToggleEdit { group, value } => self.toggle_edit(group, *value),
        }
    }

    /// Apply events in order, stopping at the first failure.
    pub fn apply_all<'a, I>(&mut self, events: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a AccessEvent>,
    {
        let mut applied = 0;
        for event in events {
            self.apply(event)?;
            applied += 1;
        }
        Ok(applied)
    }
}
