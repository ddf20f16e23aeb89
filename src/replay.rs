//! Replaying recorded interactions against a widget's access data
//!
//! Backs the `pagegrant` binary: load access data, apply a JSON-lines event
//! log, and print the widget, the submission JSON, or the posted form fields.

use std::path::Path;

use tracing::info;

use crate::config::{AccessData, Labels};
use crate::error::{AccessError, Result};
use crate::event::AccessEvent;
use crate::render::render_widget;
use crate::state::AccessGrantState;

/// What to print after replaying
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Rendered widget fragment
    #[default]
    Html,
    /// Submission payload
    Json,
    /// `name=value` lines as the page form would post them
    Form,
}

/// Parse JSON-lines events. Blank lines are skipped; errors name the line.
pub fn parse_events(raw: &str) -> Result<Vec<AccessEvent>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str::<AccessEvent>(line)
                .map_err(|e| AccessError::Event(format!("line {}: {}", n + 1, e)))
        })
        .collect()
}

pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<AccessEvent>> {
    parse_events(&std::fs::read_to_string(path)?)
}

/// Load access data, apply the optional event log, and format the result.
pub fn replay(config: &Path, events: Option<&Path>, format: OutputFormat) -> Result<String> {
    let (mut state, labels) = AccessData::from_path(config)?.into_parts()?;

    if let Some(path) = events {
        let events = read_events(path)?;
        let applied = state.apply_all(&events)?;
        info!(applied, "replayed events");
    }

    format_output(&state, &labels, format)
}

pub fn format_output(state: &AccessGrantState, labels: &Labels, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => render_widget(state, labels)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&state.submission())?;
            json.push('\n');
            json
        }
        OutputFormat::Form => state
            .submission()
            .form_fields()
            .into_iter()
            .map(|(name, value)| format!("{}={}\n", name, value))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events_skips_blank_lines() {
        let events = parse_events("\n{\"type\": \"grant_new_group\", \"group\": \"1\"}\n   \n").unwrap();
        assert_eq!(events, vec![AccessEvent::GrantNewGroup { group: "1".into() }]);
    }

    #[test]
    fn test_parse_events_names_bad_line() {
        let err = parse_events("{\"type\": \"grant_new_group\", \"group\": \"1\"}\n\n{\"type\": \"shrug\"}").unwrap_err();
        match err {
            AccessError::Event(msg) => assert!(msg.starts_with("line 3:"), "{}", msg),
            other => panic!("unexpected error: {}", other),
        }
    }
}
