//! HTML fragment for the access widget
//!
//! The markup lives in `templates/access.html.tera` and follows the admin
//! panel's table conventions. Checkboxes and the chooser carry
//! `data-group` / `data-permission` attributes so the hosting page can route
//! clicks back as [`AccessEvent`](crate::event::AccessEvent)s. Besides the
//! mode radios, only the two hidden multi-selects are named, so checkbox
//! clicks never reach the surrounding form directly.

use indexmap::IndexMap;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::Labels;
use crate::constants::*;
use crate::error::Result;
use crate::grants::Permission;
use crate::group::{Group, GroupId};
use crate::mode::Mode;
use crate::state::AccessGrantState;

const TEMPLATE_NAME: &str = "access.html";
const TEMPLATE: &str = include_str!("../templates/access.html.tera");

// ============================================================================
// Template context
// ============================================================================

#[derive(Debug, Serialize)]
struct Row<'a> {
    id: &'a GroupId,
    name: &'a str,
    description: &'a str,
    checks: [Check; 2],
}

#[derive(Debug, Serialize)]
struct Check {
    permission: Permission,
    checked: bool,
    locked: bool,
}

#[derive(Debug, Serialize)]
struct Choice<'a> {
    id: &'a GroupId,
    name: &'a str,
    selected: bool,
}

/// One hidden multi-select over the whole directory
#[derive(Debug, Serialize)]
struct HiddenInput<'a> {
    name: &'static str,
    options: Vec<Choice<'a>>,
}

// ============================================================================
// Renderer
// ============================================================================

/// Compiled widget template.
pub struct WidgetRenderer {
    tera: Tera,
}

impl WidgetRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera })
    }

    /// Render the whole widget for the current state.
    pub fn render(&self, state: &AccessGrantState, labels: &Labels) -> Result<String> {
        let context = prepare_context(state, labels);
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Render the widget with a freshly compiled template
pub fn render_widget(state: &AccessGrantState, labels: &Labels) -> Result<String> {
    WidgetRenderer::new()?.render(state, labels)
}

fn prepare_context(state: &AccessGrantState, labels: &Labels) -> Context {
    let readonly = !state.is_editable();
    let mut context = Context::new();

    context.insert("labels", &label_texts(labels));
    context.insert("mode_field", MODE_FIELD);
    context.insert("managed_value", MODE_MANAGED_HERE);
    context.insert("inherited_value", MODE_INHERITED);
    context.insert("managed", &(state.mode() == Mode::ManagedHere));
    context.insert("can_inherit", &state.can_inherit());
    context.insert("parent", &state.parent());
    context.insert("editable", &state.is_editable());

    let rows: Vec<Row> = state
        .granted_groups()
        .map(|group| Row {
            id: &group.id,
            name: &group.name,
            description: &group.description,
            checks: [
                Check { permission: Permission::View, checked: state.can_view(&group.id), locked: readonly },
                Check {
                    permission: Permission::Edit,
                    checked: state.can_edit(&group.id),
                    locked: readonly || state.is_edit_disabled(&group.id),
                },
            ],
        })
        .collect();
    context.insert("rows", &rows);

    let choices: Vec<Choice> = state
        .selectable()
        .map(|group| choice(group, state.selected_group() == Some(&group.id)))
        .collect();
    context.insert("chooser_disabled", &(state.selectable_count() == 0));
    context.insert("choices", &choices);

    let hidden = [
        hidden_input(state, VIEW_FIELD, state.view_output()),
        hidden_input(state, EDIT_FIELD, state.edit_output()),
    ];
    context.insert("hidden", &hidden);
    context
}

// Every known label key resolves, falling back to the key itself.
fn label_texts(labels: &Labels) -> IndexMap<&str, &str> {
    LABEL_KEYS.iter().map(|key| (*key, labels.get(key))).collect()
}

fn choice(group: &Group, selected: bool) -> Choice<'_> {
    Choice { id: &group.id, name: &group.name, selected }
}

// Options cover the whole directory; the submitted grants are the selected ones.
fn hidden_input<'a>(state: &'a AccessGrantState, name: &'static str, selected: &[GroupId]) -> HiddenInput<'a> {
    let options = state.directory().iter().map(|group| choice(group, selected.contains(&group.id))).collect();
    HiddenInput { name, options }
}

// ============================================================================
// Tests
// ============================================================================
