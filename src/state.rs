//! Grant state of one access widget.
//!
//! The state mirrors operator interactions into the page's own grant maps
//! and keeps three derived views in step with them:
//! - `granted`: groups with a view grant, in the order they were granted
//! - `selectable`: every other directory group, offered by the chooser
//! - the view/edit output lists submitted with the page form
//!
//! Every mutator is one complete transition: it updates the maps, the
//! partition, and the outputs before returning.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::{AccessError, Result};
use crate::grants::{GrantMap, Permission};
use crate::group::{Group, GroupDirectory, GroupId};
use crate::mode::{Mode, ParentPage};
use crate::submission::Submission;

/// A view map and an edit map belonging to the same page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantPair {
    pub view: GrantMap,
    pub edit: GrantMap,
}

impl GrantPair {
    pub fn new(view: GrantMap, edit: GrantMap) -> Self {
        GrantPair { view, edit }
    }

    /// Drop edit grants of groups without view access. Returns how many
    /// were dropped.
    fn drop_edit_without_view(&mut self) -> usize {
        let orphaned: Vec<GroupId> = self
            .edit
            .granted()
            .filter(|id| !self.view.is_granted(id))
            .cloned()
            .collect();
        for id in &orphaned {
            self.edit.remove(id);
        }
        orphaned.len()
    }
}

/// In-memory grant state for one rendered widget.
#[derive(Debug, Clone)]
pub struct AccessGrantState {
    directory: GroupDirectory,
    own: GrantPair,
    inherited: GrantPair,
    edit_disabled: GrantMap,
    mode: Mode,
    parent: Option<ParentPage>,

    granted: Vec<GroupId>,
    selectable: HashSet<GroupId>,
    selected: Option<GroupId>,
    view_output: Vec<GroupId>,
    edit_output: Vec<GroupId>,
}

impl AccessGrantState {
    /// Build the state and derive the display for the initial mode.
    ///
    /// Fails with [`AccessError::InheritWithoutParent`] when `mode` is
    /// [`Mode::Inherited`] and there is no parent page.
    pub fn new(
        directory: GroupDirectory,
        mut own: GrantPair,
        mut inherited: GrantPair,
        mode: Mode,
        parent: Option<ParentPage>,
    ) -> Result<Self> {
        if mode == Mode::Inherited && parent.is_none() {
            warn!("refusing to inherit access without a parent page");
            return Err(AccessError::InheritWithoutParent);
        }
        let dropped = own.drop_edit_without_view() + inherited.drop_edit_without_view();
        if dropped > 0 {
            debug!(dropped, "dropped edit grants without view access");
        }
        let mut state = AccessGrantState {
            directory,
            own,
            inherited,
            edit_disabled: GrantMap::new(),
            mode,
            parent,
            granted: Vec::new(),
            selectable: HashSet::new(),
            selected: None,
            view_output: Vec::new(),
            edit_output: Vec::new(),
        };
        state.init();
        Ok(state)
    }

    /// Attach the advisory map of groups whose edit checkbox is locked.
    pub fn with_edit_disabled(mut self, edit_disabled: GrantMap) -> Self {
        self.edit_disabled = edit_disabled;
        self
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Re-derive partition and outputs from the active pair.
    fn init(&mut self) {
        let active_view = &self.active().view;
        let (granted, selectable): (Vec<GroupId>, Vec<GroupId>) =
            self.directory.ids().cloned().partition(|id| active_view.is_granted(id));
        self.granted = granted;
        self.selectable = selectable.into_iter().collect();
        self.selected = None;
        debug!(
            mode = %self.mode,
            granted = self.granted.len(),
            selectable = self.selectable.len(),
            "initialized access state"
        );
        self.recompute_outputs();
    }

    /// Rebuild the view/edit submission lists from the active maps.
    ///
    /// Both lists are empty unless access is managed here. Order follows the
    /// view map's insertion order. Ids missing from the directory are
    /// skipped since the form has no option to select for them.
    pub fn recompute_outputs(&mut self) {
        self.view_output.clear();
        self.edit_output.clear();
        if !self.mode.is_editable() {
            trace!("access inherited, nothing to submit");
            return;
        }
        for id in self.own.view.granted() {
            if !self.directory.contains(id) {
                continue;
            }
            self.view_output.push(id.clone());
            if self.own.edit.is_granted(id) {
                self.edit_output.push(id.clone());
            }
        }
        trace!(view = self.view_output.len(), edit = self.edit_output.len(), "rebuilt outputs");
    }

    fn active(&self) -> &GrantPair {
        match self.mode {
            Mode::ManagedHere => &self.own,
            Mode::Inherited => &self.inherited,
        }
    }

    // ========================================================================
    // Preconditions
    // ========================================================================

    fn require_editable(&self) -> Result<()> {
        if self.mode.is_editable() {
            Ok(())
        } else {
            warn!("ignoring grant change while access is inherited");
            Err(AccessError::ReadOnly)
        }
    }

    fn require_known(&self, id: &GroupId) -> Result<()> {
        if self.directory.contains(id) {
            Ok(())
        } else {
            warn!(group = %id, "ignoring grant change for unknown group");
            Err(AccessError::UnknownGroup(id.clone()))
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Switch between managing access here and inheriting it.
    ///
    /// The display is re-derived from the newly active pair. Own grants
    /// edited before switching to inherited are kept and reappear when
    /// switching back.
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if mode == Mode::Inherited && self.parent.is_none() {
            warn!("refusing to inherit access without a parent page");
            return Err(AccessError::InheritWithoutParent);
        }
        debug!(from = %self.mode, to = %mode, "switching access mode");
        self.mode = mode;
        self.init();
        Ok(())
    }

    /// Give a group view access (without edit) and move it to the end of
    /// the granted list. Granting an already granted group does nothing.
    pub fn grant_new_group(&mut self, id: &GroupId) -> Result<()> {
        self.require_editable()?;
        self.require_known(id)?;
        if !self.selectable.contains(id) {
            debug!(group = %id, "group already granted");
            return Ok(());
        }
        self.own.view.set(id.clone(), true);
        self.own.edit.set(id.clone(), false);
        self.selectable.remove(id);
        self.granted.push(id.clone());
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        debug!(group = %id, "granted view access");
        self.recompute_outputs();
        Ok(())
    }

    /// Set or clear a group's edit grant.
    ///
    /// Edit requires view: granting edit to a group without view access is
    /// rejected, clearing it is a no-op.
    pub fn toggle_edit(&mut self, id: &GroupId, value: bool) -> Result<()> {
        self.require_editable()?;
        self.require_known(id)?;
        if self.selectable.contains(id) {
            if value {
                warn!(group = %id, "edit access requires view access");
                return Err(AccessError::NotGranted(id.clone()));
            }
            return Ok(());
        }
        self.own.edit.set(id.clone(), value);
        debug!(group = %id, edit = value, "changed edit access");
        self.recompute_outputs();
        Ok(())
    }

    /// Set or clear a group's view grant.
    ///
    /// Clearing view revokes every grant of the group and makes it
    /// selectable again. Setting view on a group without grants is the
    /// same as [`grant_new_group`](Self::grant_new_group).
    pub fn toggle_view(&mut self, id: &GroupId, value: bool) -> Result<()> {
        if value {
            return self.grant_new_group(id);
        }
        self.require_editable()?;
        self.require_known(id)?;
        let Some(pos) = self.granted.iter().position(|g| g == id) else {
            return Ok(());
        };
        self.own.view.remove(id);
        self.own.edit.remove(id);
        self.granted.remove(pos);
        self.selectable.insert(id.clone());
        debug!(group = %id, "revoked access");
        self.recompute_outputs();
        Ok(())
    }

    /// Set a single permission flag, dispatching to the matching toggle.
    pub fn set_permission(&mut self, id: &GroupId, permission: Permission, value: bool) -> Result<()> {
        match permission {
            Permission::View => self.toggle_view(id, value),
            Permission::Edit => self.toggle_edit(id, value),
        }
    }

    // ========================================================================
    // Chooser selection
    // ========================================================================

    /// Remember the group picked in the add-group chooser.
    pub fn select_group(&mut self, id: &GroupId) -> Result<()> {
        self.require_editable()?;
        self.require_known(id)?;
        if !self.selectable.contains(id) {
            warn!(group = %id, "chosen group already has access");
            return Err(AccessError::NotSelectable(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Grant the chosen group and reset the chooser. Returns the granted
    /// group, or `None` when nothing was chosen.
    pub fn commit_selection(&mut self) -> Result<Option<GroupId>> {
        let Some(id) = self.selected.clone() else {
            return Ok(None);
        };
        self.grant_new_group(&id)?;
        self.selected = None;
        Ok(Some(id))
    }

    pub fn selected_group(&self) -> Option<&GroupId> {
        self.selected.as_ref()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn is_editable(&self) -> bool {
        self.mode.is_editable()
    }

    pub fn parent(&self) -> Option<&ParentPage> {
        self.parent.as_ref()
    }

    /// Whether inheriting is offered at all
    pub fn can_inherit(&self) -> bool {
        self.parent.is_some()
    }

    pub fn directory(&self) -> &GroupDirectory {
        &self.directory
    }

    /// Granted group ids, in grant order
    pub fn granted(&self) -> &[GroupId] {
        &self.granted
    }

    pub fn granted_groups(&self) -> impl Iterator<Item = &Group> {
        self.granted.iter().filter_map(|id| self.directory.get(id))
    }

    pub fn is_granted(&self, id: &GroupId) -> bool {
        self.directory.contains(id) && !self.selectable.contains(id)
    }

    pub fn is_selectable(&self, id: &GroupId) -> bool {
        self.selectable.contains(id)
    }

    /// Selectable groups, in directory order
    pub fn selectable(&self) -> impl Iterator<Item = &Group> {
        self.directory.iter().filter(|g| self.selectable.contains(&g.id))
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable.len()
    }

    /// View checkbox state as displayed (from the active pair)
    pub fn can_view(&self, id: &GroupId) -> bool {
        self.active().view.is_granted(id)
    }

    /// Edit checkbox state as displayed (from the active pair)
    pub fn can_edit(&self, id: &GroupId) -> bool {
        self.active().edit.is_granted(id)
    }

    /// Advisory: the presentation layer locks this group's edit checkbox.
    pub fn is_edit_disabled(&self, id: &GroupId) -> bool {
        self.edit_disabled.is_granted(id)
    }

    pub fn own_grants(&self) -> &GrantPair {
        &self.own
    }

    pub fn inherited_grants(&self) -> &GrantPair {
        &self.inherited
    }

    pub fn view_output(&self) -> &[GroupId] {
        &self.view_output
    }

    pub fn edit_output(&self) -> &[GroupId] {
        &self.edit_output
    }

    pub fn view_output_groups(&self) -> impl Iterator<Item = &Group> {
        self.view_output.iter().filter_map(|id| self.directory.get(id))
    }

    pub fn edit_output_groups(&self) -> impl Iterator<Item = &Group> {
        self.edit_output.iter().filter_map(|id| self.directory.get(id))
    }

    /// The payload submitted with the page form
    pub fn submission(&self) -> Submission {
        Submission {
            view_groups: self.view_output.clone(),
            edit_groups: self.edit_output.clone(),
        }
    }
}
