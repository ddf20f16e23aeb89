//! Submission payload: the page's own view/edit grant lists

use serde::{Deserialize, Serialize};

use crate::constants::{EDIT_FIELD, VIEW_FIELD};
use crate::group::GroupId;

/// Grant lists posted with the page form.
///
/// Both lists are empty while access is inherited; the parent page owns
/// those grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub view_groups: Vec<GroupId>,
    pub edit_groups: Vec<GroupId>,
}

impl Submission {
    pub fn is_empty(&self) -> bool {
        self.view_groups.is_empty() && self.edit_groups.is_empty()
    }

    /// Form fields as the two hidden multi-selects post them: one
    /// `view_groups[]` pair per view grant, then one `edit_groups[]` pair per
    /// edit grant.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let view = self.view_groups.iter().map(|id| (VIEW_FIELD, id.as_str()));
        let edit = self.edit_groups.iter().map(|id| (EDIT_FIELD, id.as_str()));
        view.chain(edit).collect()
    }
}
