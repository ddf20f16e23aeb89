//! User groups and the directory the widget chooses them from.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque group identifier as issued by the hosting application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        GroupId(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        GroupId(s)
    }
}

impl AsRef<str> for GroupId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A user group with its display name and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,
}

/// Every group the operator may grant access to, in directory order.
///
/// The directory is fixed for the lifetime of a widget; its order is the
/// order groups are offered in the chooser and listed in the hidden
/// submission inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDirectory {
    groups: IndexMap<GroupId, Group>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the host's separate name and description maps.
    ///
    /// Names define membership and order. Descriptions for unknown ids are
    /// dropped; groups without a description get an empty one.
    pub fn from_maps(
        names: &IndexMap<GroupId, String>,
        descriptions: &IndexMap<GroupId, String>,
    ) -> Self {
        let groups = names
            .iter()
            .map(|(id, name)| {
                let description = descriptions.get(id).cloned().unwrap_or_default();
                let group = Group { id: id.clone(), name: name.clone(), description };
                (id.clone(), group)
            })
            .collect();
        GroupDirectory { groups }
    }

    /// Add a group, replacing any previous entry with the same id in place.
    pub fn insert(&mut self, id: impl Into<GroupId>, name: &str, description: &str) {
        let id = id.into();
        let group = Group { id: id.clone(), name: name.to_string(), description: description.to_string() };
        self.groups.insert(id, group);
    }

    #[inline]
    pub fn get(&self, id: &GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &GroupId) -> bool {
        self.groups.contains_key(id)
    }

    /// Position of a group in directory order
    pub fn position(&self, id: &GroupId) -> Option<usize> {
        self.groups.get_index_of(id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &GroupId> {
        self.groups.keys()
    }
}

impl FromIterator<Group> for GroupDirectory {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        GroupDirectory { groups: iter.into_iter().map(|g| (g.id.clone(), g)).collect() }
    }
}

// ============================================================================
// Tests
// ============================================================================
