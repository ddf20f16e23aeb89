//! Access data supplied by the hosting page.
//!
//! The page embeds one JSON object per widget, either on its own or under
//! an `AccessData` key of the page-wide config. Keys are camelCase:
//!
//! ```json
//! {
//!   "groupInfo": {"2": "Admins", "5": "Editors"},
//!   "groupDescription": {"2": "Full access"},
//!   "viewGroups": {"2": true},
//!   "editGroups": {"2": true},
//!   "inheritedViewGroups": {"5": true},
//!   "inheritedEditGroups": [],
//!   "editDisabledFor": {"2": true},
//!   "manageAccess": "1",
//!   "inheritPage": {"title": "Home", "path": "/"},
//!   "i18n": {"labelManageHere": "Manage access here"}
//! }
//! ```
//!
//! Every key is optional. Hosts that serialize empty associative arrays as
//! `[]`, sequential ids as plain lists, or a missing parent as `false`, are
//! accepted. A parent object missing its `title` or `path` is an error.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::value::MapAccessDeserializer;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::grants::GrantMap;
use crate::group::{GroupDirectory, GroupId};
use crate::mode::{Mode, ParentPage};
use crate::state::{AccessGrantState, GrantPair};

/// Initial data for one access widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessData {
    pub view_groups: GrantMap,
    pub edit_groups: GrantMap,
    pub inherited_view_groups: GrantMap,
    pub inherited_edit_groups: GrantMap,
    #[serde(deserialize_with = "lenient_map")]
    pub group_info: IndexMap<GroupId, String>,
    #[serde(deserialize_with = "lenient_map")]
    pub group_description: IndexMap<GroupId, String>,
    pub edit_disabled_for: GrantMap,
    pub manage_access: Mode,
    #[serde(deserialize_with = "lenient_parent")]
    pub inherit_page: Option<ParentPage>,
    pub i18n: Labels,
}

#[derive(Deserialize)]
struct PageConfig {
    #[serde(rename = "AccessData")]
    access_data: AccessData,
}

impl AccessData {
    /// Parse a bare access data object
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a page-wide config object holding an `AccessData` key
    pub fn from_page_config(s: &str) -> Result<Self> {
        let config: PageConfig = serde_json::from_str(s)?;
        Ok(config.access_data)
    }

    /// Read access data from a file, bare or wrapped in a page config
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let data = match value.get("AccessData") {
            Some(inner) => AccessData::deserialize(inner)?,
            None => AccessData::deserialize(&value)?,
        };
        debug!(path = %path.display(), groups = data.group_info.len(), "loaded access data");
        Ok(data)
    }

    pub fn directory(&self) -> GroupDirectory {
        GroupDirectory::from_maps(&self.group_info, &self.group_description)
    }

    /// Build the widget state, keeping the labels for rendering.
    pub fn into_parts(self) -> Result<(AccessGrantState, Labels)> {
        let directory = self.directory();
        let state = AccessGrantState::new(
            directory,
            GrantPair::new(self.view_groups, self.edit_groups),
            GrantPair::new(self.inherited_view_groups, self.inherited_edit_groups),
            self.manage_access,
            self.inherit_page,
        )?
        .with_edit_disabled(self.edit_disabled_for);
        Ok((state, self.i18n))
    }

    pub fn into_state(self) -> Result<AccessGrantState> {
        self.into_parts().map(|(state, _)| state)
    }
}

// ============================================================================
// Labels
// ============================================================================

/// Localized label strings, passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Labels(IndexMap<String, String>);

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label text, or the key itself when the host sent none
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn insert(&mut self, key: &str, text: &str) {
        self.0.insert(key.to_string(), text.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Labels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        lenient_map(deserializer).map(Labels)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Labels(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Lenient decoding helpers
// ============================================================================

/// A string map, or a list whose positions become the keys ("0", "1", ...)
fn lenient_map<'de, D, K>(deserializer: D) -> std::result::Result<IndexMap<K, String>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + From<String> + Hash + Eq,
{
    struct MapVisitor<K>(PhantomData<K>);

    impl<'de, K> Visitor<'de> for MapVisitor<K>
    where
        K: Deserialize<'de> + From<String> + Hash + Eq,
    {
        type Value = IndexMap<K, String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of strings or a list of strings")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut out = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((k, v)) = map.next_entry::<K, String>()? {
                out.insert(k, v);
            }
            Ok(out)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
            let mut out = IndexMap::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(v) = seq.next_element::<String>()? {
                out.insert(K::from(out.len().to_string()), v);
            }
            Ok(out)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(IndexMap::new())
        }
    }

    deserializer.deserialize_any(MapVisitor(PhantomData))
}

/// A parent page object; `null` and `false` mean there is none
fn lenient_parent<'de, D>(deserializer: D) -> std::result::Result<Option<ParentPage>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ParentVisitor;

    impl<'de> Visitor<'de> for ParentVisitor {
        type Value = Option<ParentPage>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a parent page object, null, or false")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Self::Value, A::Error> {
            ParentPage::deserialize(MapAccessDeserializer::new(map)).map(Some)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
            if v {
                Err(E::invalid_value(de::Unexpected::Bool(v), &self))
            } else {
                Ok(None)
            }
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ParentVisitor)
}
