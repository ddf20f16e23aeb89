//! Grant maps: group id to flag, in insertion order.
//!
//! Iteration order is the order entries were first inserted. It decides the
//! literal order of the submitted view/edit lists, so removal keeps the
//! relative order of the remaining entries.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::group::GroupId;

/// Which permission a grant map holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Edit,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permission::View => "view",
            Permission::Edit => "edit",
        })
    }
}

/// Mapping from group to a grant flag.
///
/// A `false` entry is distinct from a missing one: the host may send
/// explicit `false` values and a fresh grant records `edit = false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GrantMap {
    flags: IndexMap<GroupId, bool>,
}

impl GrantMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only for an entry present with a `true` flag
    #[inline]
    pub fn is_granted(&self, id: &GroupId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    #[inline]
    pub fn get(&self, id: &GroupId) -> Option<bool> {
        self.flags.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &GroupId) -> bool {
        self.flags.contains_key(id)
    }

    /// Set a flag. New entries go to the end, existing ones keep their place.
    pub fn set(&mut self, id: GroupId, granted: bool) {
        self.flags.insert(id, granted);
    }

    /// Remove an entry, preserving the order of the rest
    pub fn remove(&mut self, id: &GroupId) -> Option<bool> {
        self.flags.shift_remove(id)
    }

    /// Ids with a `true` flag, in insertion order
    pub fn granted(&self) -> impl Iterator<Item = &GroupId> {
        self.flags.iter().filter(|(_, v)| **v).map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, bool)> {
        self.flags.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<K: Into<GroupId>> FromIterator<(K, bool)> for GrantMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        GrantMap { flags: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

// ============================================================================
// Lenient decoding
// ============================================================================

/// A grant flag as hosts send it: `true`, `1`, `"1"` and their negatives.
pub(crate) struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = Flag;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a boolean, 0/1, or \"0\"/\"1\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
                Ok(Flag(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Flag, E> {
                Ok(Flag(v != 0))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Flag, E> {
                Ok(Flag(v != 0))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Flag, E> {
                match v {
                    "1" | "true" => Ok(Flag(true)),
                    "0" | "false" | "" => Ok(Flag(false)),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<Flag, E> {
                Ok(Flag(false))
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// A list element: a granted id, or a flag keyed by its position.
enum ListEntry {
    Id(GroupId),
    Flag(bool),
}

impl<'de> Deserialize<'de> for ListEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = ListEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a group id or a flag")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ListEntry, E> {
                Ok(ListEntry::Id(GroupId::new(v)))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ListEntry, E> {
                Ok(ListEntry::Flag(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ListEntry, E> {
                Ok(ListEntry::Flag(v != 0))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ListEntry, E> {
                Ok(ListEntry::Flag(v != 0))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ListEntry, E> {
                Ok(ListEntry::Flag(false))
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

// Accepts an object of id -> flag, or a list. String elements are granted
// ids; booleans, numbers and nulls are flags for the ids "0", "1", ... the
// way a sequential group list is keyed. Hosts that encode an empty
// associative array send `[]`.
impl<'de> Deserialize<'de> for GrantMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GrantMapVisitor;

        impl<'de> Visitor<'de> for GrantMapVisitor {
            type Value = GrantMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of group id to flag, or a list of group ids or flags")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<GrantMap, A::Error> {
                let mut flags = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, Flag(v))) = map.next_entry::<GroupId, Flag>()? {
                    flags.insert(id, v);
                }
                Ok(GrantMap { flags })
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<GrantMap, A::Error> {
                let mut flags = IndexMap::with_capacity(seq.size_hint().unwrap_or(0));
                let mut position = 0usize;
                while let Some(entry) = seq.next_element::<ListEntry>()? {
                    match entry {
                        ListEntry::Id(id) => flags.insert(id, true),
                        ListEntry::Flag(v) => flags.insert(GroupId::new(position.to_string()), v),
                    };
                    position += 1;
                }
                Ok(GrantMap { flags })
            }

            fn visit_unit<E: de::Error>(self) -> Result<GrantMap, E> {
                Ok(GrantMap::new())
            }
        }

        deserializer.deserialize_any(GrantMapVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_in_insertion_order() {
        let map: GrantMap = [("c", true), ("a", false), ("b", true)].into_iter().collect();
        let ids: Vec<&str> = map.granted().map(GroupId::as_str).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_set_existing_keeps_position() {
        let mut map: GrantMap = [("a", true), ("b", true)].into_iter().collect();
        map.set("a".into(), false);
        map.set("a".into(), true);
        let ids: Vec<&str> = map.granted().map(GroupId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map: GrantMap = [("a", true), ("b", true), ("c", true)].into_iter().collect();
        assert_eq!(map.remove(&"a".into()), Some(true));
        map.set("a".into(), true);
        let ids: Vec<&str> = map.granted().map(GroupId::as_str).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_false_entry_is_present_but_not_granted() {
        let map: GrantMap = [("a", false)].into_iter().collect();
        assert!(map.contains(&"a".into()));
        assert!(!map.is_granted(&"a".into()));
        assert!(!map.is_granted(&"zzz".into()));
    }

    #[test]
    fn test_decode_lenient_flags() {
        let map: GrantMap =
            serde_json::from_str(r#"{"1": true, "2": 0, "3": "1", "4": 1, "5": false}"#).unwrap();
        let ids: Vec<&str> = map.granted().map(GroupId::as_str).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_decode_empty_array_and_id_list() {
        let empty: GrantMap = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());

        let list: GrantMap = serde_json::from_str(r#"["9", "4"]"#).unwrap();
        let ids: Vec<&str> = list.granted().map(GroupId::as_str).collect();
        assert_eq!(ids, vec!["9", "4"]);
    }

    #[test]
    fn test_decode_flag_list_keys_by_position() {
        let map: GrantMap = serde_json::from_str("[true, 0, false, null, 1]").unwrap();
        let entries: Vec<(&str, bool)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(entries, vec![("0", true), ("1", false), ("2", false), ("3", false), ("4", true)]);
    }

    #[test]
    fn test_decode_rejects_garbage_flag() {
        assert!(serde_json::from_str::<GrantMap>(r#"{"1": "maybe"}"#).is_err());
    }
}
