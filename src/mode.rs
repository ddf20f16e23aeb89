//! Access mode of a page and the parent it may inherit from

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MODE_INHERITED, MODE_MANAGED_HERE};

/// Where a page's grants come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Grants are managed on this page and are editable.
    #[default]
    ManagedHere,
    /// Grants are shown read-only from the parent page.
    Inherited,
}

impl Mode {
    #[inline]
    pub fn is_editable(self) -> bool {
        self == Mode::ManagedHere
    }

    /// Value of the manage-access radio for this mode
    pub fn form_value(self) -> &'static str {
        match self {
            Mode::ManagedHere => MODE_MANAGED_HERE,
            Mode::Inherited => MODE_INHERITED,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::ManagedHere => "managed here",
            Mode::Inherited => "inherited",
        })
    }
}

// The hosting page sends the radio value ("1"/"0"), sometimes as a number
// or boolean; events use the variant names.
impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModeVisitor;

        impl<'de> Visitor<'de> for ModeVisitor {
            type Value = Mode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"1\"/\"0\", 1/0, a boolean, or \"managed_here\"/\"inherited\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Mode, E> {
                Ok(if v { Mode::ManagedHere } else { Mode::Inherited })
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Mode, E> {
                match v {
                    1 => Ok(Mode::ManagedHere),
                    0 => Ok(Mode::Inherited),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Mode, E> {
                match v {
                    1 => Ok(Mode::ManagedHere),
                    0 => Ok(Mode::Inherited),
                    _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Mode, E> {
                match v {
                    "1" | "managed_here" => Ok(Mode::ManagedHere),
                    "0" | "inherited" => Ok(Mode::Inherited),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(ModeVisitor)
    }
}

/// The parent page whose grants are shown when inheriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentPage {
    pub title: String,
    pub path: String,
}

impl ParentPage {
    pub fn new(title: &str, path: &str) -> Self {
        ParentPage { title: title.to_string(), path: path.to_string() }
    }
}

// ============================================================================
// Tests
// ============================================================================
