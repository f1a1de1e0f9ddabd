//! Read-only metadata model.
//!
//! Every type here is a per-request input loaded from the store; the engine
//! never mutates or persists them.

pub mod access;
pub mod entity;
pub mod process;
pub mod reference;
pub mod table;
pub mod window;

use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

///
/// Id
/// Opaque metadata identifier.
///

#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&Self> for Id {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// True when an optional logic string is absent or whitespace only.
#[must_use]
pub fn is_blank(logic: Option<&str>) -> bool {
    logic.is_none_or(|logic| logic.trim().is_empty())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn id_borrows_as_str_for_map_lookups() {
        let mut map = BTreeMap::new();
        map.insert(Id::from("A"), 1);

        assert_eq!(map.get("A"), Some(&1));
        assert_eq!(Id::new("A"), "A");
        assert_eq!(Id::from("A").to_string(), "A");
    }

    #[test]
    fn blank_logic_detection() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("@A@='Y'")));
    }
}
