//! Strongly-typed identifiers for marquee

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a catalog entry, taken verbatim from the catalog's
/// identifier column (e.g. `supertux.desktop`). Stable across reloads,
/// so it also keys the session registry and exit notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identity of one launch attempt. A fresh one is minted every time an
/// entry's process is started, so two launches of the same entry never
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn entry_id_round_trips_the_raw_identifier() {
        let id = EntryId::from("neverball.desktop");
        assert_eq!(id.as_str(), "neverball.desktop");
        assert_eq!(id.to_string(), "neverball.desktop");
        assert_eq!(id, EntryId::new(String::from("neverball.desktop")));
    }

    #[test]
    fn entry_id_works_as_a_map_key() {
        let mut sessions = HashMap::new();
        sessions.insert(EntryId::new("frozen-bubble.desktop"), 1);
        sessions.insert(EntryId::new("wesnoth.desktop"), 2);

        assert_eq!(sessions.get(&EntryId::new("wesnoth.desktop")), Some(&2));
        assert!(!sessions.contains_key(&EntryId::new("xonotic.desktop")));
    }

    #[test]
    fn entry_id_serializes_as_a_bare_string() {
        let id = EntryId::new("frozen-bubble.desktop");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"frozen-bubble.desktop\"");
        assert_eq!(serde_json::from_str::<EntryId>(&json).unwrap(), id);
    }

    #[test]
    fn each_launch_gets_a_distinct_session_id() {
        let first = SessionId::new();
        let second = SessionId::new();
        assert_ne!(first, second);
        assert_ne!(first.as_uuid(), second.as_uuid());
    }
}
