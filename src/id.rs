//! Identifiers for stored diffs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Canonical hyphenated UUID with a version nibble of 1-5 and an RFC 4122 variant
static CANONICAL_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
    )
    .expect("Failed to compile uuid regex")
});

/// The identifier a diff is stored under
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffId(Uuid);

impl DiffId {
    /// Parse an identifier, accepting only the canonical `8-4-4-4-12` hexadecimal form.
    ///
    /// ```
    /// use diffkeep::DiffId;
    ///
    /// assert!(DiffId::parse("6f0f7c52-3b0e-4d2a-9c1e-5a8f2b7d9e10").is_some());
    /// // braces, simple form and the nil UUID are all refused
    /// assert!(DiffId::parse("{6f0f7c52-3b0e-4d2a-9c1e-5a8f2b7d9e10}").is_none());
    /// assert!(DiffId::parse("6f0f7c523b0e4d2a9c1e5a8f2b7d9e10").is_none());
    /// assert!(DiffId::parse("00000000-0000-0000-0000-000000000000").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        if !CANONICAL_UUID.is_match(s) {
            return None;
        }
        Uuid::parse_str(s).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for DiffId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for DiffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Source of identifiers for new diffs. Every call must return an id never returned before.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> DiffId;
}

/// Generates random (version 4) UUIDs
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> DiffId {
        DiffId(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_canonical_and_unique() {
        let ids: HashSet<DiffId> = (0..1000).map(|_| RandomIds.next_id()).collect();
        assert_eq!(ids.len(), 1000);

        for id in ids {
            let text = id.to_string();
            assert_eq!(text.len(), 36);
            assert_eq!(DiffId::parse(&text), Some(id));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        let lower = DiffId::parse("a3bb189e-8bf9-3888-9912-ace4e6543002").unwrap();
        let upper = DiffId::parse("A3BB189E-8BF9-3888-9912-ACE4E6543002").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.to_string(), "a3bb189e-8bf9-3888-9912-ace4e6543002");
    }

    #[test]
    fn parse_checks_version_and_variant() {
        // version 6 and 0
        assert!(DiffId::parse("a3bb189e-8bf9-6888-9912-ace4e6543002").is_none());
        assert!(DiffId::parse("a3bb189e-8bf9-0888-9912-ace4e6543002").is_none());
        // variant c
        assert!(DiffId::parse("a3bb189e-8bf9-4888-c912-ace4e6543002").is_none());
        // every accepted version
        for version in 1..=5 {
            let id = format!("a3bb189e-8bf9-{version}888-b912-ace4e6543002");
            assert!(DiffId::parse(&id).is_some(), "{}", id);
        }
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for s in [
            "",
            "not-a-uuid",
            "a3bb189e-8bf9-3888-9912-ace4e654300",
            "a3bb189e-8bf9-3888-9912-ace4e65430022",
            "a3bb189e8bf9-3888-9912-ace4e6543002",
            "g3bb189e-8bf9-3888-9912-ace4e6543002",
            " a3bb189e-8bf9-3888-9912-ace4e6543002",
            "a3bb189e-8bf9-3888-9912-ace4e6543002/extra",
            "urn:uuid:a3bb189e-8bf9-3888-9912-ace4e6543002",
        ] {
            assert!(DiffId::parse(s).is_none(), "{:?}", s);
        }
    }

    #[test]
    fn serializes_as_a_string() {
        let id = DiffId::parse("a3bb189e-8bf9-3888-9912-ace4e6543002").unwrap();
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"a3bb189e-8bf9-3888-9912-ace4e6543002\""
        );
    }
}
