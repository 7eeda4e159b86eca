//! Key-value sets shared by the tag set and the field set

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

use crate::error::LineResult;
use crate::split::cut_or_empty;
use crate::validation::{validate_key, validate_unique, DuplicatePolicy};

/// Which set of a line a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    Tag,
    Field,
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetKind::Tag => f.write_str("Tag"),
            SetKind::Field => f.write_str("Field"),
        }
    }
}

/// A validated mapping of keys to values.
///
/// A set only exists once every key in its source fragment passed the
/// reserved-prefix rule and the uniqueness rule; there is no way to build
/// one incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeyValueSet {
    entries: HashMap<String, String>,
}

impl KeyValueSet {
    /// Parse a comma separated `key=value` fragment, rejecting duplicates
    pub fn parse(fragment: &str, kind: SetKind) -> LineResult<Self> {
        Self::parse_with_policy(fragment, kind, DuplicatePolicy::Reject)
    }

    /// Parse a comma separated `key=value` fragment.
    ///
    /// An empty fragment still yields one (empty) pair, and a pair without
    /// `=` becomes a key with an empty value. The first offending pair, left
    /// to right, decides the error.
    pub fn parse_with_policy(
        fragment: &str,
        kind: SetKind,
        policy: DuplicatePolicy,
    ) -> LineResult<Self> {
        let mut entries = HashMap::new();

        for pair in fragment.split(',') {
            let (key, value) = cut_or_empty(pair, '=');

            validate_key(kind, key, fragment)?;
            validate_unique(kind, key, &entries, policy)?;

            entries.insert(key.to_string(), value.to_string());
        }

        trace!("Parsed {} set with {} entries", kind, entries.len());
        Ok(Self { entries })
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over key-value pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get all keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Borrow the underlying map
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }

    /// Consume the set, returning the underlying map
    pub fn into_map(self) -> HashMap<String, String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_single_pair() {
        let set = KeyValueSet::parse("tag=tag-value", SetKind::Tag).unwrap();
        assert_eq!(set.into_map(), map(&[("tag", "tag-value")]));
    }

    #[test]
    fn test_parse_multiple_pairs() {
        let set = KeyValueSet::parse("tag0=tag-value,tag1=tag-value", SetKind::Tag).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("tag0"), Some("tag-value"));
        assert_eq!(set.get("tag1"), Some("tag-value"));
    }

    #[test]
    fn test_read_accessors() {
        let set = KeyValueSet::parse("host=a,region=us-east-1", SetKind::Tag).unwrap();

        assert!(!set.is_empty());
        assert!(set.contains_key("host"));
        assert!(!set.contains_key("a"));

        let mut keys: Vec<_> = set.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["host", "region"]);

        let mut pairs: Vec<_> = set.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("host", "a"), ("region", "us-east-1")]);
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let set = KeyValueSet::parse("expr=a=b", SetKind::Field).unwrap();
        assert_eq!(set.get("expr"), Some("a=b"));
    }

    #[test]
    fn test_pair_without_equals_has_empty_value() {
        let set = KeyValueSet::parse("flag", SetKind::Field).unwrap();
        assert_eq!(set.get("flag"), Some(""));
    }

    #[test]
    fn test_empty_fragment_yields_one_empty_pair() {
        let set = KeyValueSet::parse("", SetKind::Field).unwrap();
        assert_eq!(set.into_map(), map(&[("", "")]));
    }

    #[test]
    fn test_reserved_keys() {
        let err = KeyValueSet::parse("_tag0=tag-value", SetKind::Tag).unwrap_err();
        assert_eq!(err, LineError::reserved_key(SetKind::Tag, "_tag0", "_tag0=tag-value"));

        let err = KeyValueSet::parse("tag0=tag-value,_tag0=tag-value", SetKind::Tag).unwrap_err();
        assert_eq!(err.key(), Some("_tag0"));
        assert_eq!(err.category(), "reserved_key");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = KeyValueSet::parse("tag0=tag-value,tag0=tag-value", SetKind::Tag).unwrap_err();
        assert_eq!(err, LineError::duplicate_key(SetKind::Tag, "tag0"));

        let err = KeyValueSet::parse("tag0=tag-value,tag1=tag-value,tag0=tag-value", SetKind::Tag)
            .unwrap_err();
        assert_eq!(err, LineError::duplicate_key(SetKind::Tag, "tag0"));
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let set = KeyValueSet::parse_with_policy(
            "tag0=first,tag1=x,tag0=second",
            SetKind::Tag,
            DuplicatePolicy::LastWriteWins,
        )
        .unwrap();
        assert_eq!(set.into_map(), map(&[("tag0", "second"), ("tag1", "x")]));
    }

    #[test]
    fn test_first_offender_wins() {
        // duplicate of `a` comes before the reserved key
        let err = KeyValueSet::parse("a=1,a=2,_b=3", SetKind::Field).unwrap_err();
        assert_eq!(err, LineError::duplicate_key(SetKind::Field, "a"));

        // reserved key comes before the duplicate of `a`
        let err = KeyValueSet::parse("a=1,_b=3,a=2", SetKind::Field).unwrap_err();
        assert_eq!(err.category(), "reserved_key");
        assert_eq!(err.key(), Some("_b"));
    }

    #[test]
    fn test_reserved_checked_even_when_duplicates_allowed() {
        let err =
            KeyValueSet::parse_with_policy("_a=1", SetKind::Field, DuplicatePolicy::LastWriteWins)
                .unwrap_err();
        assert_eq!(err.category(), "reserved_key");
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let set = KeyValueSet::parse("host=a", SetKind::Tag).unwrap();
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!({ "host": "a" })
        );
    }
}
