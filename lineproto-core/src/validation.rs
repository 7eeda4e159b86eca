//! Naming and uniqueness rules for measurements and set keys
//!
//! The two rules are independent: the reserved-prefix rule looks at a single
//! name, the uniqueness rule looks at a key against the entries already
//! accepted into a set. Set construction applies them in that order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{LineError, LineResult};
use crate::keyset::SetKind;

/// Names starting with this character belong to the system namespace
pub const RESERVED_PREFIX: char = '_';

/// Check whether a measurement name or key is in the reserved namespace
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

/// What to do when a key appears twice in the same set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the whole set on the second occurrence
    #[default]
    Reject,
    /// Keep the value of the last occurrence
    LastWriteWins,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::LastWriteWins => "last_write_wins",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "last_write_wins" => Ok(DuplicatePolicy::LastWriteWins),
            _ => Err(format!(
                "Invalid duplicate policy: {}. Valid options: reject, last_write_wins",
                s
            )),
        }
    }
}

/// Reject a measurement name in the reserved namespace
pub fn validate_measurement(name: &str) -> LineResult<()> {
    if is_reserved(name) {
        return Err(LineError::reserved_measurement(name));
    }
    Ok(())
}

/// Reject a key in the reserved namespace
pub fn validate_key(kind: SetKind, key: &str, fragment: &str) -> LineResult<()> {
    if is_reserved(key) {
        return Err(LineError::reserved_key(kind, key, fragment));
    }
    Ok(())
}

/// Check `key` against the entries already accepted into a set
pub fn validate_unique(
    kind: SetKind,
    key: &str,
    entries: &HashMap<String, String>,
    policy: DuplicatePolicy,
) -> LineResult<()> {
    match policy {
        DuplicatePolicy::Reject if entries.contains_key(key) => {
            Err(LineError::duplicate_key(kind, key))
        }
        _ => Ok(()),
    }
}
