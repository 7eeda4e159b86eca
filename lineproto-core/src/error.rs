//! Error types for line protocol decoding

use thiserror::Error;

use crate::keyset::SetKind;

/// Result type for line protocol operations
pub type LineResult<T> = Result<T, LineError>;

/// Every way a single line can fail to decode.
///
/// Each variant is terminal for the decode call that produced it; there is
/// never a partial data point alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Did not find ',' in line '{line}'")]
    MissingSeparator { line: String },

    #[error("Measurement {name} starts with `_` this is not allowed")]
    ReservedMeasurement { name: String },

    #[error("{kind} key {key} starts with `_` this is not allowed")]
    ReservedKey {
        kind: SetKind,
        key: String,
        fragment: String,
    },

    #[error("{kind} key {key} was already in set this is not allowed")]
    DuplicateKey { kind: SetKind, key: String },
}

impl LineError {
    /// Create a missing separator error for the given line
    pub fn missing_separator<S: Into<String>>(line: S) -> Self {
        Self::MissingSeparator { line: line.into() }
    }

    /// Create a reserved measurement error
    pub fn reserved_measurement<S: Into<String>>(name: S) -> Self {
        Self::ReservedMeasurement { name: name.into() }
    }

    /// Create a reserved key error, keeping the fragment the key came from
    pub fn reserved_key<K, F>(kind: SetKind, key: K, fragment: F) -> Self
    where
        K: Into<String>,
        F: Into<String>,
    {
        Self::ReservedKey {
            kind,
            key: key.into(),
            fragment: fragment.into(),
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key<S: Into<String>>(kind: SetKind, key: S) -> Self {
        Self::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    /// The offending token: measurement name or key. `None` for a missing separator.
    pub fn key(&self) -> Option<&str> {
        match self {
            LineError::MissingSeparator { .. } => None,
            LineError::ReservedMeasurement { name } => Some(name),
            LineError::ReservedKey { key, .. } | LineError::DuplicateKey { key, .. } => Some(key),
        }
    }

    /// The set the error occurred in, if it occurred inside a tag or field set
    pub fn set_kind(&self) -> Option<SetKind> {
        match self {
            LineError::ReservedKey { kind, .. } | LineError::DuplicateKey { kind, .. } => {
                Some(*kind)
            }
            _ => None,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            LineError::MissingSeparator { .. } => "missing_separator",
            LineError::ReservedMeasurement { .. } => "reserved_measurement",
            LineError::ReservedKey { .. } => "reserved_key",
            LineError::DuplicateKey { .. } => "duplicate_key",
        }
    }
}
