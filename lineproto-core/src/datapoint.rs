//! Data point produced by decoding one line

use serde::Serialize;
use std::str::FromStr;

use crate::decoder::LineDecoder;
use crate::error::LineError;
use crate::keyset::KeyValueSet;
use crate::measurement::Measurement;

/// A single decoded line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPoint {
    /// Series name
    pub measurement: Measurement,

    /// Indexed metadata
    pub tag_set: KeyValueSet,

    /// Measured values, kept as opaque text
    pub field_set: KeyValueSet,

    /// Opaque timestamp text. The decoder never fills this in.
    pub timestamp: Option<String>,
}

impl DataPoint {
    /// Assemble a data point from already validated parts
    pub fn new(measurement: Measurement, tag_set: KeyValueSet, field_set: KeyValueSet) -> Self {
        Self {
            measurement,
            tag_set,
            field_set,
            timestamp: None,
        }
    }

    /// Get a tag value by key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tag_set.get(key)
    }

    /// Get a field value by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.field_set.get(key)
    }
}

impl FromStr for DataPoint {
    type Err = LineError;

    /// Decode with the default (duplicate rejecting) decoder
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        LineDecoder::default().decode(line)
    }
}
