//! Top-level line decoding
//!
//! A line is taken apart with three cuts:
//!
//! ```text
//! temperature,tag=tag-value field=field-value
//! ^^^^^^^^^^^ ^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^
//! measurement  tag fragment   field fragment
//!            ^             ^
//!        first ','   first ' '
//! ```
//!
//! The decoder is naive on purpose: it does not unescape `\,`, `\ ` or `\=`,
//! it requires at least one tag (a line without `,` is rejected), and it
//! never extracts a trailing timestamp.

use tracing::{debug, trace};

use crate::datapoint::DataPoint;
use crate::error::{LineError, LineResult};
use crate::keyset::{KeyValueSet, SetKind};
use crate::measurement::Measurement;
use crate::split::{cut, cut_or_empty};
use crate::validation::DuplicatePolicy;

/// Decoder for single line protocol lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineDecoder {
    duplicate_policy: DuplicatePolicy,
}

impl LineDecoder {
    /// Create a decoder that rejects duplicate keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with the given duplicate key policy
    pub fn with_policy(duplicate_policy: DuplicatePolicy) -> Self {
        Self { duplicate_policy }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Decode one line into a data point
    pub fn decode(&self, line: &str) -> LineResult<DataPoint> {
        trace!("Decoding line, length: {}", line.len());

        let result = self.decode_parts(line);
        if let Err(e) = &result {
            debug!(category = e.category(), "Rejected line: {}", e);
        }
        result
    }

    fn decode_parts(&self, line: &str) -> LineResult<DataPoint> {
        let (name, rest) = cut(line, ',');
        let rest = rest.ok_or_else(|| LineError::missing_separator(line))?;

        let measurement = Measurement::new(name)?;

        let (tags, fields) = cut_or_empty(rest, ' ');

        let tag_set = KeyValueSet::parse_with_policy(tags, SetKind::Tag, self.duplicate_policy)?;
        let field_set =
            KeyValueSet::parse_with_policy(fields, SetKind::Field, self.duplicate_policy)?;

        trace!(
            "Decoded {} with {} tags and {} fields",
            measurement,
            tag_set.len(),
            field_set.len()
        );

        Ok(DataPoint::new(measurement, tag_set, field_set))
    }
}

/// Decode one line with the default decoder
pub fn decode(line: &str) -> LineResult<DataPoint> {
    LineDecoder::default().decode(line)
}
