//! Measurement name type

use serde::Serialize;
use std::fmt;

use crate::error::LineResult;
use crate::validation::validate_measurement;

/// Measurement name - identifies the series a data point belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Measurement(String);

impl Measurement {
    /// Create a new measurement name, rejecting the reserved namespace
    pub fn new<S: Into<String>>(name: S) -> LineResult<Self> {
        let name = name.into();
        validate_measurement(&name)?;
        Ok(Self(name))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the measurement name is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Measurement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Measurement {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Measurement {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LineError;

    #[test]
    fn test_measurement_creation() {
        let name = Measurement::new("temperature").unwrap();
        assert_eq!(name.as_str(), "temperature");
        assert_eq!(name.len(), 11);
        assert_eq!(name, "temperature");
    }

    #[test]
    fn test_measurement_validation() {
        assert!(Measurement::new("with_underscore").is_ok());
        assert!(Measurement::new("").is_ok());

        assert_eq!(
            Measurement::new("_internal"),
            Err(LineError::reserved_measurement("_internal"))
        );
    }
}
