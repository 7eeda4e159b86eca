use anyhow::{Context, Result};
use lineproto_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Default config file looked up when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config/lineproto.yaml";

/// Configuration for the ingest front end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Decoder settings
    pub decoding: DecodingConfig,

    /// Line handling settings
    pub ingestion: IngestionConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Decoder settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingConfig {
    /// How duplicate keys within one set are handled
    pub duplicate_policy: DuplicatePolicy,
}

/// Line handling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Stop at the first rejected line instead of logging and continuing
    pub fail_fast: bool,

    /// Lines longer than this (in bytes) are rejected without decoding
    pub max_line_length: usize,

    /// Skip empty lines instead of handing them to the decoder
    pub skip_blank_lines: bool,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print each JSON data point
    pub pretty: bool,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_line_length: 64 * 1024, // 64KB
            skip_blank_lines: true,
        }
    }
}

impl IngestConfig {
    /// Load configuration from file, environment variables, and defaults
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("CONFIG_PATH") {
            Self::load_from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load_from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_overrides(|name| env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply `LINEPROTO_*` overrides, reading variables through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = lookup("LINEPROTO_DUPLICATE_POLICY") {
            self.decoding.duplicate_policy = policy
                .parse::<DuplicatePolicy>()
                .map_err(anyhow::Error::msg)?;
        }

        if let Some(fail_fast) = lookup("LINEPROTO_FAIL_FAST") {
            self.ingestion.fail_fast = fail_fast
                .parse::<bool>()
                .with_context(|| format!("Invalid LINEPROTO_FAIL_FAST: {}", fail_fast))?;
        }

        if let Some(max_line_length) = lookup("LINEPROTO_MAX_LINE_LENGTH") {
            self.ingestion.max_line_length = max_line_length.parse::<usize>().with_context(|| {
                format!("Invalid LINEPROTO_MAX_LINE_LENGTH: {}", max_line_length)
            })?;
        }

        if let Some(skip_blank) = lookup("LINEPROTO_SKIP_BLANK_LINES") {
            self.ingestion.skip_blank_lines = skip_blank
                .parse::<bool>()
                .with_context(|| format!("Invalid LINEPROTO_SKIP_BLANK_LINES: {}", skip_blank))?;
        }

        if let Some(pretty) = lookup("LINEPROTO_PRETTY") {
            self.output.pretty = pretty
                .parse::<bool>()
                .with_context(|| format!("Invalid LINEPROTO_PRETTY: {}", pretty))?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ingestion.max_line_length == 0 {
            return Err(anyhow::anyhow!("Max line length must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.decoding.duplicate_policy, DuplicatePolicy::Reject);
        assert!(!config.ingestion.fail_fast);
        assert_eq!(config.ingestion.max_line_length, 65536);
        assert!(config.ingestion.skip_blank_lines);
        assert!(!config.output.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = IngestConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("LINEPROTO_DUPLICATE_POLICY", "last_write_wins"),
                ("LINEPROTO_FAIL_FAST", "true"),
                ("LINEPROTO_MAX_LINE_LENGTH", "128"),
                ("LINEPROTO_SKIP_BLANK_LINES", "false"),
                ("LINEPROTO_PRETTY", "true"),
            ]))
            .unwrap();

        assert_eq!(config.decoding.duplicate_policy, DuplicatePolicy::LastWriteWins);
        assert!(config.ingestion.fail_fast);
        assert_eq!(config.ingestion.max_line_length, 128);
        assert!(!config.ingestion.skip_blank_lines);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_invalid_overrides() {
        let mut config = IngestConfig::default();
        assert!(config
            .apply_overrides(lookup_from(&[("LINEPROTO_DUPLICATE_POLICY", "first_wins")]))
            .is_err());

        let mut config = IngestConfig::default();
        assert!(config
            .apply_overrides(lookup_from(&[("LINEPROTO_MAX_LINE_LENGTH", "lots")]))
            .is_err());
    }

    #[test]
    fn test_zero_line_length_is_invalid() {
        let mut config = IngestConfig::default();
        config.ingestion.max_line_length = 0;
        assert!(config.validate().is_err());
    }
}
