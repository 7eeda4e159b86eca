//! Line Protocol Ingest Library
//!
//! Thin front end around `lineproto-core`: configuration loading and a
//! line-at-a-time loop that decodes each input line and emits JSON.

pub mod config;
pub mod ingestion;
pub mod logging;

// Re-export commonly used types
pub use config::IngestConfig;
pub use ingestion::{IngestStats, LineIngestor};
