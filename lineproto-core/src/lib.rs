//! # Line Protocol Core Library
//!
//! Decodes a single line of the InfluxDB Line Protocol into a [`DataPoint`],
//! enforcing the format's naming and uniqueness rules.
//!
//! ## Features
//!
//! - **Decoding**: measurement, tag set and field set from one line
//! - **Validation**: the `_` namespace is reserved for measurement names and keys
//! - **Duplicate keys**: rejected by default, or last-write-wins by policy
//!
//! ## Example
//!
//! ```
//! use lineproto_core::decode;
//!
//! let point = decode("temperature,room=kitchen celsius=21.5").unwrap();
//! assert_eq!(point.measurement, "temperature");
//! assert_eq!(point.tag("room"), Some("kitchen"));
//! assert_eq!(point.field("celsius"), Some("21.5"));
//! ```
//!
//! Decoding is pure and synchronous. Reading lines from a stream and
//! dispatching them is left to the caller.

pub mod datapoint;
pub mod decoder;
pub mod error;
pub mod keyset;
pub mod measurement;
pub mod split;
pub mod validation;

// Re-export commonly used types
pub use datapoint::DataPoint;
pub use decoder::{decode, LineDecoder};
pub use error::{LineError, LineResult};
pub use keyset::{KeyValueSet, SetKind};
pub use measurement::Measurement;
pub use validation::{is_reserved, DuplicatePolicy, RESERVED_PREFIX};

/// Version information for lineproto-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
