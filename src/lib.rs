//! logxform — normalizes semi-structured log records into a canonical shape.
//!
//! The core is [`normalizer::normalize`], which runs a fixed sequence of
//! field-level passes over one [`LogRecord`]:
//!
//! ```text
//! timestamp ─► severity ─► plugin info ─► client address ─► arrays ─► numerics
//! ```
//!
//! Every pass is best effort. Input that doesn't fit is left as it was.

pub mod config;
pub mod input;
pub mod normalizer;
pub mod output;
pub mod record;
pub mod severity;
pub mod timestamp;
pub mod transforms;

pub use config::{PipelineMetadata, PluginInfo};
pub use normalizer::normalize;
pub use record::{AttributeValue, LogRecord, Value};
pub use severity::SeverityNumber;
