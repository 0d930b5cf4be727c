//! Field-level passes applied by [`crate::normalizer::normalize`].
//!
//! Each pass owns a fixed set of field names. The sets are disjoint, so no
//! pass ever sees another pass's output within one run.

pub mod arrays;
pub mod client;
pub mod numeric;
pub mod plugin;
pub mod severity;
pub mod timestamp;
