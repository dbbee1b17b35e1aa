//! Record materialization for DPP exports.
//!
//! Applies a finished header-to-field mapping to CSV rows, producing one
//! JSON-LD record per row. Cell text is coerced to booleans and numbers where
//! it reads as one; sparse array items are compacted.

pub mod context;
pub mod json;
pub mod record;

pub use context::{CORE_CONTEXT, ContextConfig, DEFAULT_CONTEXT_BASE, context_urls};
pub use json::{compact_arrays, deep_set};
pub use record::{coerce_value, generate, generate_with};
