//! Search layer: query the static navigation tree.
//!
//! - [`index`]: Result building, matching rules, and deduplication

pub mod index;

pub use index::SearchIndex;
