//! Data layer: acquisition and caching of the shared survey dataset.
//!
//! # Modules
//!
//! - `source`: Candidate locations and their priority order
//! - `fetcher`: Fetcher trait abstraction and the default file/HTTP fetcher
//! - `cache`: The coalescing, retryable dataset cache

pub mod cache;
pub mod fetcher;
pub mod source;

pub use cache::{CacheState, DataCache, LoadOutcome};
pub use fetcher::{DefaultFetcher, SourceFetcher};
pub use source::{Source, SourceList, DEFAULT_FALLBACK_URL};
