//! Topic layer: which survey topic a chart or panel currently represents.
//!
//! # Modules
//!
//! - [`context`]: Shared, session-scoped topic override
//! - [`tables`]: Ordered keyword → label tables
//! - [`registry`]: Static per-page topic registry
//! - [`resolver`]: The resolution cascade

pub mod context;
pub mod registry;
pub mod resolver;
pub mod tables;

pub use context::TopicContext;
pub use registry::{TopicEntry, TopicRegistry};
pub use resolver::{
    resolve_topic, Resolution, ResolutionLayer, TopicQuery, TopicResolver, DEFAULT_TOPIC_LABEL,
};
