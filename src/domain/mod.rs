//! Domain layer for survey-lens.
//!
//! This module contains the core data types shared by the cache, the topic
//! resolver, and the search index, independent of how data is fetched or how
//! the dashboard is rendered.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`dataset`]: The shared survey table and its parser
//! - [`navigation`]: Static section tree and search results
//! - [`route`]: Read-only view of the host router location

pub mod dataset;
pub mod error;
pub mod navigation;
pub mod route;

pub use dataset::{Dataset, Record};
pub use error::{Result, SourceFailure, SurveyError};
pub use navigation::{NavigationTree, ResultKind, SearchResult, Section, Subheading};
pub use route::RouteLocation;
