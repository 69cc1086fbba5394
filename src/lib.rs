//! Survey Lens: the data-resolution core of a survey results dashboard.
//!
//! Survey Lens provides the non-visual machinery a dashboard needs:
//! - A shared dataset cache that loads once, coalesces concurrent callers,
//!   falls back across source locations, and stays retryable after failure
//! - A session-wide topic override cell
//! - A layered cascade that decides which survey topic a chart represents
//! - Case-insensitive search over the static section/topic tree
//! - Navigation from a search result to its topic, across views if needed

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (rendering layer, router) / headless driver   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Search Widget (app/)                               │  ← State machine
//! │  - Event handling                                   │
//! │  - Highlight cursor                                 │
//! │  - Navigate actions                                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search        │   │ Topic         │   │ Navigation    │
//! │ (search/)     │   │ (topic/)      │   │ (navigation/) │
//! │ - Matching    │   │ - Override    │   │ - Router seam │
//! │ - Dedup       │   │ - Cascade     │   │ - Settling    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Data & Domain Layers                               │
//! │  - Source candidates, fetcher, cache (data/)        │
//! │  - Dataset, tree, route, errors (domain/)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating trace file          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Search widget state machine with event/action model
//! - [`data`]: Dataset sources, fetching, and the coalescing cache
//! - [`domain`]: Core domain types (dataset, navigation tree, route, errors)
//! - [`infrastructure`]: Path utilities
//! - [`navigation`]: Router boundary and navigation sequencing
//! - [`observability`]: Tracing setup
//! - [`search`]: Search over the navigation tree
//! - [`topic`]: Topic override and resolution cascade
//!
//! # Configuration
//!
//! Configuration comes from a string map supplied by the host, from
//! `SURVEY_LENS_*` environment variables, or from a TOML file:
//!
//! ```toml
//! data_dir = "/srv/dashboard/public"
//! data_file = "survey_data.csv"
//! relative_dir = "./data"
//! delimiter = ","
//! settle_delay_ms = 300
//! trace_level = "debug"
//! navigation_file = "~/.config/survey-lens/navigation.toml"
//! ```
//!
//! # Initialization Flow
//!
//! 1. Parse [`Config`]
//! 2. Install tracing ([`observability::init_tracing`])
//! 3. [`initialize`] builds the [`Dashboard`]: source list, cache, topic
//!    registry, navigation tree
//! 4. Optionally [`DataCache::prefetch`] so the first chart finds the dataset
//!    already loading
//!
//! # Example
//!
//! ```rust,no_run
//! use survey_lens::app::{handle_event, Action, SearchEvent};
//! use survey_lens::{initialize, Config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> survey_lens::Result<()> {
//! let dashboard = initialize(&Config::default())?;
//!
//! let dataset = dashboard.cache().load_data().await.map_err(|e| (*e).clone())?;
//! println!("{} responses", dataset.len());
//!
//! let mut search = dashboard.search_state();
//! handle_event(&mut search, &SearchEvent::QueryChanged("income".to_string()));
//! handle_event(&mut search, &SearchEvent::KeyDown);
//! let (_, actions) = handle_event(&mut search, &SearchEvent::Activate);
//!
//! let coordinator = dashboard.coordinator(|path: &str| println!("route → {path}"));
//! for action in &actions {
//!     coordinator
//!         .execute(action, Some("overview"), |topic, slug| {
//!             println!("scroll to {topic} ({slug:?})");
//!         })
//!         .await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod navigation;
pub mod observability;
pub mod search;
pub mod topic;

pub use app::{handle_event, Action, SearchEvent, SearchState};
pub use data::{DataCache, DefaultFetcher, SourceFetcher, SourceList};
pub use domain::{Dataset, NavigationTree, Result, RouteLocation, SearchResult, SurveyError};
pub use navigation::{NavigationCoordinator, Router, SettleStrategy};
pub use search::SearchIndex;
pub use topic::{TopicContext, TopicRegistry, TopicResolver};

use data::DEFAULT_FALLBACK_URL;
use infrastructure::expand_tilde;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SURVEY_LENS_";

/// Runtime configuration.
///
/// # Example
///
/// ```rust
/// use survey_lens::Config;
///
/// let config = Config {
///     data_dir: Some("/srv/dashboard/public".to_string()),
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.data_file, "survey_data.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Environment-specific primary location of the dataset (directory or
    /// URL base). Skipped when unset.
    pub data_dir: Option<String>,

    /// Bare dataset filename. Default: `"survey_data.csv"`
    pub data_file: String,

    /// Relative data directory tried second. Default: `"./data"`
    pub relative_dir: String,

    /// Remote fallback tried last. Empty disables it.
    pub fallback_url: String,

    /// Field delimiter of the dataset. Default: `,`
    pub delimiter: u8,

    /// Settle delay after a cross-section route change. Default: 300
    pub settle_delay_ms: u64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Rotating trace file. Logs go to stderr when unset.
    pub trace_file: Option<PathBuf>,

    /// TOML navigation tree. An empty tree is used when unset.
    pub navigation_file: Option<PathBuf>,

    /// TOML topic registry. The built-in registry is used when unset.
    pub registry_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            data_file: "survey_data.csv".to_string(),
            relative_dir: "./data".to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            delimiter: b',',
            settle_delay_ms: navigation::DEFAULT_SETTLE_DELAY_MS,
            trace_level: None,
            trace_file: None,
            navigation_file: None,
            registry_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// Unknown keys are ignored. Values that fail to parse fall back to their
    /// defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: kept verbatim; a leading `~` is expanded for local paths
    /// - `data_file`, `relative_dir`: kept verbatim, blank values ignored
    /// - `fallback_url`: kept verbatim; an empty value disables the fallback
    /// - `delimiter`: a single ASCII character, or `tab`/`\t`
    /// - `settle_delay_ms`: String → `u64`
    /// - `trace_file`, `navigation_file`, `registry_file`: paths, `~` expanded
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use survey_lens::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("delimiter".to_string(), "tab".to_string());
    /// map.insert("settle_delay_ms".to_string(), "450".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.delimiter, b'\t');
    /// assert_eq!(config.settle_delay_ms, 450);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let path = |key: &str| non_blank(key).map(|v| expand_tilde(&v));

        let delimiter = config
            .get("delimiter")
            .map(String::as_str)
            .and_then(parse_delimiter)
            .unwrap_or(defaults.delimiter);

        let settle_delay_ms = config
            .get("settle_delay_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.settle_delay_ms);

        Self {
            data_dir: non_blank("data_dir").map(|dir| {
                if dir.starts_with('~') {
                    expand_tilde(&dir).display().to_string()
                } else {
                    dir
                }
            }),
            data_file: non_blank("data_file").unwrap_or(defaults.data_file),
            relative_dir: non_blank("relative_dir").unwrap_or(defaults.relative_dir),
            fallback_url: config
                .get("fallback_url")
                .map_or(defaults.fallback_url, |url| url.trim().to_string()),
            delimiter,
            settle_delay_ms,
            trace_level: non_blank("trace_level"),
            trace_file: path("trace_file"),
            navigation_file: path("navigation_file"),
            registry_file: path("registry_file"),
        }
    }

    /// Reads configuration from `SURVEY_LENS_*` environment variables.
    ///
    /// `SURVEY_LENS_DATA_DIR` maps to `data_dir`, and so on.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let map = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_ascii_lowercase(), value))
            })
            .collect::<BTreeMap<_, _>>();
        Self::from_map(&map)
    }

    /// Reads configuration from a flat TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the file cannot be read or is not a
    /// TOML table.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SurveyError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a flat TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the document is not valid TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: BTreeMap<String, toml::Value> = toml::from_str(contents)?;
        let map = table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();
        Ok(Self::from_map(&map))
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn parse_delimiter(value: &str) -> Option<u8> {
    match value {
        "tab" | "\\t" | "\t" => Some(b'\t'),
        _ => {
            let value = value.trim();
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => u8::try_from(c).ok(),
                _ => None,
            }
        }
    }
}

/// The wired-up dashboard core.
///
/// Owns one dataset cache, one topic context, and one navigation tree for the
/// session. Cheap to share: all members are reference counted.
#[derive(Debug, Clone)]
pub struct Dashboard {
    cache: Arc<DataCache>,
    topics: Arc<TopicContext>,
    resolver: TopicResolver,
    search: SearchIndex,
    settle: SettleStrategy,
}

impl Dashboard {
    #[must_use]
    pub fn cache(&self) -> &Arc<DataCache> {
        &self.cache
    }

    #[must_use]
    pub fn topics(&self) -> &Arc<TopicContext> {
        &self.topics
    }

    #[must_use]
    pub fn resolver(&self) -> &TopicResolver {
        &self.resolver
    }

    #[must_use]
    pub fn tree(&self) -> &NavigationTree {
        self.search.tree()
    }

    /// A fresh search widget over the navigation tree.
    #[must_use]
    pub fn search_state(&self) -> SearchState {
        SearchState::new(self.search.clone())
    }

    /// A coordinator that changes routes through `router`.
    #[must_use]
    pub fn coordinator<R: Router>(&self, router: R) -> NavigationCoordinator<R> {
        NavigationCoordinator::new(router, self.settle.clone())
    }

    /// Replaces the settle strategy handed to new coordinators.
    #[must_use]
    pub fn with_settle_strategy(mut self, settle: SettleStrategy) -> Self {
        self.settle = settle;
        self
    }
}

/// Builds the dashboard core with the default file/HTTP fetcher.
///
/// Missing or malformed registry and navigation files are logged and replaced
/// by the built-in registry and an empty tree respectively.
///
/// # Errors
///
/// Returns [`SurveyError::Config`] if the HTTP client cannot be constructed.
pub fn initialize(config: &Config) -> Result<Dashboard> {
    let fetcher = DefaultFetcher::new()?;
    Ok(initialize_with_fetcher(config, Arc::new(fetcher)))
}

/// Builds the dashboard core around a caller-supplied fetcher.
#[must_use]
pub fn initialize_with_fetcher(config: &Config, fetcher: Arc<dyn SourceFetcher>) -> Dashboard {
    let _span = tracing::debug_span!("initialize").entered();

    let sources = SourceList::from_config(config);
    let cache = Arc::new(DataCache::new(fetcher, sources, config.delimiter));

    let registry = config.registry_file.as_ref().map_or_else(TopicRegistry::builtin, |file| {
        TopicRegistry::from_file(file).unwrap_or_else(|e| {
            tracing::warn!(registry_file = %file.display(), error = %e, "failed to load topic registry, using built-in");
            TopicRegistry::builtin()
        })
    });

    let tree = config.navigation_file.as_ref().map_or_else(NavigationTree::default, |file| {
        NavigationTree::from_file(file).unwrap_or_else(|e| {
            tracing::warn!(navigation_file = %file.display(), error = %e, "failed to load navigation tree, search disabled");
            NavigationTree::default()
        })
    });

    tracing::debug!(
        topics = registry.len(),
        sections = tree.sections.len(),
        "dashboard core initialized"
    );

    let topics = Arc::new(TopicContext::new());
    let resolver = TopicResolver::new(Arc::clone(&topics), Arc::new(registry));

    Dashboard {
        cache,
        topics,
        resolver,
        search: SearchIndex::new(Arc::new(tree)),
        settle: SettleStrategy::FixedDelay(config.settle_delay()),
    }
}
