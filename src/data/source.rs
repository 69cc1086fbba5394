//! Dataset source candidates.
//!
//! A dataset can live in several places depending on how the dashboard is
//! deployed. The cache tries each candidate in priority order:
//!
//! 1. The environment-specific primary location (`data_dir`, when configured)
//! 2. A relative location (`relative_dir/data_file`)
//! 3. The bare filename (`data_file`)
//! 4. A hard-coded remote fallback URL

use crate::Config;
use std::fmt;
use std::path::PathBuf;

/// Remote copy of the survey table used when no local candidate is reachable.
pub const DEFAULT_FALLBACK_URL: &str =
    "https://raw.githubusercontent.com/survey-lens/survey-data/main/survey_data.csv";

/// One place a dataset might be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl Source {
    /// Classifies a location string as a URL or a path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use survey_lens::data::Source;
    ///
    /// assert!(matches!(Source::parse("https://example.org/a.csv"), Source::Url(_)));
    /// assert!(matches!(Source::parse("./data/a.csv"), Source::Path(_)));
    /// ```
    #[must_use]
    pub fn parse(location: &str) -> Self {
        if is_url(location) {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Joins a directory-like base and a file name, keeping URL bases as URLs.
fn join_location(base: &str, file: &str) -> Source {
    if is_url(base) {
        Source::Url(format!("{}/{}", base.trim_end_matches('/'), file))
    } else {
        Source::Path(PathBuf::from(base).join(file))
    }
}

/// Ordered list of dataset source candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceList {
    sources: Vec<Source>,
}

impl SourceList {
    #[must_use]
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Builds the standard four-tier candidate list from configuration.
    ///
    /// The primary candidate is skipped when `data_dir` is unset, and the
    /// remote fallback is skipped when `fallback_url` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use survey_lens::Config;
    /// use survey_lens::data::SourceList;
    ///
    /// let config = Config {
    ///     data_dir: Some("/srv/dashboard/public".to_string()),
    ///     ..Default::default()
    /// };
    /// let sources = SourceList::from_config(&config);
    /// assert_eq!(sources.len(), 4);
    /// ```
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut sources = Vec::with_capacity(4);

        if let Some(dir) = config.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            sources.push(join_location(dir, &config.data_file));
        }

        sources.push(join_location(&config.relative_dir, &config.data_file));
        sources.push(Source::Path(PathBuf::from(&config.data_file)));

        if !config.fallback_url.trim().is_empty() {
            sources.push(Source::parse(&config.fallback_url));
        }

        tracing::debug!(candidates = sources.len(), "built dataset source list");

        Self { sources }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a SourceList {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}
