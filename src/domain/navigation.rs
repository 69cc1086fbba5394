//! Static section/topic tree and the search results built over it.
//!
//! The dashboard is organised as sections (one per top-level route), each with
//! subheadings (sub-routes), each optionally owning a list of topic names that
//! charts on that page are titled with. The tree is supplied by the host and
//! never changes during a session.

use super::error::{Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level dashboard section, e.g. "Sample Characteristics".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Route path of the section, e.g. `/sample-characteristics`.
    pub path: String,
    #[serde(default)]
    pub subheadings: Vec<Subheading>,
}

impl Section {
    /// Route key of the section: its path without surrounding slashes.
    #[must_use]
    pub fn key(&self) -> &str {
        self.path.trim_matches('/')
    }
}

/// Sub-page of a section, e.g. "Household".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subheading {
    pub name: String,
    /// Route path of the subheading, e.g. `/sample-characteristics/household`.
    pub path: String,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

impl Subheading {
    /// Final path segment, used as the subheading's slug in routes.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.path
            .trim_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Topics owned by this subheading; empty when none are declared.
    #[must_use]
    pub fn topics(&self) -> &[String] {
        self.topics.as_deref().unwrap_or_default()
    }
}

/// The full static navigation tree.
///
/// # Example
///
/// ```rust
/// use survey_lens::domain::NavigationTree;
///
/// let tree = NavigationTree::from_toml_str(r#"
///     [[sections]]
///     title = "Sample Characteristics"
///     path = "/sample-characteristics"
///
///     [[sections.subheadings]]
///     name = "Household"
///     path = "/sample-characteristics/household"
///     topics = ["Household Income", "Household Size"]
/// "#)?;
///
/// assert_eq!(tree.sections[0].key(), "sample-characteristics");
/// assert_eq!(tree.sections[0].subheadings[0].slug(), "household");
/// # Ok::<(), survey_lens::SurveyError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTree {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl NavigationTree {
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Deserializes a tree from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the document is not a valid tree.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and deserializes a tree from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SurveyError::Config(format!("failed to read navigation file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Whether a search hit came from a subheading name or a topic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Subheading,
    Topic,
}

/// One entry in a search result list.
///
/// Two results in the same list never share
/// `(topic_label, subheading_slug, section_key)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub kind: ResultKind,
    /// Text shown in the result list.
    pub label: String,
    pub section_title: String,
    pub section_key: String,
    pub subheading_name: String,
    pub subheading_slug: String,
    /// Topic the rendering layer should scroll to when this result is chosen.
    pub topic_label: String,
}

impl SearchResult {
    /// Composite key used for deduplication.
    #[must_use]
    pub fn composite_key(&self) -> (&str, &str, &str) {
        (&self.topic_label, &self.subheading_slug, &self.section_key)
    }

    /// Route path of the page that owns this result.
    #[must_use]
    pub fn route_path(&self) -> String {
        format!("/{}/{}", self.section_key, self.subheading_slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_slugs_ignore_slashes() {
        let section = Section {
            title: "Attitudes".to_string(),
            path: "/attitudes/".to_string(),
            subheadings: vec![Subheading {
                name: "Trust".to_string(),
                path: "trust".to_string(),
                topics: None,
            }],
        };
        assert_eq!(section.key(), "attitudes");
        assert_eq!(section.subheadings[0].slug(), "trust");
        assert!(section.subheadings[0].topics().is_empty());
    }

    #[test]
    fn toml_tree_without_topics_parses() {
        let tree = NavigationTree::from_toml_str(
            r#"
            [[sections]]
            title = "Overview"
            path = "/overview"

            [[sections.subheadings]]
            name = "Summary"
            path = "/overview/summary"
            "#,
        )
        .unwrap();
        assert_eq!(tree.sections.len(), 1);
        assert_eq!(tree.sections[0].subheadings[0].topics, None);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = NavigationTree::from_toml_str("[[sections]]\ntitle = 3").unwrap_err();
        assert!(matches!(err, SurveyError::Config(_)));
    }

    #[test]
    fn search_result_serializes_for_the_host() {
        let result = SearchResult {
            kind: ResultKind::Topic,
            label: "Household Income".to_string(),
            section_title: "Sample Characteristics".to_string(),
            section_key: "sample-characteristics".to_string(),
            subheading_name: "Household".to_string(),
            subheading_slug: "household".to_string(),
            topic_label: "Household Income".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "topic");
        assert_eq!(json["sectionKey"], "sample-characteristics");
        assert_eq!(result.route_path(), "/sample-characteristics/household");
    }
}
