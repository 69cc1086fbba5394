//! Static registry of topics known to each dashboard page.

use crate::domain::error::{Result, SurveyError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A topic shown on the page `/{section}/{subsection}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub section: String,
    pub subsection: String,
    pub label: String,
}

impl TopicEntry {
    #[must_use]
    pub fn new(section: &str, subsection: &str, label: &str) -> Self {
        Self {
            section: section.to_string(),
            subsection: subsection.to_string(),
            label: label.to_string(),
        }
    }
}

/// Ordered topic entries. Iteration order decides ties during resolution.
///
/// # Example
///
/// ```rust
/// use survey_lens::topic::TopicRegistry;
///
/// let registry = TopicRegistry::from_toml_str(r#"
///     [[topics]]
///     section = "wellbeing"
///     subsection = "life-satisfaction"
///     label = "Life Satisfaction"
/// "#)?;
///
/// let labels: Vec<_> = registry
///     .scoped("wellbeing", "life-satisfaction")
///     .map(|entry| entry.label.as_str())
///     .collect();
/// assert_eq!(labels, ["Life Satisfaction"]);
/// # Ok::<(), survey_lens::SurveyError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRegistry {
    #[serde(default)]
    topics: Vec<TopicEntry>,
}

impl TopicRegistry {
    #[must_use]
    pub fn new(topics: Vec<TopicEntry>) -> Self {
        Self { topics }
    }

    /// The registry shipped with the dashboard.
    #[must_use]
    pub fn builtin() -> Self {
        const BUILTIN: &[(&str, &str, &str)] = &[
            ("sample-characteristics", "demographics", "Gender"),
            ("sample-characteristics", "demographics", "Age Group"),
            ("sample-characteristics", "demographics", "Ethnicity"),
            ("sample-characteristics", "demographics", "Sexual Orientation"),
            ("sample-characteristics", "demographics", "Disability"),
            ("sample-characteristics", "household", "Household Income"),
            ("sample-characteristics", "household", "Household Size"),
            ("sample-characteristics", "household", "Housing Type"),
            ("sample-characteristics", "household", "Children in Household"),
            ("sample-characteristics", "education-employment", "Education Level"),
            ("sample-characteristics", "education-employment", "Employment Status"),
            ("attitudes", "trust", "Trust in Institutions"),
            ("attitudes", "trust", "Trust in Neighbours"),
            ("wellbeing", "life-satisfaction", "Life Satisfaction"),
            ("wellbeing", "life-satisfaction", "Loneliness"),
        ];

        Self::new(
            BUILTIN
                .iter()
                .map(|(section, subsection, label)| TopicEntry::new(section, subsection, label))
                .collect(),
        )
    }

    /// Deserializes a registry from a TOML document with `[[topics]]` tables.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the document does not match.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads a registry from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SurveyError::Config(format!("failed to read registry file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Entries for one page, in registry order.
    pub fn scoped<'a>(
        &'a self,
        section: &'a str,
        subsection: &'a str,
    ) -> impl Iterator<Item = &'a TopicEntry> + 'a {
        self.topics
            .iter()
            .filter(move |entry| entry.section == section && entry.subsection == subsection)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
