//! Search over the static navigation tree.
//!
//! Results are rebuilt from scratch for every query and never cached, so a
//! result list can never outlive the query it was built for.

use crate::domain::{NavigationTree, ResultKind, SearchResult, Section, Subheading};
use std::collections::HashSet;
use std::sync::Arc;

/// Query engine over one navigation tree.
///
/// # Matching Rules
///
/// For each subheading, in tree order:
///
/// 1. If the subheading name contains the query and the subheading owns at
///    least one topic, emit a `Subheading` result pointing at its first topic.
/// 2. For each topic containing the query, emit a `Topic` result for it.
///
/// Matching is a case-insensitive substring test on the trimmed query. The
/// concatenated list is then deduplicated by
/// `(topic_label, subheading_slug, section_key)`, keeping first occurrences.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use survey_lens::domain::{NavigationTree, ResultKind, Section, Subheading};
/// use survey_lens::search::SearchIndex;
///
/// let tree = NavigationTree::new(vec![Section {
///     title: "Sample Characteristics".to_string(),
///     path: "/sample-characteristics".to_string(),
///     subheadings: vec![Subheading {
///         name: "Household".to_string(),
///         path: "/sample-characteristics/household".to_string(),
///         topics: Some(vec!["Household Income".to_string(), "Housing Type".to_string()]),
///     }],
/// }]);
///
/// let index = SearchIndex::new(Arc::new(tree));
/// let results = index.query("hous");
///
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].kind, ResultKind::Subheading);
/// assert_eq!(results[0].topic_label, "Household Income");
/// ```
#[derive(Debug, Clone)]
pub struct SearchIndex {
    tree: Arc<NavigationTree>,
}

impl SearchIndex {
    #[must_use]
    pub fn new(tree: Arc<NavigationTree>) -> Self {
        Self { tree }
    }

    #[must_use]
    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    /// Builds the result list for `query`. Blank queries return nothing.
    #[must_use]
    pub fn query(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let _span = tracing::debug_span!(
            "search_query",
            query_len = needle.len(),
            sections = self.tree.sections.len()
        )
        .entered();

        let matches = self.tree.sections.iter().flat_map(|section| {
            section
                .subheadings
                .iter()
                .flat_map(|subheading| subheading_matches(section, subheading, &needle))
                .collect::<Vec<_>>()
        });

        let results = dedup(matches);

        tracing::debug!(result_count = results.len(), "search results built");
        results
    }
}

fn subheading_matches(section: &Section, subheading: &Subheading, needle: &str) -> Vec<SearchResult> {
    let topics = subheading.topics();
    let mut results = Vec::new();

    if let Some(first_topic) = topics.first() {
        if subheading.name.to_lowercase().contains(needle) {
            results.push(build_result(
                section,
                subheading,
                ResultKind::Subheading,
                &subheading.name,
                first_topic,
            ));
        }
    }

    results.extend(
        topics
            .iter()
            .filter(|topic| topic.to_lowercase().contains(needle))
            .map(|topic| build_result(section, subheading, ResultKind::Topic, topic, topic)),
    );

    results
}

fn build_result(
    section: &Section,
    subheading: &Subheading,
    kind: ResultKind,
    label: &str,
    topic_label: &str,
) -> SearchResult {
    SearchResult {
        kind,
        label: label.to_string(),
        section_title: section.title.clone(),
        section_key: section.key().to_string(),
        subheading_name: subheading.name.clone(),
        subheading_slug: subheading.slug().to_string(),
        topic_label: topic_label.to_string(),
    }
}

/// Keeps the first result for each composite key.
fn dedup(results: impl IntoIterator<Item = SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    results
        .into_iter()
        .filter(|result| {
            let (topic, slug, section) = result.composite_key();
            seen.insert((topic.to_string(), slug.to_string(), section.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subheading(name: &str, path: &str, topics: &[&str]) -> Subheading {
        Subheading {
            name: name.to_string(),
            path: path.to_string(),
            topics: if topics.is_empty() {
                None
            } else {
                Some(topics.iter().map(ToString::to_string).collect())
            },
        }
    }

    fn tree() -> NavigationTree {
        NavigationTree::new(vec![
            Section {
                title: "Sample Characteristics".to_string(),
                path: "/sample-characteristics".to_string(),
                subheadings: vec![
                    subheading(
                        "Household",
                        "/sample-characteristics/household",
                        &["Household Income", "Household Size", "Housing Type"],
                    ),
                    subheading("Demographics", "/sample-characteristics/demographics", &["Gender", "Age Group"]),
                    subheading("Income", "/sample-characteristics/income", &[]),
                ],
            },
            Section {
                title: "Wellbeing".to_string(),
                path: "/wellbeing".to_string(),
                subheadings: vec![subheading(
                    "Financial Security",
                    "/wellbeing/financial-security",
                    &["Income", "Savings"],
                )],
            },
        ])
    }

    fn index() -> SearchIndex {
        SearchIndex::new(Arc::new(tree()))
    }

    #[test]
    fn blank_queries_return_nothing() {
        assert!(index().query("").is_empty());
        assert!(index().query("   \t").is_empty());
    }

    #[test]
    fn subheading_hit_points_at_first_topic() {
        let results = index().query("demographics");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, ResultKind::Subheading);
        assert_eq!(results[0].label, "Demographics");
        assert_eq!(results[0].topic_label, "Gender");
        assert_eq!(results[0].section_key, "sample-characteristics");
        assert_eq!(results[0].subheading_slug, "demographics");
    }

    #[test]
    fn subheading_without_topics_is_never_emitted() {
        let results = index().query("income");
        assert!(results
            .iter()
            .all(|r| !(r.kind == ResultKind::Subheading && r.subheading_slug == "income")));
    }

    #[test]
    fn same_topic_in_different_places_stays_distinct() {
        let results = index().query("income");
        let keys: Vec<(&str, &str, &str)> = results.iter().map(SearchResult::composite_key).collect();
        assert_eq!(
            keys,
            vec![
                ("Household Income", "household", "sample-characteristics"),
                ("Income", "financial-security", "wellbeing"),
            ]
        );
    }

    #[test]
    fn duplicate_keys_keep_the_first_occurrence() {
        // "Household" subheading points at "Household Income", which the topic
        // scan then emits again under the same key.
        let results = index().query("household");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].kind, ResultKind::Subheading);
        assert_eq!(results[0].topic_label, "Household Income");
        assert_eq!(results[1].kind, ResultKind::Topic);
        assert_eq!(results[1].topic_label, "Household Size");
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let results = index().query("  SAVINGS ");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Savings");
        assert_eq!(results[0].section_title, "Wellbeing");
    }

    #[test]
    fn empty_tree_yields_no_results() {
        let index = SearchIndex::new(Arc::new(NavigationTree::default()));
        assert!(index.query("income").is_empty());
    }
}
