//! Topic resolution cascade.
//!
//! Charts and panels often do not know for certain which survey topic they
//! display. [`resolve_topic`] works it out from whatever context is available,
//! trying each layer in priority order and stopping at the first that yields a
//! label:
//!
//! 1. The override held in [`TopicContext`], verbatim
//! 2. The hint text against [`HINT_KEYWORDS`]
//! 3. On the household page, the fragment tail against [`HOUSEHOLD_KEYWORDS`]
//! 4. The fragment tail against registry labels for the current page
//! 5. The first registry entry for the current page
//! 6. The hint text itself
//! 7. [`DEFAULT_TOPIC_LABEL`]
//!
//! Resolution is pure: identical inputs always give an identical label, and it
//! never fails.

use super::context::TopicContext;
use super::registry::TopicRegistry;
use super::tables::{first_match, HINT_KEYWORDS, HOUSEHOLD_KEYWORDS};
use crate::domain::RouteLocation;
use std::sync::Arc;

/// Label used when nothing else matches.
pub const DEFAULT_TOPIC_LABEL: &str = "Survey Responses";

/// Section whose household subsection gets fragment keyword matching.
pub const HOUSEHOLD_SECTION: &str = "sample-characteristics";

/// Subsection that gets fragment keyword matching.
pub const HOUSEHOLD_SUBSECTION: &str = "household";

/// Cascade layer that produced a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionLayer {
    Override,
    HintKeyword,
    HouseholdFragment,
    FragmentRegistry,
    FirstRegistryEntry,
    Hint,
    Default,
}

/// A resolved label and the layer it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub label: String,
    pub layer: ResolutionLayer,
}

impl Resolution {
    fn new(label: impl Into<String>, layer: ResolutionLayer) -> Self {
        Self {
            label: label.into(),
            layer,
        }
    }
}

/// Everything the cascade looks at.
#[derive(Debug, Clone, Copy)]
pub struct TopicQuery<'a> {
    /// Current override from the topic context.
    pub override_topic: Option<&'a str>,
    /// Free text describing the chart, typically its question wording.
    pub hint: Option<&'a str>,
    pub location: &'a RouteLocation,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Runs the resolution cascade.
///
/// # Example
///
/// ```rust
/// use survey_lens::domain::RouteLocation;
/// use survey_lens::topic::{resolve_topic, TopicQuery, TopicRegistry};
///
/// let registry = TopicRegistry::builtin();
/// let location = RouteLocation::new("/sample-characteristics/household", Some("#household-income"));
///
/// let resolution = resolve_topic(
///     &TopicQuery { override_topic: None, hint: None, location: &location },
///     &registry,
/// );
/// assert_eq!(resolution.label, "Household Income");
/// ```
#[must_use]
pub fn resolve_topic(query: &TopicQuery<'_>, registry: &TopicRegistry) -> Resolution {
    let resolution = cascade(query, registry);
    tracing::trace!(
        label = %resolution.label,
        layer = ?resolution.layer,
        path = query.location.path(),
        "topic resolved"
    );
    resolution
}

fn cascade(query: &TopicQuery<'_>, registry: &TopicRegistry) -> Resolution {
    // Only an empty override counts as unset; anything else is returned as is.
    if let Some(topic) = query.override_topic.filter(|t| !t.is_empty()) {
        return Resolution::new(topic, ResolutionLayer::Override);
    }

    let hint = non_blank(query.hint);

    if let Some(label) = hint.and_then(|h| first_match(HINT_KEYWORDS, h)) {
        return Resolution::new(label, ResolutionLayer::HintKeyword);
    }

    let location = query.location;
    let page = location.section().zip(location.subsection());
    let tail = location.fragment_tail();

    if page == Some((HOUSEHOLD_SECTION, HOUSEHOLD_SUBSECTION)) {
        if let Some(label) = tail.and_then(|t| first_match(HOUSEHOLD_KEYWORDS, t)) {
            return Resolution::new(label, ResolutionLayer::HouseholdFragment);
        }
    }

    if let Some((section, subsection)) = page {
        if let Some(tail) = tail {
            let raw = tail.to_lowercase();
            // Fragments are usually slugs of title-cased labels.
            let slug = raw.replace(['-', '_'], " ");
            let scoped = || registry.scoped(section, subsection);
            let matched = scoped()
                .find(|entry| entry.label.to_lowercase().contains(&raw))
                .or_else(|| scoped().find(|entry| entry.label.to_lowercase().contains(&slug)));
            if let Some(entry) = matched {
                return Resolution::new(&entry.label, ResolutionLayer::FragmentRegistry);
            }
        }

        if let Some(entry) = registry.scoped(section, subsection).next() {
            return Resolution::new(&entry.label, ResolutionLayer::FirstRegistryEntry);
        }
    }

    if let Some(hint) = hint {
        return Resolution::new(hint, ResolutionLayer::Hint);
    }

    Resolution::new(DEFAULT_TOPIC_LABEL, ResolutionLayer::Default)
}

/// Resolver bound to a live [`TopicContext`] and a registry.
///
/// Reads the committed override at call time; staged overrides that have not
/// been flushed are not visible yet.
#[derive(Debug, Clone)]
pub struct TopicResolver {
    context: Arc<TopicContext>,
    registry: Arc<TopicRegistry>,
}

impl TopicResolver {
    #[must_use]
    pub fn new(context: Arc<TopicContext>, registry: Arc<TopicRegistry>) -> Self {
        Self { context, registry }
    }

    #[must_use]
    pub fn context(&self) -> &TopicContext {
        &self.context
    }

    /// Resolves the label for a chart with an optional `hint` at `location`.
    #[must_use]
    pub fn resolve(&self, hint: Option<&str>, location: &RouteLocation) -> String {
        let override_topic = self.context.get();
        let query = TopicQuery {
            override_topic: override_topic.as_deref(),
            hint,
            location,
        };
        resolve_topic(&query, &self.registry).label
    }
}
