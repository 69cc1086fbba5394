//! Cross-view navigation after a search selection.
//!
//! When the chosen result lives on the page already showing, the rendering
//! layer is told to scroll to the topic straight away. Otherwise the route is
//! changed first, and the callback fires once the destination view has had a
//! chance to mount.
//!
//! # Settling
//!
//! Whether the destination has mounted is not observable by default, so the
//! coordinator waits a fixed, empirically tuned delay ([`DEFAULT_SETTLE_DELAY`])
//! and then fires the callback regardless. The delay can under-run on a slow
//! mount; that is accepted and not reported. Hosts whose views can acknowledge
//! mounting use [`SettleStrategy::AwaitReady`] instead, which fires as soon as
//! the view calls [`ViewReady::mark_ready`] and falls back to the timeout.
//!
//! Dropping the future returned by [`NavigationCoordinator::navigate`] during
//! the settle cancels the pending callback; the route change already made
//! stays.

use super::router::{Router, ViewReady};
use crate::app::Action;
use crate::domain::SearchResult;
use std::time::Duration;
use tokio::sync::watch;

/// Default wait between a route change and the topic callback, in milliseconds.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Default wait between a route change and the topic callback.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(DEFAULT_SETTLE_DELAY_MS);

/// How the coordinator decides the destination view is ready.
#[derive(Debug, Clone)]
pub enum SettleStrategy {
    /// Wait a fixed duration, then fire.
    FixedDelay(Duration),
    /// Fire when the view acknowledges, or after `timeout` at the latest.
    AwaitReady { signal: ViewReady, timeout: Duration },
}

impl Default for SettleStrategy {
    fn default() -> Self {
        Self::FixedDelay(DEFAULT_SETTLE_DELAY)
    }
}

/// What a navigation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Same section: callback fired immediately, route untouched.
    InPlace,
    /// Route changed, then the callback fired after settling.
    CrossSection {
        /// `true` if the destination view acknowledged before the callback.
        acknowledged: bool,
    },
}

enum PendingSettle {
    Delay(Duration),
    Ready {
        receiver: watch::Receiver<u64>,
        timeout: Duration,
    },
}

impl PendingSettle {
    async fn wait(self) -> bool {
        match self {
            Self::Delay(delay) => {
                tokio::time::sleep(delay).await;
                false
            }
            Self::Ready {
                mut receiver,
                timeout,
            } => matches!(
                tokio::time::timeout(timeout, receiver.changed()).await,
                Ok(Ok(()))
            ),
        }
    }
}

/// Sequences route changes and topic callbacks for search selections.
///
/// # Example
///
/// ```rust
/// use survey_lens::domain::{ResultKind, SearchResult};
/// use survey_lens::navigation::{NavigationCoordinator, NavigationOutcome, SettleStrategy};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let coordinator = NavigationCoordinator::new(
///     |path: &str| println!("route → {path}"),
///     SettleStrategy::default(),
/// );
///
/// let result = SearchResult {
///     kind: ResultKind::Topic,
///     label: "Gender".to_string(),
///     section_title: "Sample Characteristics".to_string(),
///     section_key: "sample-characteristics".to_string(),
///     subheading_name: "Demographics".to_string(),
///     subheading_slug: "demographics".to_string(),
///     topic_label: "Gender".to_string(),
/// };
///
/// let outcome = coordinator
///     .navigate(&result, Some("sample-characteristics"), |topic, slug| {
///         println!("highlight {topic} in {slug:?}");
///     })
///     .await;
/// assert_eq!(outcome, NavigationOutcome::InPlace);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NavigationCoordinator<R> {
    router: R,
    strategy: SettleStrategy,
}

impl<R: Router> NavigationCoordinator<R> {
    #[must_use]
    pub const fn new(router: R, strategy: SettleStrategy) -> Self {
        Self { router, strategy }
    }

    #[must_use]
    pub const fn strategy(&self) -> &SettleStrategy {
        &self.strategy
    }

    /// Navigates to `result` and invokes `on_topic_click(topic_label, subheading_slug)`.
    ///
    /// `active_section` is the section key of the page currently showing, if
    /// any.
    pub async fn navigate<F>(
        &self,
        result: &SearchResult,
        active_section: Option<&str>,
        on_topic_click: F,
    ) -> NavigationOutcome
    where
        F: FnOnce(&str, Option<&str>),
    {
        let slug = Some(result.subheading_slug.as_str()).filter(|s| !s.is_empty());

        if active_section == Some(result.section_key.as_str()) {
            tracing::debug!(
                topic = %result.topic_label,
                section = %result.section_key,
                "same-section navigation"
            );
            on_topic_click(&result.topic_label, slug);
            return NavigationOutcome::InPlace;
        }

        // Subscribe before the route change so an acknowledgment triggered by
        // it cannot be missed.
        let pending = match &self.strategy {
            SettleStrategy::FixedDelay(delay) => PendingSettle::Delay(*delay),
            SettleStrategy::AwaitReady { signal, timeout } => PendingSettle::Ready {
                receiver: signal.watch(),
                timeout: *timeout,
            },
        };

        let path = result.route_path();
        tracing::debug!(
            path = %path,
            from = ?active_section,
            topic = %result.topic_label,
            "cross-section navigation"
        );
        self.router.navigate(&path);

        let acknowledged = pending.wait().await;
        tracing::trace!(acknowledged, "destination settled");

        on_topic_click(&result.topic_label, slug);
        NavigationOutcome::CrossSection { acknowledged }
    }

    /// Executes an [`Action`] emitted by the search widget.
    pub async fn execute<F>(
        &self,
        action: &Action,
        active_section: Option<&str>,
        on_topic_click: F,
    ) -> NavigationOutcome
    where
        F: FnOnce(&str, Option<&str>),
    {
        match action {
            Action::Navigate(result) => self.navigate(result, active_section, on_topic_click).await,
        }
    }
}
