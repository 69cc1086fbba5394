//! Actions representing side effects requested by the search widget.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! host executes them in order; today the only effect is handing a chosen
//! result to the [`NavigationCoordinator`](crate::navigation::NavigationCoordinator).

use crate::domain::SearchResult;

/// Commands produced by [`handle_event`](super::handle_event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigate to the page owning this result and highlight its topic.
    Navigate(SearchResult),
}
