//! Search widget state: query, results, highlight cursor, and panel visibility.
//!
//! [`SearchState`] is the single source of truth for the search box. Results
//! are derived from the query on every change and never outlive it.
//!
//! # Highlight Cursor
//!
//! The cursor starts at "nothing highlighted" (`None`, the −1 position).
//! Moving down steps toward the last result and stops there; moving up steps
//! toward the first result and stops there. Neither direction wraps.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use survey_lens::app::SearchState;
//! use survey_lens::domain::NavigationTree;
//! use survey_lens::search::SearchIndex;
//!
//! let mut state = SearchState::new(SearchIndex::new(Arc::new(NavigationTree::default())));
//! state.set_query("income");
//! assert!(state.results().is_empty());
//! assert_eq!(state.highlighted_index(), None);
//! ```

use super::modes::PanelState;
use crate::domain::SearchResult;
use crate::search::SearchIndex;

/// State of one search widget.
#[derive(Debug, Clone)]
pub struct SearchState {
    index: SearchIndex,

    /// Text currently in the input.
    query: String,

    /// Results for `query`, rebuilt on every change.
    results: Vec<SearchResult>,

    /// Highlighted position in `results`; `None` means nothing highlighted.
    highlighted: Option<usize>,

    panel: PanelState,
}

impl SearchState {
    #[must_use]
    pub fn new(index: SearchIndex) -> Self {
        Self {
            index,
            query: String::new(),
            results: Vec::new(),
            highlighted: None,
            panel: PanelState::Closed,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub const fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    #[must_use]
    pub const fn panel(&self) -> PanelState {
        self.panel
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    /// The highlighted result, if any.
    #[must_use]
    pub fn highlighted_result(&self) -> Option<&SearchResult> {
        self.highlighted.and_then(|idx| self.results.get(idx))
    }

    /// Replaces the query, rebuilds results, and resets the cursor.
    ///
    /// The panel opens for a non-blank query and closes for a blank one.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_results();
    }

    pub(crate) fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh_results();
    }

    pub(crate) fn pop_char(&mut self) {
        self.query.pop();
        self.refresh_results();
    }

    fn refresh_results(&mut self) {
        self.results = self.index.query(&self.query);
        self.highlighted = None;
        self.panel = if self.query.trim().is_empty() {
            PanelState::Closed
        } else {
            PanelState::Open
        };

        tracing::trace!(
            query = %self.query,
            result_count = self.results.len(),
            "search results refreshed"
        );
    }

    /// Moves the cursor one step toward the last result, stopping there.
    pub fn move_highlight_down(&mut self) {
        let Some(last) = self.results.len().checked_sub(1) else {
            return;
        };
        self.highlighted = Some(self.highlighted.map_or(0, |idx| (idx + 1).min(last)));
    }

    /// Moves the cursor one step toward the first result, stopping there.
    pub fn move_highlight_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.highlighted = Some(self.highlighted.map_or(0, |idx| idx.saturating_sub(1)));
    }

    /// Hides the panel, leaving the query text as typed.
    pub fn close_panel(&mut self) {
        self.panel = PanelState::Closed;
        self.highlighted = None;
    }

    /// Shows the panel again if there is a query to show results for.
    pub fn reopen_panel(&mut self) {
        if !self.query.trim().is_empty() {
            self.panel = PanelState::Open;
        }
    }

    /// Takes the result at `index` and resets the widget.
    ///
    /// Clears the query and results, closes the panel, and resets the cursor.
    /// Returns `None` and leaves the state untouched if `index` is out of range.
    pub fn take_selection(&mut self, index: usize) -> Option<SearchResult> {
        if index >= self.results.len() {
            return None;
        }

        let result = self.results.swap_remove(index);
        self.query.clear();
        self.results.clear();
        self.highlighted = None;
        self.panel = PanelState::Closed;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NavigationTree, Section, Subheading};
    use std::sync::Arc;

    fn state() -> SearchState {
        let tree = NavigationTree::new(vec![Section {
            title: "Sample Characteristics".to_string(),
            path: "/sample-characteristics".to_string(),
            subheadings: vec![Subheading {
                name: "Demographics".to_string(),
                path: "/sample-characteristics/demographics".to_string(),
                topics: Some(vec![
                    "Age Group".to_string(),
                    "Gender".to_string(),
                    "Language".to_string(),
                ]),
            }],
        }]);
        SearchState::new(SearchIndex::new(Arc::new(tree)))
    }

    #[test]
    fn down_moves_stop_at_last_result() {
        let mut state = state();
        state.set_query("g");
        assert_eq!(state.results().len(), 3);
        assert_eq!(state.highlighted_index(), None);

        let mut seen = Vec::new();
        for _ in 0..4 {
            state.move_highlight_down();
            seen.push(state.highlighted_index());
        }
        assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(2)]);
    }

    #[test]
    fn up_moves_stop_at_first_result() {
        let mut state = state();
        state.set_query("g");
        state.move_highlight_down();
        state.move_highlight_up();
        assert_eq!(state.highlighted_index(), Some(0));
        state.move_highlight_up();
        assert_eq!(state.highlighted_index(), Some(0));
    }

    #[test]
    fn cursor_is_inert_without_results() {
        let mut state = state();
        state.set_query("zzz");
        state.move_highlight_down();
        state.move_highlight_up();
        assert_eq!(state.highlighted_index(), None);
        assert!(state.is_open());
    }

    #[test]
    fn new_query_resets_cursor_and_drops_stale_results() {
        let mut state = state();
        state.set_query("g");
        state.move_highlight_down();
        state.set_query("   ");
        assert!(state.results().is_empty());
        assert_eq!(state.highlighted_index(), None);
        assert!(!state.is_open());
    }

    #[test]
    fn selection_resets_the_widget() {
        let mut state = state();
        state.set_query("gender");
        let result = state.take_selection(0).unwrap();
        assert_eq!(result.topic_label, "Gender");
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
        assert!(!state.is_open());
        assert!(state.take_selection(0).is_none());
    }
}
