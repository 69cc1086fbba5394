//! Event handling and state transition logic for the search widget.
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Input events arrive from the host (keys, text edits, pointer presses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `SearchState` methods
//! 4. Actions are collected and returned for the host to execute
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use survey_lens::app::{handle_event, SearchEvent, SearchState};
//! use survey_lens::domain::NavigationTree;
//! use survey_lens::search::SearchIndex;
//!
//! let mut state = SearchState::new(SearchIndex::new(Arc::new(NavigationTree::default())));
//! let (needs_render, actions) = handle_event(&mut state, &SearchEvent::Char('a'));
//! assert!(needs_render);
//! assert!(actions.is_empty());
//! ```

use super::modes::PointerTarget;
use super::{Action, SearchState};

/// Input events delivered to the search widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The input's text was replaced wholesale (paste, programmatic set).
    QueryChanged(String),
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Moves the highlight toward the last result.
    KeyDown,
    /// Moves the highlight toward the first result.
    KeyUp,
    /// Activates the highlighted result (Enter).
    Activate,
    /// Selects the result at this position directly (click or tap).
    Select(usize),
    /// Closes the panel, keeping the query text.
    Escape,
    /// The input regained focus.
    Focus,
    /// A pointer press landed somewhere on the page.
    PointerDown(PointerTarget),
}

/// Processes an event, mutates widget state, and returns actions to execute.
///
/// Returns `(needs_render, actions)`. `needs_render` is `false` when the event
/// left the widget unchanged.
///
/// Selecting a result (by activation or directly) emits
/// [`Action::Navigate`] and resets the widget: query cleared, panel closed,
/// highlight reset.
pub fn handle_event(state: &mut SearchState, event: &SearchEvent) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_search_event", event_type = ?event).entered();

    match event {
        SearchEvent::QueryChanged(query) => {
            state.set_query(query.clone());
            (true, vec![])
        }
        SearchEvent::Char(c) => {
            state.push_char(*c);
            (true, vec![])
        }
        SearchEvent::Backspace => {
            if state.query().is_empty() {
                return (false, vec![]);
            }
            state.pop_char();
            (true, vec![])
        }
        SearchEvent::KeyDown => {
            let before = state.highlighted_index();
            state.move_highlight_down();
            (state.highlighted_index() != before, vec![])
        }
        SearchEvent::KeyUp => {
            let before = state.highlighted_index();
            state.move_highlight_up();
            (state.highlighted_index() != before, vec![])
        }
        SearchEvent::Activate => {
            let Some(index) = state.highlighted_index() else {
                tracing::debug!("activate with nothing highlighted");
                return (false, vec![]);
            };
            select(state, index)
        }
        SearchEvent::Select(index) => select(state, *index),
        SearchEvent::Escape => {
            if !state.is_open() {
                return (false, vec![]);
            }
            state.close_panel();
            (true, vec![])
        }
        SearchEvent::Focus => {
            let was_open = state.is_open();
            state.reopen_panel();
            (state.is_open() != was_open, vec![])
        }
        SearchEvent::PointerDown(target) => match target {
            PointerTarget::Input | PointerTarget::Panel => (false, vec![]),
            PointerTarget::Outside => {
                if !state.is_open() {
                    return (false, vec![]);
                }
                tracing::trace!("pointer outside search widget, closing panel");
                state.close_panel();
                (true, vec![])
            }
        },
    }
}

fn select(state: &mut SearchState, index: usize) -> (bool, Vec<Action>) {
    state.take_selection(index).map_or_else(
        || {
            tracing::debug!(index, "selection out of range");
            (false, vec![])
        },
        |result| {
            tracing::debug!(
                topic = %result.topic_label,
                section = %result.section_key,
                subheading = %result.subheading_slug,
                "search result selected"
            );
            (true, vec![Action::Navigate(result)])
        },
    )
}
