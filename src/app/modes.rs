//! Panel and pointer state types for the search widget.
//!
//! # State Machine
//!
//! The result panel is either **Open** (results visible under the input) or
//! **Closed**. It opens when the user types a non-blank query or refocuses
//! the input with one, and closes on escape, on selection, or when the user
//! clicks anywhere outside the widget.

/// Visibility of the search result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Results are hidden. The query text may still be non-empty.
    Closed,
    /// Results are shown beneath the input.
    Open,
}

/// Where a pointer press landed relative to the search widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The text input.
    Input,
    /// The result panel.
    Panel,
    /// Anywhere else on the page.
    Outside,
}
