//! Application layer for the search widget: state, events, and actions.
//!
//! # Architecture
//!
//! The widget follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Input → SearchEvent → handle_event → SearchState mutations → Actions
//!                                                                     ↓
//!                                                  NavigationCoordinator
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic
//! - [`modes`]: Panel and pointer state types
//! - [`state`]: Widget state and highlight cursor

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, SearchEvent};
pub use modes::{PanelState, PointerTarget};
pub use state::SearchState;
