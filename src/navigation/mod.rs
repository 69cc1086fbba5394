//! Navigation from a chosen search result to its topic.
//!
//! - [`router`]: host router boundary and the view-ready acknowledgment
//! - [`coordinator`]: same-section vs cross-section sequencing

pub mod coordinator;
pub mod router;

pub use coordinator::{
    NavigationCoordinator, NavigationOutcome, SettleStrategy, DEFAULT_SETTLE_DELAY,
    DEFAULT_SETTLE_DELAY_MS,
};
pub use router::{Router, ViewReady};
