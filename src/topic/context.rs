//! Session-scoped topic override shared between rendering components.
//!
//! A panel that knows exactly which topic it shows (for example a chart opened
//! from a search result) writes the topic here, and every resolver reading the
//! context picks it up ahead of any heuristic.
//!
//! Writes come in two flavours:
//!
//! - [`TopicContext::set`] / [`TopicContext::clear`] stage the value. Staged
//!   writes are batched with whatever else is pending and become visible at the
//!   next [`TopicContext::flush`], which the host calls once per render turn.
//! - [`TopicContext::set_immediate`] / [`TopicContext::clear_immediate`] commit
//!   at once, so the very next read in the same turn observes the new value.
//!
//! Last writer wins: an immediate write discards any staged one.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Shared holder for the current topic override.
///
/// Create one per dashboard mount and inject it (`Arc<TopicContext>`) into
/// whatever needs it. Dropping it and creating a new one resets the override.
///
/// # Example
///
/// ```rust
/// use survey_lens::topic::TopicContext;
///
/// let context = TopicContext::new();
///
/// context.set("Gender");
/// assert_eq!(context.get(), None);
/// context.flush();
/// assert_eq!(context.get().as_deref(), Some("Gender"));
///
/// context.clear_immediate();
/// assert_eq!(context.get(), None);
/// ```
#[derive(Debug)]
pub struct TopicContext {
    current: watch::Sender<Option<String>>,
    staged: Mutex<Option<Option<String>>>,
}

impl Default for TopicContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicContext {
    /// Creates a context with no override set.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current,
            staged: Mutex::new(None),
        }
    }

    fn staged(&self) -> MutexGuard<'_, Option<Option<String>>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The committed override, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Stages an override; visible after the next [`flush`](Self::flush).
    ///
    /// The resolver returns the committed value verbatim. An empty string is
    /// the one value it treats as no override.
    pub fn set(&self, topic: impl Into<String>) {
        let topic = topic.into();
        tracing::trace!(topic = %topic, "staging topic override");
        *self.staged() = Some(Some(topic));
    }

    /// Stages clearing the override; visible after the next flush.
    pub fn clear(&self) {
        tracing::trace!("staging topic override clear");
        *self.staged() = Some(None);
    }

    /// Commits an override right away, discarding any staged write.
    pub fn set_immediate(&self, topic: impl Into<String>) {
        self.staged().take();
        self.commit(Some(topic.into()));
    }

    /// Clears the override right away, discarding any staged write.
    pub fn clear_immediate(&self) {
        self.staged().take();
        self.commit(None);
    }

    /// Whether a staged write is waiting for the next flush.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.staged().is_some()
    }

    /// Commits the staged write, if any. Returns `true` when the visible value
    /// changed.
    pub fn flush(&self) -> bool {
        let staged = self.staged().take();
        staged.is_some_and(|value| self.commit(value))
    }

    /// Receiver notified whenever the committed override changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.current.subscribe()
    }

    fn commit(&self, value: Option<String>) -> bool {
        let changed = self.current.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value.clone();
                true
            }
        });

        if changed {
            tracing::debug!(topic = ?value, "topic override changed");
        }

        changed
    }
}
