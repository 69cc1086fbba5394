//! Boundary to the host router and the optional "view ready" signal.

use std::sync::Arc;
use tokio::sync::watch;

/// Host router capable of changing the current route.
///
/// The core never mutates the route except through this trait.
pub trait Router: Send + Sync {
    /// Switches the dashboard to `path`, e.g. `/wellbeing/financial-security`.
    fn navigate(&self, path: &str);
}

impl<F> Router for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Acknowledgment a destination view emits once it has mounted.
///
/// Cloning shares the same signal. Each call to [`mark_ready`](Self::mark_ready)
/// wakes every navigation currently waiting on it.
#[derive(Debug, Clone)]
pub struct ViewReady {
    generation: Arc<watch::Sender<u64>>,
}

impl Default for ViewReady {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewReady {
    #[must_use]
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            generation: Arc::new(generation),
        }
    }

    /// Called by the destination view when it is ready to scroll/highlight.
    pub fn mark_ready(&self) {
        self.generation.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Receiver that only reports acknowledgments made after this call.
    pub(crate) fn watch(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}
