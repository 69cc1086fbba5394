//! Shared dataset cache with request coalescing and source fallback.
//!
//! [`DataCache`] owns the one dataset every chart reads. It is constructed
//! explicitly at startup and shared by reference (`Arc<DataCache>`), never
//! reached through a global.
//!
//! # State Machine
//!
//! ```text
//!            load                 success
//!   Empty ─────────► Loading ─────────────► Ready   (terminal)
//!                      │  ▲
//!            all fail  │  │ load (retry)
//!                      ▼  │
//!                     Failed
//! ```
//!
//! Every caller that asks for data while a load is in flight awaits the same
//! [`Shared`] future, so one resolution sequence serves them all and they all
//! observe the same `Arc<Dataset>` or the same `Arc<SurveyError>`.
//!
//! An in-flight load is owned by the cache, not by its callers: if every
//! caller drops its future, the next call picks the same load back up instead
//! of starting a new one. [`DataCache::prefetch`] drives it on a background
//! task when nobody is waiting.

use super::fetcher::SourceFetcher;
use super::source::SourceList;
use crate::domain::error::{Result, SourceFailure, SurveyError};
use crate::domain::Dataset;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Outcome of a dataset load, shared verbatim by every coalesced caller.
pub type LoadOutcome = std::result::Result<Arc<Dataset>, Arc<SurveyError>>;

type SharedLoad = Shared<BoxFuture<'static, LoadOutcome>>;

/// Observable cache state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing loaded or attempted yet.
    Empty,
    /// A resolution sequence is in flight.
    Loading,
    /// The dataset is cached for the rest of the session.
    Ready,
    /// The last resolution sequence exhausted every source. The next load retries.
    Failed,
}

enum Slot {
    Empty,
    Loading(SharedLoad),
    Ready(Arc<Dataset>),
    Failed(Arc<SurveyError>),
}

impl Slot {
    const fn state(&self) -> CacheState {
        match self {
            Self::Empty => CacheState::Empty,
            Self::Loading(_) => CacheState::Loading,
            Self::Ready(_) => CacheState::Ready,
            Self::Failed(_) => CacheState::Failed,
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The session's single dataset cache.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use survey_lens::Config;
/// use survey_lens::data::{DataCache, DefaultFetcher, SourceList};
///
/// # async fn run() -> survey_lens::Result<()> {
/// let config = Config::default();
/// let cache = Arc::new(DataCache::new(
///     Arc::new(DefaultFetcher::new()?),
///     SourceList::from_config(&config),
///     config.delimiter,
/// ));
///
/// match cache.load_data().await {
///     Ok(dataset) => println!("{} responses", dataset.len()),
///     Err(err) => eprintln!("no data: {err}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct DataCache {
    fetcher: Arc<dyn SourceFetcher>,
    sources: Arc<SourceList>,
    delimiter: u8,
    slot: Arc<Mutex<Slot>>,
}

impl DataCache {
    /// Creates an empty cache over the given candidates.
    #[must_use]
    pub fn new(fetcher: Arc<dyn SourceFetcher>, sources: SourceList, delimiter: u8) -> Self {
        Self {
            fetcher,
            sources: Arc::new(sources),
            delimiter,
            slot: Arc::new(Mutex::new(Slot::Empty)),
        }
    }

    /// Current state of the cache.
    #[must_use]
    pub fn state(&self) -> CacheState {
        lock(&self.slot).state()
    }

    /// The cached dataset, if a load has succeeded.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<Dataset>> {
        match &*lock(&self.slot) {
            Slot::Ready(dataset) => Some(Arc::clone(dataset)),
            _ => None,
        }
    }

    /// Returns the dataset, loading it first if necessary.
    ///
    /// - `Ready`: returns the cached dataset immediately.
    /// - `Loading`: joins the in-flight load.
    /// - `Empty` or `Failed`: starts a fresh walk of the candidate list.
    ///
    /// # Errors
    ///
    /// Returns the shared [`SurveyError::SourcesExhausted`] when every
    /// candidate failed. The cache stays retryable.
    pub async fn load_data(&self) -> LoadOutcome {
        match self.begin() {
            Ok(dataset) => Ok(dataset),
            Err(load) => load.await,
        }
    }

    /// Starts loading in the background without waiting for the result.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn prefetch(&self) {
        if let Err(load) = self.begin() {
            tokio::spawn(load);
        }
    }

    /// Returns the ready dataset, or the shared load to await.
    fn begin(&self) -> std::result::Result<Arc<Dataset>, SharedLoad> {
        let mut slot = lock(&self.slot);
        match &*slot {
            Slot::Ready(dataset) => {
                tracing::trace!("dataset cache hit");
                return Ok(Arc::clone(dataset));
            }
            Slot::Loading(load) => {
                tracing::debug!("joining in-flight dataset load");
                return Err(load.clone());
            }
            Slot::Empty | Slot::Failed(_) => {}
        }

        tracing::debug!(previous = ?slot.state(), "starting dataset load");
        let load = self.start_load();
        *slot = Slot::Loading(load.clone());
        Err(load)
    }

    fn start_load(&self) -> SharedLoad {
        let fetcher = Arc::clone(&self.fetcher);
        let sources = Arc::clone(&self.sources);
        let slot = Arc::clone(&self.slot);
        let delimiter = self.delimiter;

        async move {
            let outcome: LoadOutcome = resolve(fetcher.as_ref(), &sources, delimiter)
                .await
                .map(Arc::new)
                .map_err(Arc::new);

            {
                let mut guard = lock(&slot);
                *guard = match &outcome {
                    Ok(dataset) => Slot::Ready(Arc::clone(dataset)),
                    Err(err) => Slot::Failed(Arc::clone(err)),
                };
            }

            outcome
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for DataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCache")
            .field("sources", &self.sources)
            .field("delimiter", &self.delimiter)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Walks the candidate list and returns the first dataset that loads.
#[tracing::instrument(name = "resolve_dataset", skip_all, fields(candidates = sources.len()))]
async fn resolve(
    fetcher: &dyn SourceFetcher,
    sources: &SourceList,
    delimiter: u8,
) -> Result<Dataset> {
    let mut attempts = Vec::with_capacity(sources.len());

    for source in sources {
        tracing::debug!(source = %source, "trying dataset source");

        let loaded = fetcher
            .fetch(source)
            .await
            .and_then(|payload| Dataset::parse(&payload, delimiter));

        match loaded {
            Ok(dataset) => {
                tracing::info!(source = %source, rows = dataset.len(), "dataset loaded");
                return Ok(dataset);
            }
            Err(err) => {
                tracing::warn!(source = %source, error = %err, "dataset source failed");
                attempts.push(SourceFailure {
                    location: source.to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    tracing::error!(attempts = attempts.len(), "all dataset sources failed");
    Err(SurveyError::SourcesExhausted { attempts })
}
