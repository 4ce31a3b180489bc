//! Analysis session: the state a front end keeps between runs.
//!
//! A session owns one classifier, the current result set and the last
//! user-facing error. At most one analysis runs at a time; a second call
//! while one is outstanding fails with [`SentioError::AnalysisInProgress`]
//! instead of queueing. Results are replaced wholesale on success and left
//! untouched on failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{error, info, instrument};

use crate::aggregate::aggregate;
use crate::classifier::SentimentClassifier;
use crate::input::TextSource;
use crate::providers::SentimentProvider;
use crate::types::{AnalysisResult, BatchStats};
use crate::{Result, SentioError};

#[derive(Default)]
struct SessionState {
    results: Arc<Vec<AnalysisResult>>,
    last_error: Option<String>,
}

/// Single-flight analysis session over a [`SentimentClassifier`].
pub struct AnalysisSession<P> {
    classifier: SentimentClassifier<P>,
    in_flight: AtomicBool,
    state: RwLock<SessionState>,
}

/// Clears the in-flight flag when the analysis finishes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| SentioError::AnalysisInProgress)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P: SentimentProvider> AnalysisSession<P> {
    pub fn new(classifier: SentimentClassifier<P>) -> Self {
        Self {
            classifier,
            in_flight: AtomicBool::new(false),
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn classifier(&self) -> &SentimentClassifier<P> {
        &self.classifier
    }

    /// Normalize `source` and classify it.
    ///
    /// Returns `Ok(None)` without contacting the provider when the input
    /// holds no text. On success the new results replace the previous ones
    /// and are returned.
    #[instrument(name = "session.analyze", skip(self, source))]
    pub async fn analyze(&self, source: &TextSource) -> Result<Option<Arc<Vec<AnalysisResult>>>> {
        let texts = source.normalize_with(self.classifier.input_limits());
        if texts.is_empty() {
            return Ok(None);
        }

        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        self.write_state(|state| state.last_error = None);

        match self.classifier.classify(&texts).await {
            Ok(results) => {
                info!(items = results.len(), "analysis complete");
                let results = Arc::new(results);
                self.write_state(|state| state.results = Arc::clone(&results));
                Ok(Some(results))
            }
            Err(e) => {
                error!(error = %e, "sentiment analysis failed");
                let message = e.user_message();
                self.write_state(|state| state.last_error = Some(message));
                Err(e)
            }
        }
    }

    /// Whether an analysis is currently outstanding.
    pub fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The results of the last successful run.
    pub fn results(&self) -> Arc<Vec<AnalysisResult>> {
        Arc::clone(&self.read_state().results)
    }

    /// Statistics over [`results`](Self::results).
    pub fn stats(&self) -> BatchStats {
        aggregate(&self.read_state().results)
    }

    /// User-facing message for the last failed run, cleared when a new run starts.
    pub fn last_error(&self) -> Option<String> {
        self.read_state().last_error.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self, update: impl FnOnce(&mut SessionState)) {
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut state);
    }
}
