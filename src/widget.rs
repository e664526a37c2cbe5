use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::render::{OutputSurface, Renderer};
use crate::tmdb::{DisplayList, MovieSource, SearchQuery, TmdbError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    Idle,
    Fetching,
}

#[derive(Debug)]
pub enum Outcome {
    /// The response was drawn; holds the number of cards.
    Rendered(usize),
    /// The fetch failed and the surface now shows the error state.
    Failed(TmdbError),
    /// A newer request was issued while this one was in flight.
    Stale,
    /// The fetch task panicked or was cancelled before committing.
    Aborted,
}

/// Drives fetches and renders onto a single shared output surface.
///
/// Every fetch takes a token from a monotonic counter. A response is only
/// drawn if its token is still the most recently issued one, so an older
/// request that resolves late never overwrites a newer result.
pub struct Widget {
    source: Arc<dyn MovieSource>,
    renderer: Renderer,
    surface: RwLock<OutputSurface>,
    issued: AtomicU64,
    settled: AtomicU64,
}

impl Widget {
    pub fn new(source: Arc<dyn MovieSource>, renderer: Renderer) -> Self {
        Self {
            source,
            renderer,
            surface: RwLock::new(OutputSurface::new()),
            issued: AtomicU64::new(0),
            settled: AtomicU64::new(0),
        }
    }

    pub async fn load_popular(self: &Arc<Self>) -> Outcome {
        let token = self.issue_token();
        info!(token, "Loading popular movies");

        let widget = Arc::clone(self);
        self.settle_in_task(token, async move {
            let result = widget.source.fetch_popular().await;
            widget.commit(token, None, result).await
        })
        .await
    }

    pub async fn submit(self: &Arc<Self>, query: SearchQuery) -> Outcome {
        let token = self.issue_token();
        info!(token, query = %query, "Searching movies");

        let widget = Arc::clone(self);
        self.settle_in_task(token, async move {
            let result = widget.source.fetch_search(&query).await;
            widget.commit(token, Some(query), result).await
        })
        .await
    }

    /// Fetch and commit run on their own task, so a caller that goes away
    /// mid-request cannot leave its token unsettled.
    async fn settle_in_task<F>(&self, token: u64, work: F) -> Outcome
    where
        F: std::future::Future<Output = Outcome> + Send + 'static,
    {
        match tokio::spawn(work).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(token, error = %e, "Fetch task did not complete");
                self.settled.fetch_max(token, Ordering::SeqCst);
                Outcome::Aborted
            }
        }
    }

    fn issue_token(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_token(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> WidgetState {
        if self.settled.load(Ordering::SeqCst) < self.latest_token() {
            WidgetState::Fetching
        } else {
            WidgetState::Idle
        }
    }

    pub async fn snapshot(&self) -> OutputSurface {
        self.surface.read().await.clone()
    }

    async fn commit(
        &self,
        token: u64,
        query: Option<SearchQuery>,
        result: Result<DisplayList, TmdbError>,
    ) -> Outcome {
        let mut surface = self.surface.write().await;

        let latest = self.latest_token();
        if token != latest {
            debug!(token, latest, "Dropping stale response");
            return Outcome::Stale;
        }

        let outcome = match result {
            Ok(list) => {
                self.renderer.render(&mut surface, &list, token);
                info!(token, movies = list.len(), "Rendered movies");
                Outcome::Rendered(list.len())
            }
            Err(e) => {
                warn!(token, error = %e, "Fetching movies failed");
                surface.show_error(format!("Could not load movies: {}", e), token);
                Outcome::Failed(e)
            }
        };
        surface.set_query(query.map(|q| q.to_string()));
        self.settled.store(token, Ordering::SeqCst);

        outcome
    }
}
