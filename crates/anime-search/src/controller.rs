//! Search controller: input capture → fetch → render.
//!
//! Every accepted trigger gets a sequence number at issue time. A resolved
//! search is rendered only while its number is still the latest issued, so
//! a slow earlier search can never overwrite a newer one.

use crate::api::SearchBackend;
use crate::query::{SearchQuery, TriggerEvent};
use crate::view::{DisplayState, ResultsView};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// What happened to one trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchReport {
    /// Not a trigger, or blank input; nothing was requested
    Ignored,
    /// Results rendered
    Rendered { seq: u64, records: usize },
    /// Error state rendered
    Failed { seq: u64 },
    /// A newer search was issued before this one resolved; discarded
    Stale { seq: u64, latest: u64 },
}

/// Drives searches against a backend and renders into a view
pub struct SearchController<V> {
    backend: Arc<dyn SearchBackend>,
    view: Arc<Mutex<V>>,
    issued: Arc<AtomicU64>,
}

impl<V> Clone for SearchController<V> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            view: self.view.clone(),
            issued: self.issued.clone(),
        }
    }
}

impl<V: ResultsView + 'static> SearchController<V> {
    /// Create a new controller
    pub fn new(backend: Arc<dyn SearchBackend>, view: V) -> Self {
        Self {
            backend,
            view: Arc::new(Mutex::new(view)),
            issued: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared handle to the view
    pub fn view(&self) -> Arc<Mutex<V>> {
        self.view.clone()
    }

    /// Sequence number of the most recently issued search (0 = none yet)
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Handle a trigger and wait for its search to finish
    pub async fn handle(&self, event: TriggerEvent<'_>, field_value: &str) -> SearchReport {
        match self.issue(event, field_value) {
            Some((seq, query)) => self.complete(seq, query).await,
            None => SearchReport::Ignored,
        }
    }

    /// Handle a trigger without waiting.
    ///
    /// The sequence number is assigned before this returns, so issue order
    /// is call order. Returns `None` when nothing was issued.
    pub fn spawn(&self, event: TriggerEvent<'_>, field_value: &str) -> Option<JoinHandle<SearchReport>> {
        let (seq, query) = self.issue(event, field_value)?;
        let controller = self.clone();
        Some(tokio::spawn(async move { controller.complete(seq, query).await }))
    }

    fn issue(&self, event: TriggerEvent<'_>, field_value: &str) -> Option<(u64, SearchQuery)> {
        let Some(query) = SearchQuery::capture(event, field_value) else {
            debug!(event = ?event, "No search issued");
            return None;
        };

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        info!(query = %query, seq = seq, "Search triggered");
        Some((seq, query))
    }

    async fn complete(&self, seq: u64, query: SearchQuery) -> SearchReport {
        let outcome = self.backend.search(&query).await;

        // Check under the lock so no newer render can slip in between
        let mut view = self.view.lock().await;
        let latest = self.latest_issued();
        if seq != latest {
            debug!(query = %query, seq = seq, latest = latest, "Discarding stale results");
            return SearchReport::Stale { seq, latest };
        }

        let report = match &outcome {
            Ok(records) => {
                info!(query = %query, seq = seq, records = records.len(), "Rendering results");
                SearchReport::Rendered {
                    seq,
                    records: records.len(),
                }
            }
            Err(e) => {
                info!(query = %query, seq = seq, error = %e, "Rendering error state");
                SearchReport::Failed { seq }
            }
        };

        view.show(DisplayState::from_outcome(&outcome));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnimeImages, FetchError, ImageSet, ResultRecord, ResultSet};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::oneshot;

    fn record(title: &str) -> ResultRecord {
        ResultRecord {
            title: Some(title.to_string()),
            episodes: Some(12),
            images: Some(AnimeImages {
                jpg: Some(ImageSet {
                    image_url: Some(format!("{}.jpg", title)),
                }),
            }),
        }
    }

    fn titles(prefix: &str, n: usize) -> ResultSet {
        (0..n).map(|i| record(&format!("{} {}", prefix, i))).collect()
    }

    /// Backend answering from a fixed table and recording every query
    struct MockBackend {
        responses: HashMap<String, fn() -> Result<ResultSet, FetchError>>,
        queries: StdMutex<Vec<String>>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                queries: StdMutex::new(Vec::new()),
            }
        }

        fn with(mut self, query: &str, response: fn() -> Result<ResultSet, FetchError>) -> Self {
            self.responses.insert(query.to_string(), response);
            self
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchBackend for MockBackend {
        async fn search(&self, query: &SearchQuery) -> Result<ResultSet, FetchError> {
            self.queries.lock().unwrap().push(query.as_str().to_string());
            match self.responses.get(query.as_str()) {
                Some(response) => response(),
                None => Ok(Vec::new()),
            }
        }
    }

    /// Backend whose searches resolve only when the test releases them
    struct GatedBackend {
        gates: StdMutex<HashMap<String, oneshot::Receiver<ResultSet>>>,
    }

    #[async_trait]
    impl SearchBackend for GatedBackend {
        async fn search(&self, query: &SearchQuery) -> Result<ResultSet, FetchError> {
            let gate = self.gates.lock().unwrap().remove(query.as_str());
            match gate {
                Some(rx) => rx.await.map_err(|_| FetchError::Http { status: 499 }),
                None => Ok(Vec::new()),
            }
        }
    }

    /// View that keeps every state it was asked to show
    #[derive(Default)]
    struct RecordingView {
        shown: Vec<DisplayState>,
    }

    impl ResultsView for RecordingView {
        fn show(&mut self, state: DisplayState) {
            self.shown.push(state);
        }
    }

    fn controller(backend: Arc<dyn SearchBackend>) -> SearchController<RecordingView> {
        SearchController::new(backend, RecordingView::default())
    }

    #[tokio::test]
    async fn test_naruto_scenario() {
        let backend = Arc::new(MockBackend::new().with("naruto", || Ok(titles("Naruto", 4))));
        let controller = controller(backend.clone());

        let report = controller.handle(TriggerEvent::Click, "naruto").await;

        assert_eq!(report, SearchReport::Rendered { seq: 1, records: 4 });
        assert_eq!(backend.queries(), vec!["naruto"]);

        let view = controller.view();
        let view = view.lock().await;
        assert_eq!(view.shown.len(), 1);
        let DisplayState::Results(grid) = &view.shown[0] else {
            panic!("expected results");
        };
        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.rows()[0].len(), 3);
        assert_eq!(grid.rows()[1].len(), 1);
        assert_eq!(grid.rows()[0][0].title, "Naruto 0");
        assert_eq!(grid.rows()[1][0].title, "Naruto 3");
    }

    #[tokio::test]
    async fn test_blank_input_issues_nothing() {
        let backend = Arc::new(MockBackend::new());
        let controller = controller(backend.clone());

        assert_eq!(controller.handle(TriggerEvent::Click, "").await, SearchReport::Ignored);
        assert_eq!(controller.handle(TriggerEvent::KeyUp("Enter"), "   ").await, SearchReport::Ignored);
        assert!(controller.spawn(TriggerEvent::Click, "\t").is_none());

        assert!(backend.queries().is_empty());
        assert_eq!(controller.latest_issued(), 0);
        assert!(controller.view().lock().await.shown.is_empty());
    }

    #[tokio::test]
    async fn test_non_enter_key_is_ignored() {
        let backend = Arc::new(MockBackend::new());
        let controller = controller(backend.clone());

        let report = controller.handle(TriggerEvent::KeyUp("n"), "naruto").await;

        assert_eq!(report, SearchReport::Ignored);
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn test_query_is_trimmed_before_fetch() {
        let backend = Arc::new(MockBackend::new());
        let controller = controller(backend.clone());

        controller.handle(TriggerEvent::KeyUp("Enter"), "  one piece  ").await;

        assert_eq!(backend.queries(), vec!["one piece"]);
    }

    #[tokio::test]
    async fn test_empty_result_clears_container() {
        let backend = Arc::new(
            MockBackend::new()
                .with("bebop", || Ok(titles("Bebop", 2)))
                .with("zzz", || Ok(Vec::new())),
        );
        let controller = controller(backend);

        controller.handle(TriggerEvent::Click, "bebop").await;
        let report = controller.handle(TriggerEvent::Click, "zzz").await;

        assert_eq!(report, SearchReport::Rendered { seq: 2, records: 0 });
        let view = controller.view();
        let view = view.lock().await;
        assert_eq!(view.shown.last(), Some(&DisplayState::Results(Default::default())));
    }

    #[tokio::test]
    async fn test_failure_renders_error_state() {
        let backend = Arc::new(MockBackend::new().with("boom", || Err(FetchError::Http { status: 500 })));
        let controller = controller(backend);

        let report = controller.handle(TriggerEvent::Click, "boom").await;

        assert_eq!(report, SearchReport::Failed { seq: 1 });
        let view = controller.view();
        let view = view.lock().await;
        assert_eq!(
            view.shown,
            vec![DisplayState::Failed("Search failed: HTTP error, status 500".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let backend = Arc::new(GatedBackend {
            gates: StdMutex::new(HashMap::from([
                ("first".to_string(), first_rx),
                ("second".to_string(), second_rx),
            ])),
        });
        let controller = controller(backend);

        let first = controller.spawn(TriggerEvent::Click, "first").unwrap();
        let second = controller.spawn(TriggerEvent::KeyUp("Enter"), "second").unwrap();
        assert_eq!(controller.latest_issued(), 2);

        // Newer search resolves first, older one last
        second_tx.send(titles("Second", 1)).unwrap();
        assert_eq!(second.await.unwrap(), SearchReport::Rendered { seq: 2, records: 1 });

        first_tx.send(titles("First", 5)).unwrap();
        assert_eq!(first.await.unwrap(), SearchReport::Stale { seq: 1, latest: 2 });

        let view = controller.view();
        let view = view.lock().await;
        assert_eq!(view.shown.len(), 1);
        let DisplayState::Results(grid) = &view.shown[0] else {
            panic!("expected results");
        };
        assert_eq!(grid.rows()[0][0].title, "Second 0");
    }

    #[tokio::test]
    async fn test_in_order_resolution_renders_latest() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let backend = Arc::new(GatedBackend {
            gates: StdMutex::new(HashMap::from([
                ("first".to_string(), first_rx),
                ("second".to_string(), second_rx),
            ])),
        });
        let controller = controller(backend);

        let first = controller.spawn(TriggerEvent::Click, "first").unwrap();
        let second = controller.spawn(TriggerEvent::Click, "second").unwrap();

        first_tx.send(titles("First", 2)).unwrap();
        assert_eq!(first.await.unwrap(), SearchReport::Stale { seq: 1, latest: 2 });

        second_tx.send(titles("Second", 3)).unwrap();
        assert_eq!(second.await.unwrap(), SearchReport::Rendered { seq: 2, records: 3 });

        assert_eq!(controller.view().lock().await.shown.len(), 1);
    }
}
