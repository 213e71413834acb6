//! End-to-end pipeline scenarios
//!
//! Driven on a paused tokio clock so debounce and request timings are exact.
//! `ScriptedSource` answers each query after a scripted delay and records
//! every call it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quicksearch_core::{
    CancellationToken, DataSource, Query, ResultItem, SearchConfig, SearchPipeline, SearchView,
    SourceError, SourceResult, Status, GENERIC_FAILURE_MESSAGE,
};
use tokio::sync::watch;
use tokio::time::{sleep, timeout, Instant};

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    outcome: SourceResult<Vec<ResultItem>>,
    /// When false the call runs to completion even after cancellation,
    /// like a transport that cannot be interrupted
    honour_cancel: bool,
}

#[derive(Default)]
struct Script {
    responses: HashMap<String, Scripted>,
    calls: Vec<(String, Instant)>,
    tokens: HashMap<String, CancellationToken>,
}

#[derive(Clone, Default)]
struct ScriptedSource {
    script: Arc<Mutex<Script>>,
}

impl ScriptedSource {
    fn respond(self, query: &str, delay_ms: u64, outcome: SourceResult<Vec<ResultItem>>) -> Self {
        self.insert(query, delay_ms, outcome, true)
    }

    fn respond_ignoring_cancel(
        self,
        query: &str,
        delay_ms: u64,
        outcome: SourceResult<Vec<ResultItem>>,
    ) -> Self {
        self.insert(query, delay_ms, outcome, false)
    }

    fn insert(
        self,
        query: &str,
        delay_ms: u64,
        outcome: SourceResult<Vec<ResultItem>>,
        honour_cancel: bool,
    ) -> Self {
        self.script.lock().unwrap().responses.insert(
            query.to_string(),
            Scripted {
                delay: Duration::from_millis(delay_ms),
                outcome,
                honour_cancel,
            },
        );
        self
    }

    fn calls(&self) -> Vec<String> {
        self.script
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|(q, _)| q.clone())
            .collect()
    }

    fn call_times(&self) -> Vec<Instant> {
        self.script.lock().unwrap().calls.iter().map(|(_, t)| *t).collect()
    }

    fn token(&self, query: &str) -> CancellationToken {
        self.script.lock().unwrap().tokens[query].clone()
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn search(
        &self,
        query: &Query,
        cancel: CancellationToken,
    ) -> SourceResult<Vec<ResultItem>> {
        let scripted = {
            let mut script = self.script.lock().unwrap();
            script.calls.push((query.to_string(), Instant::now()));
            script.tokens.insert(query.to_string(), cancel.clone());
            script.responses.get(query.as_str()).cloned()
        };
        let Some(scripted) = scripted else {
            return Ok(Vec::new());
        };

        if scripted.honour_cancel {
            tokio::select! {
                _ = cancel.cancelled() => return Err(SourceError::Cancelled),
                _ = sleep(scripted.delay) => {}
            }
        } else {
            sleep(scripted.delay).await;
        }
        scripted.outcome
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn movies(prefix: &str, n: usize) -> Vec<ResultItem> {
    (1..=n)
        .map(|i| {
            ResultItem::new(format!("{prefix}-{i}"), format!("{prefix} {i}"))
                .with_subtitle("2005")
                .with_badge("movie")
        })
        .collect()
}

fn config() -> SearchConfig {
    SearchConfig::default()
}

async fn wait_for(
    rx: &mut watch::Receiver<SearchView>,
    predicate: impl FnMut(&SearchView) -> bool,
) -> SearchView {
    timeout(Duration::from_secs(30), rx.wait_for(predicate))
        .await
        .expect("view never reached the expected state")
        .expect("pipeline stopped")
        .clone()
}

/// Let the driver task drain its queue without moving past any deadline
async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn burst_of_input_issues_one_request_for_last_value() {
    let source = ScriptedSource::default().respond("bat m", 50, Ok(movies("bat m", 3)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source.clone())).unwrap();
    let start = Instant::now();

    for value in ["b", "ba", "bat", "bat ", "bat m"] {
        pipeline.on_input_change(value);
        sleep(Duration::from_millis(120)).await;
    }
    let last_input = start + Duration::from_millis(480);

    let mut rx = pipeline.subscribe();
    wait_for(&mut rx, |v| v.status == Status::Populated).await;

    assert_eq!(source.calls(), vec!["bat m".to_string()]);
    assert!(source.call_times()[0] >= last_input + config().debounce());

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn stale_response_never_overwrites_newer_results() {
    // "a" is slow and ignores cancellation, so it resolves after "b"
    let source = ScriptedSource::default()
        .respond_ignoring_cancel("a", 2_000, Ok(movies("a", 7)))
        .respond("b", 100, Ok(movies("b", 2)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source.clone())).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("a");
    wait_for(&mut rx, |v| v.status.is_loading()).await;

    pipeline.on_input_change("b");
    let view = wait_for(&mut rx, |v| v.status == Status::Populated).await;
    assert_eq!(view.items[0].id, "b-1");
    assert!(source.token("a").is_cancelled());

    // Let "a" resolve long after "b"
    sleep(Duration::from_secs(5)).await;
    let view = pipeline.view();
    assert_eq!(view.total_items, 2);
    assert!(view.items.iter().all(|item| item.id.starts_with("b-")));
    assert_eq!(source.calls(), vec!["a".to_string(), "b".to_string()]);

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn blank_input_goes_idle_without_calling_source() {
    let source = ScriptedSource::default();
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source.clone())).unwrap();

    pipeline.on_input_change("   ");
    sleep(Duration::from_secs(2)).await;

    assert!(source.calls().is_empty());
    assert_eq!(pipeline.view().status, Status::Idle);

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn clearing_input_cancels_live_request() {
    let source = ScriptedSource::default()
        .respond_ignoring_cancel("bat", 3_000, Ok(movies("bat", 12)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source.clone())).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("bat");
    wait_for(&mut rx, |v| v.status.is_loading()).await;

    pipeline.on_input_change("");
    wait_for(&mut rx, |v| v.status == Status::Idle).await;
    assert!(source.token("bat").is_cancelled());

    // The late answer for "bat" must not resurrect its results
    sleep(Duration::from_secs(5)).await;
    let view = pipeline.view();
    assert_eq!(view.status, Status::Idle);
    assert_eq!(view.total_items, 0);

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn domain_error_shows_source_message() {
    let source = ScriptedSource::default()
        .respond("zzzz", 10, Err(SourceError::domain("Movie not found!")));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source)).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("zzzz");
    let view = wait_for(&mut rx, |v| matches!(v.status, Status::Error(_))).await;
    assert_eq!(view.status.message(), Some("Movie not found!"));
    assert!(view.items.is_empty());

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn transport_error_shows_generic_message_and_recovers() {
    let source = ScriptedSource::default()
        .respond("bat", 10, Err(SourceError::transport("connection refused")))
        .respond("batman", 10, Ok(movies("batman", 4)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source)).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("bat");
    let view = wait_for(&mut rx, |v| matches!(v.status, Status::Error(_))).await;
    assert_eq!(view.status.message(), Some(GENERIC_FAILURE_MESSAGE));

    pipeline.on_input_change("batman");
    let view = wait_for(&mut rx, |v| v.status == Status::Populated).await;
    assert_eq!(view.total_items, 4);

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn empty_answer_is_empty_status() {
    let source = ScriptedSource::default().respond("qqq", 10, Ok(Vec::new()));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source)).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("qqq");
    let view = wait_for(&mut rx, |v| v.status == Status::Empty).await;
    assert_eq!(view.total_pages, 1);

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn new_results_reset_page_to_one() {
    let source = ScriptedSource::default()
        .respond("star", 10, Ok(movies("star", 30)))
        .respond("star wars", 10, Ok(movies("star wars", 30)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source)).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("star");
    wait_for(&mut rx, |v| v.status == Status::Populated).await;
    pipeline.on_page_request(5);
    wait_for(&mut rx, |v| v.page == 5).await;

    pipeline.on_input_change("star wars");
    let view = wait_for(&mut rx, |v| {
        v.status == Status::Populated && v.items[0].id.starts_with("star wars")
    })
    .await;
    assert_eq!(view.page, 1);

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn typing_then_paging_end_to_end() {
    let source = ScriptedSource::default().respond("bat m", 200, Ok(movies("bat m", 12)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source.clone())).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("bat");
    sleep(Duration::from_millis(300)).await;
    pipeline.on_input_change("bat m");
    sleep(Duration::from_millis(499)).await;
    assert!(source.calls().is_empty());

    let view = wait_for(&mut rx, |v| v.status == Status::Populated).await;
    assert_eq!(source.calls(), vec!["bat m".to_string()]);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.page, 1);
    let ids: Vec<_> = view.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["bat m-1", "bat m-2", "bat m-3", "bat m-4", "bat m-5"]);

    pipeline.on_page_request(4);
    pipeline.on_page_request(0);
    settle().await;
    assert_eq!(pipeline.view().page, 1);

    pipeline.on_page_request(2);
    let view = wait_for(&mut rx, |v| v.page == 2).await;
    let ids: Vec<_> = view.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["bat m-6", "bat m-7", "bat m-8", "bat m-9", "bat m-10"]);

    pipeline.next_page();
    let view = wait_for(&mut rx, |v| v.page == 3).await;
    assert_eq!(view.items.len(), 2);

    pipeline.next_page();
    settle().await;
    assert_eq!(pipeline.view().page, 3);

    pipeline.prev_page();
    wait_for(&mut rx, |v| v.page == 2).await;

    pipeline.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn zero_debounce_searches_on_every_input() {
    let source = ScriptedSource::default()
        .respond("b", 100, Ok(movies("b", 1)))
        .respond("ba", 100, Ok(movies("ba", 1)));
    let config = SearchConfig {
        debounce_ms: 0,
        ..SearchConfig::default()
    };
    let pipeline = SearchPipeline::spawn(&config, Arc::new(source.clone())).unwrap();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("b");
    settle().await;
    pipeline.on_input_change("ba");
    let view = wait_for(&mut rx, |v| v.status == Status::Populated).await;

    assert_eq!(source.calls(), vec!["b".to_string(), "ba".to_string()]);
    assert!(source.token("b").is_cancelled());
    assert_eq!(view.items[0].id, "ba-1");

    pipeline.shutdown().await;
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let config = SearchConfig {
        page_size: 0,
        ..SearchConfig::default()
    };
    let result = SearchPipeline::spawn(&config, Arc::new(ScriptedSource::default()));
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_live_request() {
    let source = ScriptedSource::default().respond("bat", 10_000, Ok(movies("bat", 1)));
    let pipeline = SearchPipeline::spawn(&config(), Arc::new(source.clone())).unwrap();
    let handle = pipeline.handle();
    let mut rx = pipeline.subscribe();

    pipeline.on_input_change("bat");
    wait_for(&mut rx, |v| v.status.is_loading()).await;

    pipeline.shutdown().await;
    assert!(source.token("bat").is_cancelled());
    assert!(handle.is_closed());
}
