//! Request Controller: at most one live request, superseded requests cancelled.
//!
//! Source calls run in their own tasks and report back as [`Completion`]
//! messages. The controller only lets the completion of the registered
//! request reach the [`ResultStore`]; anything else is dropped, so a slow
//! stale response can never overwrite a newer one.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

use crate::error::SourceResult;
use crate::model::{Query, ResultItem};
use crate::source::DataSource;
use crate::store::ResultStore;

/// Lifecycle of a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    /// The source answered, with items or a domain-level error
    Resolved,
    /// Superseded or shut down before it resolved
    Cancelled,
    /// Transport failure
    Failed,
}

/// Monotonic request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Message sent by a request task when its source call returns
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub outcome: SourceResult<Vec<ResultItem>>,
}

/// The registered request.
///
/// One exists only while its request is `Pending`; settling or cancelling
/// removes it from the controller.
#[derive(Debug)]
pub struct InFlightRequest {
    id: RequestId,
    query: Query,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl InFlightRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

pub struct RequestController {
    source: Arc<dyn DataSource>,
    completions: UnboundedSender<Completion>,
    live: Option<InFlightRequest>,
    next_id: u64,
    last_settled: Option<(RequestId, RequestState)>,
}

impl RequestController {
    pub fn new(source: Arc<dyn DataSource>, completions: UnboundedSender<Completion>) -> Self {
        Self {
            source,
            completions,
            live: None,
            next_id: 1,
            last_settled: None,
        }
    }

    /// The registered pending request, if any
    pub fn live(&self) -> Option<&InFlightRequest> {
        self.live.as_ref()
    }

    /// State of request `id`, as far as the controller remembers it.
    ///
    /// Only the live request and the most recently settled one are known.
    pub fn state(&self, id: RequestId) -> Option<RequestState> {
        match (&self.live, self.last_settled) {
            (Some(live), _) if live.id == id => Some(RequestState::Pending),
            (_, Some((settled, state))) if settled == id => Some(state),
            _ => None,
        }
    }

    /// Id and final state of the most recently finished request
    pub fn last_settled(&self) -> Option<(RequestId, RequestState)> {
        self.last_settled
    }

    /// Cancel the live request (if any) and issue one for `query`.
    ///
    /// Marks the store as loading. Must be called from within a tokio runtime.
    pub fn submit(&mut self, query: Query, store: &mut ResultStore) -> RequestId {
        self.cancel();

        let id = RequestId(self.next_id);
        self.next_id += 1;

        let token = CancellationToken::new();
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        let task_query = query.clone();
        let task_token = token.clone();
        let span = tracing::info_span!("search_request", request = %id, source = source.name());

        let task = tokio::spawn(
            async move {
                let outcome = source.search(&task_query, task_token).await;
                // Receiver gone means the pipeline shut down
                let _ = completions.send(Completion { id, outcome });
            }
            .instrument(span),
        );

        info!(request = %id, query = %query, "search request issued");
        store.begin_loading();
        self.live = Some(InFlightRequest {
            id,
            query,
            token,
            task,
        });
        id
    }

    /// Cancel the live request without issuing a new one.
    ///
    /// Cooperative: the source is asked to stop, and whatever it eventually
    /// returns is dropped by [`complete`](Self::complete).
    pub fn cancel(&mut self) -> Option<RequestId> {
        let request = self.live.take()?;
        request.token.cancel();
        debug!(request = %request.id, query = %request.query, "search request cancelled");
        self.last_settled = Some((request.id, RequestState::Cancelled));
        Some(request.id)
    }

    /// Cancel the live request and stop its task outright.
    pub fn shutdown(&mut self) {
        if let Some(request) = self.live.take() {
            request.token.cancel();
            request.task.abort();
            self.last_settled = Some((request.id, RequestState::Cancelled));
        }
    }

    /// Apply a completion if it belongs to the live request.
    ///
    /// Returns the request's final state, or `None` when the completion was
    /// stale and the store was left untouched.
    pub fn complete(
        &mut self,
        completion: Completion,
        store: &mut ResultStore,
    ) -> Option<RequestState> {
        match &self.live {
            Some(live) if live.id == completion.id => {}
            _ => {
                debug!(request = %completion.id, "ignoring completion of superseded request");
                return None;
            }
        }

        self.live = None;
        let state = store.apply(completion.outcome);
        self.last_settled = Some((completion.id, state));
        Some(state)
    }
}

impl Drop for RequestController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
