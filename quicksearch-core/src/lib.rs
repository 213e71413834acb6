//! quicksearch-core - debounced, cancelable, paginated search
//!
//! This crate provides:
//! - Debounce Scheduler (`debounce`) coalescing bursts of input into one query
//! - Request Controller (`controller`) keeping at most one live request
//! - Result Store (`store`) with a single tagged status and an owned paginator
//! - Paginator (`paginator`) slicing results into fixed-size pages
//! - `SearchPipeline`, the single-task driver that wires them together
//!
//! Data sources plug in through the [`DataSource`] trait.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod model;
pub mod paginator;
pub mod pipeline;
pub mod source;
pub mod store;

pub use config::SearchConfig;
pub use controller::{Completion, InFlightRequest, RequestController, RequestId, RequestState};
pub use debounce::{Debouncer, Settled};
pub use error::{
    ConfigError, ConfigResult, SourceError, SourceResult, GENERIC_FAILURE_MESSAGE,
    NO_RESULTS_MESSAGE,
};
pub use model::{Query, ResultItem, Status};
pub use paginator::{PageLink, Paginator};
pub use pipeline::{Command, PipelineHandle, SearchPipeline};
pub use source::{cancellable, DataSource};
pub use store::{ResultStore, SearchView};

// Re-exported so sources need not depend on tokio-util directly
pub use tokio_util::sync::CancellationToken;
