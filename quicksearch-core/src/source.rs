//! The data source seam: anything that can answer a keyword query.

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{SourceError, SourceResult};
use crate::model::{Query, ResultItem};

/// A keyword search backend.
///
/// Implementations should stop work once `cancel` fires and return
/// [`SourceError::Cancelled`]; the pipeline ignores the outcome of a
/// cancelled request either way.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn search(
        &self,
        query: &Query,
        cancel: CancellationToken,
    ) -> SourceResult<Vec<ResultItem>>;

    /// Name used in logs
    fn name(&self) -> &str {
        "source"
    }
}

/// Race `work` against `cancel`, yielding [`SourceError::Cancelled`] if the token fires first.
pub async fn cancellable<T, F>(cancel: &CancellationToken, work: F) -> SourceResult<T>
where
    F: Future<Output = SourceResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SourceError::Cancelled),
        result = work => result,
    }
}
