//! Upstream fetcher contract.

use std::future::Future;

use async_trait::async_trait;

use crate::context::RequestCtx;
use crate::domain::error::FetchError;
use crate::domain::model::Job;

/// Source of job listings.
///
/// Implementations must honor `ctx.deadline()`: once it passes they fail with
/// [`FetchError::Timeout`] instead of returning partial data. No caching and
/// no retries at this boundary.
#[async_trait]
pub trait JobsFetcher: Send + Sync {
    /// Fetch the current job listings.
    async fn fetch_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError>;
}

/// Run an upstream call bounded by the request deadline.
///
/// An already expired deadline fails without polling `call` at all.
///
/// # Errors
/// Returns [`FetchError::Timeout`] when the deadline elapses first, otherwise
/// whatever `call` returned.
pub async fn within_deadline<T, F>(ctx: &RequestCtx, call: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    if ctx.is_expired() {
        return Err(FetchError::Timeout);
    }

    tokio::time::timeout_at(ctx.deadline(), call)
        .await
        .map_err(|_| FetchError::Timeout)?
}
