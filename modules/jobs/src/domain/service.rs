use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::context::RequestCtx;
use crate::domain::error::FetchError;
use crate::domain::fetcher::JobsFetcher;
use crate::domain::model::Job;
use crate::telemetry::ComponentLogger;

/// Business-logic entry point for job listings.
#[async_trait]
pub trait JobsService: Send + Sync {
    /// Fetch jobs for the request described by `ctx`.
    async fn fetch_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError>;
}

/// Default service: delegates to the fetcher exactly once and logs around it.
#[derive(Clone)]
pub struct JobsServiceImpl {
    fetcher: Arc<dyn JobsFetcher>,
    log: ComponentLogger,
}

impl JobsServiceImpl {
    #[must_use]
    pub fn new(fetcher: Arc<dyn JobsFetcher>, log: ComponentLogger) -> Self {
        Self { fetcher, log }
    }
}

#[async_trait]
impl JobsService for JobsServiceImpl {
    #[instrument(skip_all, fields(request_id = %ctx.request_id()))]
    async fn fetch_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        self.log.attempt(ctx, "Fetching jobs from upstream");

        match self.fetcher.fetch_jobs(ctx).await {
            Ok(jobs) => {
                self.log
                    .success(ctx, "Successfully fetched jobs from upstream", jobs.len());
                Ok(jobs)
            }
            Err(e) => {
                self.log
                    .failure(ctx, "Failed to fetch jobs from upstream", &e);
                Err(e)
            }
        }
    }
}
