//! Controller between the wire-facing router and the domain service.
//!
//! Today it adds logging only; request-shape adaptation or authorization
//! would live here without touching the service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestCtx;
use crate::domain::error::FetchError;
use crate::domain::model::Job;
use crate::domain::service::JobsService;
use crate::telemetry::ComponentLogger;

#[async_trait]
pub trait JobsController: Send + Sync {
    /// Jobs for the current request; service errors are forwarded verbatim.
    async fn get_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError>;
}

#[derive(Clone)]
pub struct JobsControllerImpl {
    service: Arc<dyn JobsService>,
    log: ComponentLogger,
}

impl JobsControllerImpl {
    #[must_use]
    pub fn new(service: Arc<dyn JobsService>, log: ComponentLogger) -> Self {
        Self { service, log }
    }
}

#[async_trait]
impl JobsController for JobsControllerImpl {
    async fn get_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        self.log.attempt(ctx, "Controller: get_jobs called");

        let jobs = self.service.fetch_jobs(ctx).await.inspect_err(|e| {
            self.log
                .failure(ctx, "Controller: failed to fetch jobs from service", e);
        })?;

        self.log.success(
            ctx,
            "Controller: successfully fetched jobs from service",
            jobs.len(),
        );
        Ok(jobs)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tracing_test::traced_test;

    struct FixedService(Result<Vec<Job>, FetchError>);

    #[async_trait]
    impl JobsService for FixedService {
        async fn fetch_jobs(&self, _ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
            self.0.clone()
        }
    }

    fn controller(result: Result<Vec<Job>, FetchError>) -> JobsControllerImpl {
        JobsControllerImpl::new(
            Arc::new(FixedService(result)),
            ComponentLogger::new("controller"),
        )
    }

    fn jobs(n: usize) -> Vec<Job> {
        (1..=n)
            .map(|i| Job {
                id: i.to_string(),
                title: format!("Job {i}"),
                company: "Company".to_owned(),
                location: "Tokyo, Japan".to_owned(),
                description: "desc".to_owned(),
            })
            .collect()
    }

    fn ctx() -> RequestCtx {
        RequestCtx::new("ctrl-req", Duration::from_secs(5))
    }

    #[traced_test]
    #[tokio::test]
    async fn forwards_service_result() {
        let out = controller(Ok(jobs(2))).get_jobs(&ctx()).await;

        assert_eq!(out, Ok(jobs(2)));
        assert!(logs_contain("Controller: get_jobs called"));
        assert!(logs_contain("Controller: successfully fetched jobs from service"));
        assert!(logs_contain("request_id=ctrl-req"));
    }

    #[tokio::test]
    async fn forwards_empty_and_large_lists() {
        assert_eq!(controller(Ok(vec![])).get_jobs(&ctx()).await, Ok(vec![]));
        assert_eq!(
            controller(Ok(jobs(100))).get_jobs(&ctx()).await.map(|j| j.len()),
            Ok(100)
        );
    }

    #[traced_test]
    #[tokio::test]
    async fn forwards_service_error_verbatim() {
        let err = FetchError::transport("database connection error");
        let out = controller(Err(err.clone())).get_jobs(&ctx()).await;

        assert_eq!(out, Err(err));
        assert!(logs_contain("Controller: failed to fetch jobs from service"));
    }
}
