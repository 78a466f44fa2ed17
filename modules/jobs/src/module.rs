//! Composition root: wires fetcher -> service -> controller -> router.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;

use crate::api::rest::controller::{JobsController, JobsControllerImpl};
use crate::api::rest::routes;
use crate::config::AppConfig;
use crate::domain::fetcher::JobsFetcher;
use crate::domain::service::{JobsService, JobsServiceImpl};
use crate::infra::upstream::StubJobsFetcher;
use crate::telemetry::ComponentLogger;

/// Fully wired application. Built once at startup and then shared
/// read-only by every request.
#[derive(Clone)]
pub struct JobsApp {
    config: AppConfig,
    router: Router,
}

impl JobsApp {
    /// Build the application with the default upstream fetcher.
    ///
    /// # Errors
    /// Returns an error if the configured upstream endpoint is invalid.
    pub fn build(config: AppConfig) -> anyhow::Result<Self> {
        let fetcher = StubJobsFetcher::from_config(&config, ComponentLogger::new("upstream"))
            .context("failed to initialize upstream fetcher")?;

        tracing::info!(
            endpoint = %fetcher.endpoint(),
            timeout_secs = config.api_timeout,
            "Upstream fetcher initialized"
        );

        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Build the application around a caller-supplied fetcher.
    #[must_use]
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn JobsFetcher>) -> Self {
        let service: Arc<dyn JobsService> =
            Arc::new(JobsServiceImpl::new(fetcher, ComponentLogger::new("service")));
        let controller: Arc<dyn JobsController> =
            Arc::new(JobsControllerImpl::new(service, ComponentLogger::new("controller")));

        let router = routes::router(controller, config.api_timeout());

        Self { config, router }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }
}
