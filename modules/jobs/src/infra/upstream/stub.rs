use async_trait::async_trait;
use url::Url;

use super::error::UpstreamConfigError;
use crate::config::AppConfig;
use crate::context::RequestCtx;
use crate::domain::error::FetchError;
use crate::domain::fetcher::{JobsFetcher, within_deadline};
use crate::domain::model::Job;
use crate::telemetry::ComponentLogger;

/// Fetcher bound to the configured upstream endpoint that answers with a
/// fixed catalogue instead of calling it.
#[derive(Debug, Clone)]
pub struct StubJobsFetcher {
    endpoint: Url,
    log: ComponentLogger,
}

impl StubJobsFetcher {
    /// Validate `endpoint` and build the fetcher.
    ///
    /// # Errors
    /// Returns [`UpstreamConfigError`] if the endpoint is not an absolute
    /// `http`/`https` URL.
    pub fn new(endpoint: &str, log: ComponentLogger) -> Result<Self, UpstreamConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|e| UpstreamConfigError::InvalidEndpoint {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(UpstreamConfigError::InvalidScheme {
                scheme: endpoint.scheme().to_owned(),
            });
        }

        Ok(Self { endpoint, log })
    }

    /// Build the fetcher from process configuration.
    ///
    /// # Errors
    /// Returns [`UpstreamConfigError`] if `api_endpoint` is invalid.
    pub fn from_config(cfg: &AppConfig, log: ComponentLogger) -> Result<Self, UpstreamConfigError> {
        Self::new(&cfg.api_endpoint, log)
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn catalogue() -> Vec<Job> {
        vec![
            Job {
                id: "1".to_owned(),
                title: "Senior Go Developer".to_owned(),
                company: "Tech Company A".to_owned(),
                location: "Tokyo, Japan".to_owned(),
                description: "Looking for an experienced Go developer".to_owned(),
            },
            Job {
                id: "2".to_owned(),
                title: "Backend Engineer".to_owned(),
                company: "Startup B".to_owned(),
                location: "Osaka, Japan".to_owned(),
                description: "Join our growing team".to_owned(),
            },
        ]
    }
}

#[async_trait]
impl JobsFetcher for StubJobsFetcher {
    async fn fetch_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        tracing::debug!(
            component = self.log.component(),
            request_id = %ctx.request_id(),
            endpoint = %self.endpoint,
            "Fetching jobs from upstream endpoint"
        );

        within_deadline(ctx, async { Ok(Self::catalogue()) }).await
    }
}
