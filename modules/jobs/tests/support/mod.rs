//! Shared fakes and helpers for the REST integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use jobs::{AppConfig, FetchError, Job, JobsApp, JobsFetcher, RequestCtx};
use serde_json::Value;
use tower::ServiceExt;

/// Returns a fixed result and counts how often it was asked.
pub struct ScriptedFetcher {
    result: Result<Vec<Job>, FetchError>,
    pub calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn ok(jobs: Vec<Job>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(jobs),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn err(err: FetchError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobsFetcher for ScriptedFetcher {
    async fn fetch_jobs(&self, _ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Remembers the request id of every call.
#[derive(Default)]
pub struct RecordingFetcher {
    seen: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobsFetcher for RecordingFetcher {
    async fn fetch_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        self.seen.lock().unwrap().push(ctx.request_id().to_owned());
        Ok(vec![])
    }
}

/// Sleeps for `delay`, bounded by the request deadline.
pub struct SlowFetcher {
    pub delay: Duration,
}

#[async_trait]
impl JobsFetcher for SlowFetcher {
    async fn fetch_jobs(&self, ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        jobs::domain::fetcher::within_deadline(ctx, async {
            tokio::time::sleep(self.delay).await;
            Ok(vec![])
        })
        .await
    }
}

/// Panics on the first call, then behaves.
pub struct PanickyFetcher {
    calls: AtomicUsize,
}

impl PanickyFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl JobsFetcher for PanickyFetcher {
    async fn fetch_jobs(&self, _ctx: &RequestCtx) -> Result<Vec<Job>, FetchError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("upstream exploded");
        }
        Ok(vec![job("1", "Tokyo, Japan")])
    }
}

pub fn job(id: &str, location: &str) -> Job {
    Job {
        id: id.to_owned(),
        title: format!("Engineer {id}"),
        company: "Company".to_owned(),
        location: location.to_owned(),
        description: "desc".to_owned(),
    }
}

pub fn app_with(fetcher: Arc<dyn JobsFetcher>) -> Router {
    JobsApp::with_fetcher(AppConfig::default(), fetcher).into_router()
}

pub fn app_with_timeout(fetcher: Arc<dyn JobsFetcher>, secs: u64) -> Router {
    let cfg = AppConfig {
        api_timeout: secs,
        ..AppConfig::default()
    };
    JobsApp::with_fetcher(cfg, fetcher).into_router()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub async fn send(router: &Router, req: Request<Body>) -> Response<Body> {
    router.clone().oneshot(req).await.unwrap()
}

pub async fn body_bytes(res: Response<Body>) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(res: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(res).await).unwrap()
}
