use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::Span;
use tracing::field::Empty;

use crate::context::RequestCtx;

/// Span factory and response hook for the access log.
///
/// Generic over the body type so it can sit on top of any inner layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessLog;

impl<B> MakeSpan<B> for AccessLog {
    fn make_span(&mut self, req: &Request<B>) -> Span {
        let rid = req
            .extensions()
            .get::<RequestCtx>()
            .map_or("n/a", RequestCtx::request_id);

        tracing::info_span!(
            "http_request",
            method = %req.method(),
            uri = %req.uri().path(),
            version = ?req.version(),
            request_id = %rid,
            status = Empty,
            latency_ms = Empty,
        )
    }
}

impl<B> OnResponse<B> for AccessLog {
    fn on_response(self, res: &Response<B>, latency: Duration, span: &Span) {
        let status = res.status().as_u16();
        let ms = latency.as_millis();
        span.record("status", status);
        span.record("latency_ms", ms);

        tracing::info!(status, latency_ms = ms, "request completed");
    }
}
