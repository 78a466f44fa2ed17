use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Instrument;
use uuid::Uuid;

use crate::context::RequestCtx;

pub const X_REQUEST_ID: &str = "x-request-id";

#[must_use]
pub fn header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Generates a UUID v4 request id when the caller did not send a usable one.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// A caller id is usable when it is non-empty visible ASCII.
fn usable(value: &HeaderValue) -> bool {
    value.to_str().is_ok_and(|v| !v.trim().is_empty())
}

/// Strip caller-sent request ids that cannot be logged verbatim, so the id
/// layer generates one and the same value is echoed and logged.
pub async fn drop_unusable_request_id(mut req: Request, next: Next) -> Response {
    let headers = req.headers_mut();
    if headers.get_all(X_REQUEST_ID).iter().any(|v| !usable(v)) {
        tracing::debug!("Discarding unusable x-request-id header");
        headers.remove(X_REQUEST_ID);
    }
    next.run(req).await
}

/// Build the [`RequestCtx`] for this request from the id kept by the id
/// layer and run the remaining chain inside a `request` span tagged with it.
pub async fn attach_request_ctx(
    State(upstream_timeout): State<Duration>,
    mut req: Request,
    next: Next,
) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(RequestId::header_value)
        .or_else(|| req.headers().get(header()))
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned);

    let span = tracing::info_span!("request", request_id = %request_id);
    req.extensions_mut()
        .insert(RequestCtx::new(request_id, upstream_timeout));

    next.run(req).instrument(span).await
}
