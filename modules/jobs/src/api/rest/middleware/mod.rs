//! Cross-cutting middleware applied to every route.

pub mod access_log;
pub mod panic;
pub mod request_id;

use std::time::Duration;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use self::access_log::AccessLog;
use self::request_id::MakeReqId;

/// Apply the middleware stack to a router.
///
/// Runtime execution order (outermost -> innermost):
/// `DropUnusableRequestId` -> `SetRequestId` -> `PropagateRequestId` ->
/// `RequestCtx` -> `Trace` -> `CatchPanic` -> Router.
///
/// `upstream_timeout` sets the deadline of each request's [`RequestCtx`].
///
/// [`RequestCtx`]: crate::context::RequestCtx
pub fn apply(router: Router, upstream_timeout: Duration) -> Router {
    let x_request_id = request_id::header();

    // Layer registration order (reverse of execution): innermost -> outermost
    router
        // 6) Panics below this point become a generic 500
        .layer(CatchPanicLayer::custom(panic::handle_panic))
        // 5) One access-log line per request
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(AccessLog)
                .on_response(AccessLog),
        )
        // 4) Build RequestCtx and run the rest inside the request span
        .layer(from_fn_with_state(
            upstream_timeout,
            request_id::attach_request_ctx,
        ))
        // 3) Echo x-request-id on the response
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        // 2) Inherit or generate x-request-id
        .layer(SetRequestIdLayer::new(x_request_id, MakeReqId))
        // 1) Empty or non-text caller ids are replaced, not echoed
        .layer(from_fn(request_id::drop_unusable_request_id))
}
