use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;

use super::controller::JobsController;
use super::{handlers, middleware};

pub const SERVICE_NAME: &str = "Japan Tech Careers API";

/// Build the public router: `GET /` (health) and `GET /jobs`, JSON
/// fallbacks for unknown paths and methods, and the full middleware stack.
pub fn router(controller: Arc<dyn JobsController>, upstream_timeout: Duration) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::health))
        .route("/jobs", get(handlers::list_jobs))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(controller);

    middleware::apply(routes, upstream_timeout)
}
