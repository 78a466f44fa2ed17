use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::api::rest::error::ApiError;

/// Turn a caught panic into the generic 500 body and log its payload.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError::Internal.into_response()
}
