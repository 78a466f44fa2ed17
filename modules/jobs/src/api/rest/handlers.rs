use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, State};
use tracing::{error, info};

use super::controller::JobsController;
use super::dto::{HealthDto, JobsListDto};
use super::error::ApiError;
use super::routes::SERVICE_NAME;
use crate::context::RequestCtx;

/// Liveness probe. Touches no dependency and always succeeds.
pub async fn health(Extension(ctx): Extension<RequestCtx>) -> Json<HealthDto> {
    info!(request_id = %ctx.request_id(), "Health check endpoint called");

    Json(HealthDto {
        message: format!("{SERVICE_NAME} is running"),
        status: "healthy".to_owned(),
    })
}

pub async fn list_jobs(
    State(controller): State<Arc<dyn JobsController>>,
    Extension(ctx): Extension<RequestCtx>,
) -> Result<Json<JobsListDto>, ApiError> {
    info!(request_id = %ctx.request_id(), "GET /jobs endpoint called");

    match controller.get_jobs(&ctx).await {
        Ok(jobs) => Ok(Json(JobsListDto::from(jobs))),
        Err(e) => {
            // Log the error details but don't expose them to the client
            error!(request_id = %ctx.request_id(), error = %e, "Failed to fetch jobs");
            Err(ApiError::JobsUnavailable)
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
