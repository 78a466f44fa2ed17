use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::dto::ErrorDto;

/// Client-facing failures. Each maps to a fixed status and message; internal
/// error text never reaches the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Any failure below the router while listing jobs
    JobsUnavailable,
    /// Panic or other unexpected fault
    Internal,
    NotFound,
    MethodNotAllowed,
}

impl ApiError {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::JobsUnavailable | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::JobsUnavailable => "Failed to fetch jobs",
            Self::Internal => "Internal Server Error",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorDto {
            error: self.message().to_owned(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn jobs_unavailable_is_a_json_500() {
        let res = ApiError::JobsUnavailable.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn statuses_match_messages() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::Internal.message(), "Internal Server Error");
    }
}
