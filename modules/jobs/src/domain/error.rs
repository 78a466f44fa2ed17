use thiserror::Error;

/// Upstream failure, the only error kind that originates in the pipeline.
///
/// Service and controller pass it upward unchanged; only the REST layer turns
/// it into a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request deadline elapsed before the upstream answered.
    #[error("upstream request exceeded its deadline")]
    Timeout,

    /// Network or connection failure.
    #[error("upstream transport error: {message}")]
    Transport { message: String },

    /// The upstream answered with something that is not a job list.
    #[error("upstream returned an invalid response: {message}")]
    InvalidResponse { message: String },
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
