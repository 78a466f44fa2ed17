//! Per-request context threaded through every layer below the router.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Fallback horizon used when `now + timeout` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Correlation id plus the deadline derived from the upstream timeout.
///
/// Created once per inbound request by the request-id middleware and dropped
/// with the request. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct RequestCtx {
    request_id: Arc<str>,
    deadline: Instant,
}

impl RequestCtx {
    /// Create a context whose deadline is `timeout` from now.
    pub fn new(request_id: impl Into<Arc<str>>, timeout: Duration) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self::with_deadline(request_id, deadline)
    }

    /// Create a context with an explicit deadline.
    pub fn with_deadline(request_id: impl Into<Arc<str>>, deadline: Instant) -> Self {
        Self {
            request_id: request_id.into(),
            deadline,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}
