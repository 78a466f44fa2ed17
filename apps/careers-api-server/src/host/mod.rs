//! Hosting modes for the wired router.
//!
//! - [`listener`]: long-running HTTP server on a TCP port
//! - [`invocation`]: serverless proxy events translated to in-process requests

pub mod invocation;
pub mod listener;
pub mod signals;

/// Presence of this variable (non-empty) selects the invocation host.
pub const INVOCATION_SIGNAL_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    Listener,
    Invocation,
}

impl HostMode {
    /// Pick the host mode from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_signal(std::env::var(INVOCATION_SIGNAL_VAR).ok().as_deref())
    }

    #[must_use]
    pub fn from_signal(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::Invocation,
            _ => Self::Listener,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Listener => "listener",
            Self::Invocation => "invocation",
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn absent_or_empty_signal_selects_listener() {
        assert_eq!(HostMode::from_signal(None), HostMode::Listener);
        assert_eq!(HostMode::from_signal(Some("")), HostMode::Listener);
    }

    #[test]
    fn any_function_name_selects_invocation() {
        assert_eq!(
            HostMode::from_signal(Some("careers-api-prod")),
            HostMode::Invocation
        );
    }
}
