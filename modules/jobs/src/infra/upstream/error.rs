use thiserror::Error;

/// Upstream adapter could not be constructed from configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UpstreamConfigError {
    /// Endpoint could not be parsed as a URL
    #[error("Invalid upstream endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Endpoint uses a scheme other than http/https
    #[error("Upstream endpoint scheme '{scheme}' not allowed: expected http or https")]
    InvalidScheme { scheme: String },
}
