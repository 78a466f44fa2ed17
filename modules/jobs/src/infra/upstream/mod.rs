//! Upstream job sources.

mod error;
mod stub;

pub use error::UpstreamConfigError;
pub use stub::StubJobsFetcher;
