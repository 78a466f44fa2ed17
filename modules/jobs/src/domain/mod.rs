//! Domain layer - job model, the fetcher contract and the job service.
//!
//! The domain layer:
//! - **MAY** import: `crate::context`, `crate::telemetry`
//! - **MUST NOT** import: `api::*` or `infra::*` (one-way dependency: API -> Domain <- Infra)

pub mod error;
pub mod fetcher;
pub mod model;
pub mod service;

pub use error::FetchError;
pub use fetcher::{JobsFetcher, within_deadline};
pub use model::Job;
pub use service::{JobsService, JobsServiceImpl};
