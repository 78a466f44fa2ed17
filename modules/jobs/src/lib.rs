//! Jobs Module
//!
//! Serves the job listing resource through a layered pipeline:
//! REST router -> controller -> domain service -> upstream fetcher.
//!
//! ## Public API
//!
//! - [`JobsApp`] - composition root; builds the fully wired `axum::Router`
//! - [`AppConfig`] - process configuration (defaults, YAML file, environment)
//! - [`Job`], [`FetchError`] - domain model and the only originating error
//! - [`JobsFetcher`], [`JobsService`], [`JobsController`] - substitutable layer contracts
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod context;
pub mod module;
pub mod telemetry;

// === LAYERS ===
pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::controller::{JobsController, JobsControllerImpl};
pub use config::AppConfig;
pub use context::RequestCtx;
pub use domain::error::FetchError;
pub use domain::fetcher::JobsFetcher;
pub use domain::model::Job;
pub use domain::service::{JobsService, JobsServiceImpl};
pub use module::JobsApp;
