//! REST surface: controller, DTOs, handlers, middleware and the router.
//!
//! Handlers call the [`controller::JobsController`] only; the controller
//! calls the domain service. Errors are turned into responses here and
//! nowhere else.

pub mod controller;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use controller::{JobsController, JobsControllerImpl};
pub use dto::{ErrorDto, HealthDto, JobDto, JobsListDto};
pub use error::ApiError;
pub use routes::{SERVICE_NAME, router};
