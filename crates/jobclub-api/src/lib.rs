//! HTTP endpoints for Job Club.
//!
//! Serves the onboarding endpoint with its sequential fan-out to the content
//! store, workspace database and chat webhook, plus the read-only event and
//! resource endpoints.

pub mod error;
pub mod onboarding;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
mod fakes;

pub use error::ApiError;
pub use onboarding::{Onboarding, OnboardingError, Stage};
pub use routes::router;
pub use server::{ApiServer, ApiServerConfig, ServerError};
pub use state::AppState;
