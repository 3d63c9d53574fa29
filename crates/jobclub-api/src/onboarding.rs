//! Onboarding: validate, store, mirror, announce.
//!
//! The steps run once, in order, per request. The first failing step aborts
//! the rest and nothing already written is undone, so a failure after the
//! content store write leaves a `new` member with no workspace-database or
//! chat mirror. [`OnboardingError::Upstream`] records how far the request got.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use jobclub_core::{MemberProfile, OnboardingForm};
use jobclub_integrations::IntegrationError;

use crate::state::AppState;

const WELCOME: &str = "Welcome to Job Club! Check your email for next steps.";

/// Progress of a single onboarding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validated,
    StoreWritten,
    DbSynced,
    Notified,
    Complete,
}

/// Errors that end an onboarding request.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// The form is invalid; nothing was written.
    #[error("Invalid submission: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// An external system failed after `completed` was reached.
    #[error("{source}")]
    Upstream {
        completed: Stage,
        #[source]
        source: IntegrationError,
    },
}

impl IntoResponse for OnboardingError {
    fn into_response(self) -> Response {
        match self {
            OnboardingError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            OnboardingError::Upstream { completed, source } => {
                tracing::error!(
                    ?completed,
                    service = %source.service(),
                    error = %source,
                    "Onboarding error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to process onboarding",
                        "details": source.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Runs the onboarding steps against the clients in [`AppState`].
pub struct Onboarding<'a> {
    state: &'a AppState,
}

impl<'a> Onboarding<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Process one submission and return the stored member.
    pub async fn run(&self, form: OnboardingForm) -> Result<MemberProfile, OnboardingError> {
        let submission = form
            .into_submission()
            .map_err(OnboardingError::Validation)?;
        let mut stage = Stage::Validated;

        let member = self
            .state
            .content
            .create_member(&submission)
            .await
            .map_err(|source| OnboardingError::Upstream {
                completed: stage,
                source,
            })?;
        stage = Stage::StoreWritten;
        tracing::info!(member_id = member.member_id(), ?stage, "Member profile created");

        let synced = self
            .state
            .directory
            .upsert_member(&member)
            .await
            .map_err(|source| OnboardingError::Upstream {
                completed: stage,
                source,
            })?;
        stage = Stage::DbSynced;
        tracing::debug!(member_id = member.member_id(), ?stage, ?synced);

        let announced = self
            .state
            .notifier
            .announce_member(&member)
            .await
            .map_err(|source| OnboardingError::Upstream {
                completed: stage,
                source,
            })?;
        stage = Stage::Notified;
        tracing::debug!(member_id = member.member_id(), ?stage, ?announced);

        tracing::info!(
            member_id = member.member_id(),
            stage = ?Stage::Complete,
            "Onboarding complete"
        );
        Ok(member)
    }
}

/// `POST /api/onboarding`
pub async fn onboard(
    State(state): State<AppState>,
    body: Result<Json<OnboardingForm>, JsonRejection>,
) -> Response {
    tracing::debug!(stage = ?Stage::Received, "Onboarding request");

    let form = match body {
        Ok(Json(form)) => form,
        Err(rejection) => {
            return OnboardingError::Validation(vec![rejection.body_text()]).into_response();
        }
    };

    match Onboarding::new(&state).run(form).await {
        Ok(member) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": WELCOME,
                "memberId": member.member_id(),
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
