//! Router and the read/registration endpoints.

use std::path::Path;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use jobclub_core::{Event, Resource};

use crate::error::ApiError;
use crate::onboarding;
use crate::state::AppState;

/// Build the application router.
///
/// API routes live under `/api`. When `static_dir` is given, every other path
/// is served from it (the pre-built site); otherwise they get a JSON 404.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .route("/health", get(health))
        .route(
            "/api/onboarding",
            post(onboarding::onboard).fallback(method_fallback),
        )
        .route("/api/events", get(list_events).fallback(method_fallback))
        .route("/api/resources", get(list_resources).fallback(method_fallback))
        .route(
            "/api/event-registration",
            post(register_for_event).fallback(method_fallback),
        )
        .route("/api/{*rest}", any(not_found));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.fallback(not_found),
    };

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Requests with a method the route does not serve. Bare `OPTIONS` probes get
/// an empty 200 like a preflight.
async fn method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        ApiError::MethodNotAllowed.into_response()
    }
}

/// `GET /api/events`
async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state
        .content
        .upcoming_events()
        .await
        .map_err(ApiError::upstream("Failed to fetch events"))?;

    tracing::debug!(count = events.len(), "Fetched upcoming events");
    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
struct ResourceQuery {
    category: Option<String>,
}

/// `GET /api/resources[?category=...]`
async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let resources = state
        .content
        .resources(category)
        .await
        .map_err(ApiError::upstream("Failed to fetch resources"))?;

    Ok(Json(resources))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRequest {
    #[serde(default)]
    member_email: Option<String>,
    #[serde(default)]
    event_id: Option<String>,
}

/// `POST /api/event-registration`
///
/// Confirms the member exists. Registrations themselves are not persisted.
async fn register_for_event(
    State(state): State<AppState>,
    body: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let (Some(email), Some(event_id)) = (
        request.member_email.filter(|e| !e.is_empty()),
        request.event_id.filter(|e| !e.is_empty()),
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    let member = state
        .content
        .find_member_by_email(&email)
        .await
        .map_err(ApiError::upstream("Failed to register for event"))?;

    if member.is_none() {
        return Err(ApiError::NotFound("Member not found".to_string()));
    }

    tracing::info!(member_email = %email, event_id = %event_id, "Member registered for event");

    Ok(Json(json!({
        "success": true,
        "message": "Successfully registered for event",
    })))
}
