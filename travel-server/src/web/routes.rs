//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::Preferences;
use crate::planner::{PlanError, PlanRequest, Planner, SaveItinerary};
use crate::store::{JsonStore, StoreError};

use super::dto::*;
use super::identity::{optional_user, require_user};
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/travel/plan", post(plan_travel))
        .route("/api/travel/save-itinerary", post(save_itinerary))
        .route("/api/preferences", get(get_preferences).put(put_preferences))
        .route("/api/history", get(list_history))
        .route("/api/history/:id", delete(delete_history))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Run a store write off the async workers.
async fn with_store<T, F>(store: &Arc<JsonStore>, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&JsonStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("store task failed: {e}"),
        })?
        .map_err(AppError::from)
}

/// Generate and rank route options for a city pair.
async fn plan_travel(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PlanTravelResponse>, AppError> {
    let req: PlanTravelRequest = parse_json(&body)?;
    let request = PlanRequest::from(req);
    let user = optional_user(&headers);

    let planner = Planner::new(
        state.modes.as_ref(),
        state.distances.as_ref(),
        state.store.as_ref(),
        state.config.as_ref(),
    );
    let mut random = state.random();
    let plan = planner.plan_route(&request, user, &mut random)?;

    Ok(Json(plan.into()))
}

/// Save the option the user picked to their history.
async fn save_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let user = require_user(&headers)?;
    let req: SaveItineraryRequest = parse_json(&body)?;

    let planner = Planner::new(
        state.modes.as_ref(),
        state.distances.as_ref(),
        state.store.as_ref(),
        state.config.as_ref(),
    );
    let entry = planner.save_selected_option(user, SaveItinerary::from(req))?;

    let record = with_store(&state.store, move |store| store.insert_history(entry)).await?;
    info!(user = %user, id = record.id, "saved itinerary");

    let body = SaveItineraryResponse {
        success: true,
        message: "Itinerary saved".to_string(),
        id: record.id,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// The caller's stored preferences, or defaults.
async fn get_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Preferences>, AppError> {
    let user = require_user(&headers)?;
    let preferences = state.store.preferences(user)?.unwrap_or_default();
    Ok(Json(preferences))
}

/// Replace the caller's preferences.
async fn put_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = require_user(&headers)?;
    let preferences: Preferences = parse_json(&body)?;

    with_store(&state.store, move |store| {
        store.upsert_preferences(user, preferences)
    })
    .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// The caller's saved itineraries, newest first.
async fn list_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>, AppError> {
    let user = require_user(&headers)?;
    let history = state.store.list_history(user)?;
    Ok(Json(HistoryResponse { history }))
}

/// Delete one of the caller's saved itineraries.
async fn delete_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<SuccessResponse>, AppError> {
    let user = require_user(&headers)?;

    let deleted = with_store(&state.store, move |store| store.delete_history(id, user)).await?;
    if !deleted {
        return Err(AppError::NotFound {
            message: "Not found".to_string(),
        });
    }

    Ok(Json(SuccessResponse::ok()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unauthorized,
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
