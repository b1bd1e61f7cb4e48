//! Tracker service routes

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    error::ApiError,
    extract::{JsonOrForm, QueryParams, UserIdParam},
    models::{AddExerciseRequest, CreateUserRequest, LogsQuery},
    state::AppState,
};

/// Create the router for the tracker service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", get(get_users).post(create_user))
        .route("/api/users/", get(get_users).post(create_user))
        .route("/api/users/:id/exercises", post(add_exercise))
        .route("/api/users/:id/logs", get(get_logs))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "exercise-tracker"
    }))
}

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .service
        .create_user(payload.username.as_deref())
        .await?;

    Ok(Json(user))
}

/// Get all users
pub async fn get_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.service.list_users().await?;

    Ok(Json(users))
}

/// Log an exercise for a user
pub async fn add_exercise(
    State(state): State<AppState>,
    UserIdParam(id): UserIdParam,
    JsonOrForm(payload): JsonOrForm<AddExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let exercise = state.service.add_exercise(&id, &payload).await?;

    Ok(Json(exercise))
}

/// Get a user's exercise log
pub async fn get_logs(
    State(state): State<AppState>,
    UserIdParam(id): UserIdParam,
    QueryParams(query): QueryParams<LogsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let log = state.service.get_logs(&id, &query).await?;

    Ok(Json(log))
}
