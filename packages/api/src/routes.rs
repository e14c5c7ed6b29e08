//! axum routes for the auth API.
//!
//! | Method | Path | Success |
//! |--------|------|---------|
//! | POST | `/api/auth/register` | 201 `{success, user}` |
//! | POST | `/api/auth/login` | 200 `{success, user}` |
//! | POST | `/api/auth/change-password` | 200 `{success, message}` |
//! | GET | `/api/auth/users` | 200 `{success, count, users}` |
//!
//! Failures render through [`ApiError`]'s `IntoResponse`. A body that is not
//! valid JSON is a 400 like any other validation failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::auth::AuthService;
use crate::error::ApiError;
use crate::models::{ApiResponse, ChangePasswordRequest, LoginRequest, RegisterRequest};

/// Router with every auth endpoint mounted under `/api/auth`.
pub fn router(service: AuthService) -> Router {
    let auth = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/change-password", post(change_password))
        .route("/users", get(list_users))
        .with_state(service);

    Router::new()
        .nest("/api/auth", auth)
        .layer(TraceLayer::new_for_http())
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(ApiError::validation("Invalid request body"))
        }
    }
}

async fn register(
    State(service): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let user = service.register(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::with_user(user))))
}

async fn login(
    State(service): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    let user = service.login(body(payload)?).await?;
    Ok(Json(ApiResponse::with_user(user)))
}

async fn change_password(
    State(service): State<AuthService>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, ApiError> {
    service.change_password(body(payload)?).await?;
    Ok(Json(ApiResponse::with_message("Password changed successfully")))
}

async fn list_users(State(service): State<AuthService>) -> Result<Json<ApiResponse>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(ApiResponse::with_users(users)))
}
