//! User endpoints: registration, login, lookup, deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::auth::hash_password;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_email, validate_password, validate_username};
use crate::db::{CreateUserRequest, LoginRequest, UserResponse};
use crate::store::{users, StoreError};
use crate::AppState;

fn validate_create_request(req: &CreateUserRequest) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();

    if let Err(e) = validate_email(&req.email) {
        errors.add("email", e);
    }
    if let Err(e) = validate_username(&req.username) {
        errors.add("username", e);
    }
    if let Err(e) = validate_password(&req.password) {
        errors.add("password", e);
    }

    errors.finish()
}

/// Create a user
///
/// POST /api/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    validate_create_request(&req)?;

    let password_hash = hash_password(&req.password);
    let user = users::create_user(&state.db, &req.email, &req.username, &password_hash).await?;

    tracing::info!(user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Verify credentials and return the user
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let password_hash = hash_password(&req.password);

    // Unknown email and wrong password collapse to the same response so
    // the endpoint does not leak which emails are registered.
    let user = users::authenticate(&state.db, &req.email, &password_hash)
        .await
        .map_err(|err| match err {
            StoreError::NotFound(_) | StoreError::Auth(_) => {
                ApiError::unauthorized("Invalid credentials")
            }
            other => other.into(),
        })?;

    Ok(Json(UserResponse::from(user)))
}

/// Get a user by id
///
/// GET /api/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = users::get_user(&state.db, &id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user and, by cascade, everything they own
///
/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    users::delete_user(&state.db, &id).await?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
