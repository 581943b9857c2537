//! User routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{user, NewUser, User, UserUpdate};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::AppState;

#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

/// Fetch a user by id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = user::get_user(state.db.pool(), &id).await?;
    Ok(Json(user.into()))
}

/// Create a user.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let Json(new_user) = payload?;
    let user = user::create_user(state.db.pool(), &new_user).await?;
    info!(user_id = %user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Apply a partial update; absent fields keep their stored value.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(update) = payload?;
    if update.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let user = user::update_user(state.db.pool(), &id, &update).await?;
    info!(user_id = %user.id, "Updated user");
    Ok(Json(user.into()))
}

/// Delete a user. Their bookings go with them.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    user::delete_user(state.db.pool(), &id).await?;
    info!(user_id = %id, "Deleted user");
    Ok(Json(serde_json::json!({ "success": true })))
}
