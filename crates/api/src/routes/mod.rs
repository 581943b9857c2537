//! Route handlers for the concierge API.

pub mod bookings;
pub mod catalog;
pub mod chat;
pub mod conversations;
pub mod health;
pub mod users;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/api/chat", post(chat::chat).fallback(method_not_allowed))
        // Users
        .route(
            "/api/users",
            post(users::create_user).fallback(method_not_allowed),
        )
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/users/:id/conversations",
            get(conversations::list_for_user).fallback(method_not_allowed),
        )
        // Bookings
        .route(
            "/api/bookings",
            post(bookings::create_booking).fallback(method_not_allowed),
        )
        .route(
            "/api/bookings/user/:id",
            get(bookings::list_for_user).fallback(method_not_allowed),
        )
        .route(
            "/api/bookings/:id",
            get(bookings::get_booking).fallback(method_not_allowed),
        )
        .route(
            "/api/bookings/:id/status",
            put(bookings::update_status).fallback(method_not_allowed),
        )
        // Catalog
        .route(
            "/api/establishments",
            get(catalog::establishments).fallback(method_not_allowed),
        )
        .route(
            "/api/establishments/:id",
            get(catalog::establishment).fallback(method_not_allowed),
        )
        .route(
            "/api/events",
            get(catalog::events).fallback(method_not_allowed),
        )
        .route(
            "/api/events/:id",
            get(catalog::event).fallback(method_not_allowed),
        )
        .route(
            "/api/services",
            get(catalog::services).fallback(method_not_allowed),
        )
        .route(
            "/api/services/:id",
            get(catalog::service).fallback(method_not_allowed),
        )
        // Conversations
        .route(
            "/api/conversations/:id/messages",
            get(conversations::list_messages).fallback(method_not_allowed),
        )
        // Health check
        .route("/health", get(health::health))
        .fallback(not_found)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": "Not found"
        })),
    )
}
