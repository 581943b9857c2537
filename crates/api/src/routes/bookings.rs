//! Booking routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{booking, Booking, NewBooking};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingList {
    pub success: bool,
    pub bookings: Vec<Booking>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

/// Body of a status change.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusChange {
    pub status: String,
}

/// Fetch a booking by id.
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>> {
    let booking = booking::get_booking(state.db.pool(), &id).await?;
    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

/// Move a booking to another status.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<BookingResponse>> {
    let Json(change) = payload?;
    let booking = booking::update_booking_status(state.db.pool(), &id, change.status.trim()).await?;
    info!(booking_id = %booking.id, status = %booking.status, "Updated booking status");
    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

/// List a user's bookings, most recent booking date first.
///
/// An unknown user yields an empty list.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<BookingList>> {
    let bookings = booking::list_bookings_for_user(state.db.pool(), &user_id).await?;
    Ok(Json(BookingList {
        success: true,
        count: bookings.len(),
        bookings,
    }))
}

/// Create a booking for an existing user.
pub async fn create_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>)> {
    let Json(new_booking) = payload?;
    let booking = booking::create_booking(state.db.pool(), &new_booking).await?;
    info!(booking_id = %booking.id, user_id = %booking.user_id, "Created booking");
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            booking,
        }),
    ))
}
