//! Booking persistence.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{Booking, NewBooking};
use crate::user::user_exists;
use crate::validation::validate_status;

const BOOKING_COLUMNS: &str = "id, user_id, establishment_id, event_id, service_id, \
booking_date, party_size, status, notes, created_at";

/// Create a pending booking for an existing user.
pub async fn create_booking(pool: &SqlitePool, booking: &NewBooking) -> Result<Booking> {
    booking.validate()?;

    if !user_exists(pool, &booking.user_id).await? {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: booking.user_id.clone(),
        });
    }

    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO bookings
            (id, user_id, establishment_id, event_id, service_id, booking_date, party_size, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&booking.user_id)
    .bind(&booking.establishment_id)
    .bind(&booking.event_id)
    .bind(&booking.service_id)
    .bind(booking.booking_date.trim())
    .bind(booking.party_size)
    .bind(&booking.notes)
    .execute(pool)
    .await
    .map_err(|e| map_missing_reference(e, booking))?;

    tracing::debug!(booking_id = %id, user_id = %booking.user_id, "Booking created");

    get_booking(pool, &id).await
}

/// A dangling establishment, event or service reference becomes `NotFound`.
fn map_missing_reference(e: sqlx::Error, booking: &NewBooking) -> DatabaseError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_foreign_key_violation() {
            let id = [&booking.establishment_id, &booking.event_id, &booking.service_id]
                .into_iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            return DatabaseError::NotFound {
                entity: "Booking target",
                id,
            };
        }
    }
    DatabaseError::Sqlx(e)
}

/// Get a booking by ID.
pub async fn get_booking(pool: &SqlitePool, id: &str) -> Result<Booking> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT {} FROM bookings WHERE id = ?",
        BOOKING_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Booking",
        id: id.to_string(),
    })
}

/// List a user's bookings, most recent booking date first.
pub async fn list_bookings_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {} FROM bookings WHERE user_id = ? ORDER BY booking_date DESC, created_at DESC",
        BOOKING_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Change a booking's status.
pub async fn update_booking_status(pool: &SqlitePool, id: &str, status: &str) -> Result<Booking> {
    validate_status(status)?;

    let result = sqlx::query(
        r#"
        UPDATE bookings
        SET status = ?
        WHERE id = ?
        "#,
    )
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Booking",
            id: id.to_string(),
        });
    }

    get_booking(pool, id).await
}
