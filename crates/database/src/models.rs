//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A concierge user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Display name
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Gliitz membership flag
    pub is_member: bool,
    /// Preferred language code (e.g., "fr", "en", "es")
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating a user. A missing `id` gets a fresh UUID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub language: Option<String>,
}

/// A partial user update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_member: Option<bool>,
    #[serde(default)]
    pub language: Option<String>,
}

impl UserUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.is_member.is_none()
            && self.language.is_none()
    }
}

/// A reservation made by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub establishment_id: Option<String>,
    pub event_id: Option<String>,
    pub service_id: Option<String>,
    /// Date of the reservation, `YYYY-MM-DD`.
    pub booking_date: String,
    pub party_size: i64,
    /// One of `pending`, `confirmed`, `cancelled`, `completed`.
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Fields for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBooking {
    pub user_id: String,
    #[serde(default)]
    pub establishment_id: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    pub booking_date: String,
    #[serde(default = "default_party_size")]
    pub party_size: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_party_size() -> i64 {
    1
}

/// An establishment, event or service row.
///
/// Only events carry a `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub zone: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A conversation owned by a user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
}

/// A persisted conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    /// Auto-incrementing ID.
    pub id: i64,
    pub conversation_id: String,
    /// `user` or `assistant`
    pub role: String,
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}
