//! Input validation for user and booking fields.

use std::fmt;

use chrono::NaiveDate;

use crate::models::{NewBooking, NewUser, UserUpdate};

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid email format.
    InvalidEmail(String),
    /// Invalid phone number.
    InvalidPhone(String),
    /// Date not in `YYYY-MM-DD` form.
    InvalidDate(String),
    /// Value outside the accepted set or range.
    Invalid { field: String, reason: String },
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::InvalidPhone(msg) => write!(f, "Invalid phone: {}", msg),
            ValidationError::InvalidDate(value) => {
                write!(f, "Invalid date '{}': expected YYYY-MM-DD", value)
            }
            ValidationError::Invalid { field, reason } => write!(f, "Invalid {}: {}", field, reason),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for display names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum allowed length for booking notes.
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Largest party a single booking may cover.
pub const MAX_PARTY_SIZE: i64 = 50;

/// Accepted booking statuses.
pub const BOOKING_STATUSES: &[&str] = &["pending", "confirmed", "cancelled", "completed"];

/// Validate an email address (basic format check).
///
/// This is a basic validation that checks:
/// - Contains exactly one @
/// - Has at least one character before @
/// - Has at least one dot after @
/// - Is not too long
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "malformed domain".to_string(),
        ));
    }

    Ok(())
}

/// Validate a display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Empty("name".to_string()));
    }

    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
            actual: len,
        });
    }

    Ok(())
}

/// Validate a phone number: optional leading `+`, then 6 to 15 digits.
///
/// Spaces, dashes, dots and parentheses are ignored.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);

    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            other => {
                return Err(ValidationError::InvalidPhone(format!(
                    "unexpected character '{}'",
                    other
                )))
            }
        }
    }

    if !(6..=15).contains(&digits) {
        return Err(ValidationError::InvalidPhone(format!(
            "expected 6 to 15 digits, got {}",
            digits
        )));
    }

    Ok(())
}

/// Validate a language code such as `fr`, `en` or `pt-BR`.
pub fn validate_language(language: &str) -> Result<(), ValidationError> {
    let language = language.trim();

    if language.is_empty() {
        return Err(ValidationError::Empty("language".to_string()));
    }

    let valid = language.len() <= 8
        && language.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        && language.chars().next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false);
    if !valid {
        return Err(ValidationError::Invalid {
            field: "language".to_string(),
            reason: "expected a language code like 'fr' or 'en'".to_string(),
        });
    }

    Ok(())
}

/// Validate a calendar date in `YYYY-MM-DD` form.
pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// Validate a party size.
pub fn validate_party_size(size: i64) -> Result<(), ValidationError> {
    if !(1..=MAX_PARTY_SIZE).contains(&size) {
        return Err(ValidationError::Invalid {
            field: "partySize".to_string(),
            reason: format!("must be between 1 and {}", MAX_PARTY_SIZE),
        });
    }
    Ok(())
}

/// Validate a booking status.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if !BOOKING_STATUSES.contains(&status) {
        return Err(ValidationError::Invalid {
            field: "status".to_string(),
            reason: format!("must be one of {}", BOOKING_STATUSES.join(", ")),
        });
    }
    Ok(())
}

/// Validate a message role.
pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    match role {
        "user" | "assistant" => Ok(()),
        _ => Err(ValidationError::Invalid {
            field: "role".to_string(),
            reason: "must be 'user' or 'assistant'".to_string(),
        }),
    }
}

impl NewUser {
    /// Validate every provided field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref phone) = self.phone {
            validate_phone(phone)?;
        }
        if let Some(ref language) = self.language {
            validate_language(language)?;
        }
        Ok(())
    }
}

impl UserUpdate {
    /// Validate every provided field. An update with no fields is rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::Empty("update".to_string()));
        }
        if let Some(ref name) = self.name {
            validate_name(name)?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        if let Some(ref phone) = self.phone {
            validate_phone(phone)?;
        }
        if let Some(ref language) = self.language {
            validate_language(language)?;
        }
        Ok(())
    }
}

impl NewBooking {
    /// Validate the booking fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::Empty("userId".to_string()));
        }
        validate_date(&self.booking_date)?;
        validate_party_size(self.party_size)?;
        if let Some(ref notes) = self.notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_LENGTH {
                return Err(ValidationError::TooLong {
                    field: "notes".to_string(),
                    max: MAX_NOTES_LENGTH,
                    actual: len,
                });
            }
        }
        Ok(())
    }
}
