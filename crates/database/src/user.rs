//! User CRUD operations.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{map_unique, DatabaseError, Result};
use crate::models::{NewUser, User, UserUpdate};

const USER_COLUMNS: &str = "id, name, email, phone, is_member, language, created_at, updated_at";

/// Create a new user.
pub async fn create_user(pool: &SqlitePool, new_user: &NewUser) -> Result<User> {
    new_user.validate()?;

    let id = new_user
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let language = new_user.language.as_deref().unwrap_or("fr");

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, phone, is_member, language)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(new_user.name.trim())
    .bind(new_user.email.as_deref().map(str::trim))
    .bind(new_user.phone.as_deref().map(str::trim))
    .bind(new_user.is_member)
    .bind(language)
    .execute(pool)
    .await
    .map_err(|e| map_unique(e, "User", &id))?;

    get_user(pool, &id).await
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Apply a partial update and return the stored user.
///
/// Fields left as `None` keep their current value.
pub async fn update_user(pool: &SqlitePool, id: &str, update: &UserUpdate) -> Result<User> {
    update.validate()?;

    let result = sqlx::query(
        r#"
        UPDATE users
        SET name = COALESCE(?, name),
            email = COALESCE(?, email),
            phone = COALESCE(?, phone),
            is_member = COALESCE(?, is_member),
            language = COALESCE(?, language),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(update.name.as_deref().map(str::trim))
    .bind(update.email.as_deref().map(str::trim))
    .bind(update.phone.as_deref().map(str::trim))
    .bind(update.is_member)
    .bind(update.language.as_deref().map(str::trim))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| map_unique(e, "User email", update.email.as_deref().unwrap_or(id)))?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    get_user(pool, id).await
}

/// Delete a user by ID.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Check whether a user exists.
pub async fn user_exists(pool: &SqlitePool, id: &str) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
