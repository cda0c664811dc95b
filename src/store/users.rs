//! Identity ledger: user rows and credential checks.
//!
//! Password hashes are opaque here; hashing happens at the API boundary
//! and this module only ever compares stored bytes.

use subtle::ConstantTimeEq;
use uuid::Uuid;

use super::{now_rfc3339, StoreError, StoreResult};
use crate::db::{DbPool, User};

/// Create a user. Email and username are each globally unique; a duplicate
/// of either fails with `Conflict`.
pub async fn create_user(
    pool: &DbPool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> StoreResult<User> {
    let id = Uuid::new_v4().to_string();
    let now = now_rfc3339();

    let result = sqlx::query(
        "INSERT INTO users (id, email, username, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await;

    if let Err(err) = result {
        // Name the offending field rather than returning a generic conflict.
        if let sqlx::Error::Database(db_err) = &err {
            let msg = db_err.message();
            if msg.contains("users.email") {
                return Err(StoreError::Conflict(format!(
                    "a user with email {} already exists",
                    email
                )));
            }
            if msg.contains("users.username") {
                return Err(StoreError::Conflict(format!(
                    "a user with username {} already exists",
                    username
                )));
            }
        }
        return Err(err.into());
    }

    get_user(pool, &id).await
}

/// Look up a user by id.
pub async fn get_user(pool: &DbPool, user_id: &str) -> StoreResult<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {} not found", user_id)))
}

/// Check a stored hash against the one supplied by the auth collaborator.
/// Unknown email is `NotFound`; a mismatched hash is `Auth`.
pub async fn authenticate(pool: &DbPool, email: &str, password_hash: &str) -> StoreResult<User> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("no user with email {}", email)))?;

    let stored = user.password_hash.as_bytes();
    let provided = password_hash.as_bytes();
    let matches = stored.len() == provided.len() && bool::from(stored.ct_eq(provided));
    if !matches {
        return Err(StoreError::Auth("invalid credentials".to_string()));
    }

    Ok(user)
}

/// Remove a user. Dependent documents, chat turns, and interview sessions
/// go with it via the schema's ON DELETE CASCADE; nothing is deleted in
/// Rust code.
pub async fn delete_user(pool: &DbPool, user_id: &str) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("user {} not found", user_id)));
    }
    Ok(())
}
