/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     name VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The password hash is write-only: it is absent from [`User`] and from
/// every read column list, and only surfaces in [`UserCredentials`], a
/// non-serializable row type the login path fetches explicitly. Emails are
/// lowercased on write and lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Read columns; never includes `password_hash`.
const COLUMNS: &str = "id, email, name, created_at, updated_at";

/// A user account as exposed to the rest of the system.
///
/// This is the value the authentication guard attaches to requests, so it
/// intentionally has no password field at all.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user id
    pub id: Uuid,

    /// Email address, stored lowercase, unique
    pub email: String,

    /// Optional display name
    pub name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address; lowercased before storage
    pub email: String,

    /// Argon2id password hash, never a plaintext password
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,
}

/// Credential row used by the login path only.
///
/// Deliberately not `Serialize`: the hash cannot end up in a response body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    /// User id
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Stored Argon2id hash
    pub password_hash: String,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Propagates store errors; a duplicate email surfaces as a unique
    /// constraint violation.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let email = data.email.to_lowercase();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) \
             RETURNING id, email, name, created_at, updated_at",
        )
        .bind(email)
        .bind(data.password_hash)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by id. This is the guard's lookup.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", COLUMNS);

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetches the credential row for an email, including the write-only
    /// hash column. Used by login and nothing else.
    pub async fn find_by_email_with_password(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await
    }
}
