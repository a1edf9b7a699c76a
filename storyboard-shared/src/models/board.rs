/// Board model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::repository::{Document, OwnedDocument};

/// A board owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board id
    pub id: Uuid,

    /// Board title
    pub title: String,

    /// Owning user
    pub user_id: Uuid,

    /// When the board was created
    pub created_at: DateTime<Utc>,

    /// When the board was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBoard {
    /// Board title
    pub title: String,

    /// Owning user
    pub user_id: Uuid,
}

impl Document for Board {
    const TABLE: &'static str = "boards";
    const COLUMNS: &'static str = "id, title, user_id, created_at, updated_at";

    type Create = CreateBoard;

    fn id(&self) -> Uuid {
        self.id
    }

    async fn insert(pool: &PgPool, data: CreateBoard) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO boards (title, user_id) VALUES ($1, $2) \
             RETURNING id, title, user_id, created_at, updated_at",
        )
        .bind(data.title)
        .bind(data.user_id)
        .fetch_one(pool)
        .await
    }
}

impl OwnedDocument for Board {
    const OWNER_COLUMN: &'static str = "user_id";

    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_metadata() {
        assert_eq!(Board::TABLE, "boards");
        assert_eq!(Board::OWNER_COLUMN, "user_id");
        assert!(Board::COLUMNS.starts_with("id,"));
    }
}
