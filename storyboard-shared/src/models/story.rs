/// Story model
///
/// Stories belong to a board and carry their own owner column so the CRUD
/// service can scope queries without joining through boards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE stories (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
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

/// A story on a board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Story {
    /// Unique story id
    pub id: Uuid,

    /// Story title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Board this story sits on
    pub board_id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// When the story was created
    pub created_at: DateTime<Utc>,

    /// When the story was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStory {
    /// Story title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Board this story sits on
    pub board_id: Uuid,

    /// Owning user
    pub user_id: Uuid,
}

impl Document for Story {
    const TABLE: &'static str = "stories";
    const COLUMNS: &'static str =
        "id, title, description, board_id, user_id, created_at, updated_at";

    type Create = CreateStory;

    fn id(&self) -> Uuid {
        self.id
    }

    async fn insert(pool: &PgPool, data: CreateStory) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO stories (title, description, board_id, user_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, description, board_id, user_id, created_at, updated_at",
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.board_id)
        .bind(data.user_id)
        .fetch_one(pool)
        .await
    }
}

impl OwnedDocument for Story {
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
        assert_eq!(Story::TABLE, "stories");
        assert_eq!(Story::OWNER_COLUMN, "user_id");
        assert!(Story::COLUMNS.contains("board_id"));
    }
}
