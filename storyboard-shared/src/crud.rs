/// Owner-scoped generic CRUD service
///
/// [`CrudService`] sits between the API handlers and the [`Repository`],
/// adding exactly one thing: every read and delete is filtered by the owning
/// user's id. A caller can never see or remove another user's documents,
/// whatever id it asks for.
///
/// # Example
///
/// ```no_run
/// use storyboard_shared::crud::CrudService;
/// use storyboard_shared::models::board::{Board, CreateBoard};
/// use uuid::Uuid;
///
/// # async fn example(pool: sqlx::PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let boards = CrudService::<Board>::new(pool);
///
/// let board = boards
///     .create(CreateBoard { title: "Sprint 12".into(), user_id })
///     .await?;
///
/// assert!(boards.find_one(board.id, user_id).await?.is_some());
/// // A different user sees nothing
/// assert!(boards.find_one(board.id, Uuid::new_v4()).await?.is_none());
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::repository::{OwnedDocument, Repository};

/// Generic CRUD operations for one owned document type.
///
/// Store errors (`sqlx::Error`) are propagated unchanged.
pub struct CrudService<D: OwnedDocument> {
    repo: Repository<D>,
}

impl<D: OwnedDocument> CrudService<D> {
    /// Creates a service over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(pool),
        }
    }

    /// The underlying repository accessor.
    pub fn repository(&self) -> &Repository<D> {
        &self.repo
    }

    fn list_sql() -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY created_at DESC",
            D::COLUMNS,
            D::TABLE,
            D::OWNER_COLUMN
        )
    }

    fn select_sql() -> String {
        format!(
            "SELECT {} FROM {} WHERE id = $1 AND {} = $2",
            D::COLUMNS,
            D::TABLE,
            D::OWNER_COLUMN
        )
    }

    fn delete_sql() -> String {
        format!(
            "DELETE FROM {} WHERE id = $1 AND {} = $2",
            D::TABLE,
            D::OWNER_COLUMN
        )
    }

    /// Persists a create payload via the repository.
    pub async fn create(&self, data: D::Create) -> Result<D, sqlx::Error> {
        self.repo.save(data).await
    }

    /// All documents owned by `owner_id`, newest first.
    pub async fn find_many(&self, owner_id: Uuid) -> Result<Vec<D>, sqlx::Error> {
        let sql = Self::list_sql();
        sqlx::query_as::<_, D>(&sql)
            .bind(owner_id)
            .fetch_all(self.repo.pool())
            .await
    }

    /// A single document, only if `owner_id` owns it.
    pub async fn find_one(&self, id: Uuid, owner_id: Uuid) -> Result<Option<D>, sqlx::Error> {
        let sql = Self::select_sql();
        sqlx::query_as::<_, D>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(self.repo.pool())
            .await
    }

    /// Deletes a document if `owner_id` owns it. Returns whether a row was
    /// removed.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
        let sql = Self::delete_sql();
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .execute(self.repo.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::Board;
    use crate::models::story::Story;

    #[test]
    fn test_every_query_is_owner_scoped() {
        assert_eq!(
            CrudService::<Board>::list_sql(),
            "SELECT id, title, user_id, created_at, updated_at FROM boards \
             WHERE user_id = $1 ORDER BY created_at DESC"
        );
        assert_eq!(
            CrudService::<Board>::select_sql(),
            "SELECT id, title, user_id, created_at, updated_at FROM boards \
             WHERE id = $1 AND user_id = $2"
        );
        assert_eq!(
            CrudService::<Board>::delete_sql(),
            "DELETE FROM boards WHERE id = $1 AND user_id = $2"
        );
    }

    #[test]
    fn test_story_queries_target_story_table() {
        assert!(CrudService::<Story>::list_sql().contains("FROM stories"));
        assert!(CrudService::<Story>::delete_sql().contains("FROM stories"));
        assert!(CrudService::<Story>::select_sql().ends_with("WHERE id = $1 AND user_id = $2"));
    }
}
