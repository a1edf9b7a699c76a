/// Generic repository over document types
///
/// [`Repository`] wraps the connection pool for one document type and
/// exposes the two primitive store operations: fetch one row by id, and
/// run the document's insert. Everything a query needs to know about a
/// concrete type (table, readable columns, insert statement) comes from the
/// [`Document`] trait, so the repository itself contains no per-entity SQL.
///
/// Errors are `sqlx::Error`, passed through unchanged; mapping to HTTP
/// responses happens at the API boundary.

use sqlx::postgres::{PgPool, PgRow};
use std::future::Future;
use std::marker::PhantomData;
use uuid::Uuid;

/// A row-backed document with a UUID primary key.
///
/// `COLUMNS` is the read column list and deliberately omits write-only
/// columns (e.g. password hashes), so no default read path can leak them.
pub trait Document:
    for<'r> sqlx::FromRow<'r, PgRow> + serde::Serialize + Unpin + Send + Sync + 'static
{
    /// Table backing this document type
    const TABLE: &'static str;

    /// Column list used by every read query
    const COLUMNS: &'static str;

    /// Payload accepted by [`Repository::save`]
    type Create: Send + Sync + 'static;

    /// Primary key of this document
    fn id(&self) -> Uuid;

    /// Runs `INSERT ... RETURNING <COLUMNS>` for a create payload
    fn insert(
        pool: &PgPool,
        data: Self::Create,
    ) -> impl Future<Output = Result<Self, sqlx::Error>> + Send;
}

/// A document owned by a user; every service-level query is scoped to the
/// owner column.
pub trait OwnedDocument: Document {
    /// Column holding the owning user's id
    const OWNER_COLUMN: &'static str;

    /// The owning user's id
    fn owner_id(&self) -> Uuid;
}

/// Store accessor for one document type.
pub struct Repository<D> {
    pool: PgPool,
    _marker: PhantomData<fn() -> D>,
}

impl<D: Document> Repository<D> {
    /// Creates a repository over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn select_by_id_sql() -> String {
        format!("SELECT {} FROM {} WHERE id = $1", D::COLUMNS, D::TABLE)
    }

    /// Fetches a single document by id.
    pub async fn find_one(&self, id: Uuid) -> Result<Option<D>, sqlx::Error> {
        let sql = Self::select_by_id_sql();
        sqlx::query_as::<_, D>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Persists a create payload and returns the stored document.
    pub async fn save(&self, data: D::Create) -> Result<D, sqlx::Error> {
        D::insert(&self.pool, data).await
    }
}
