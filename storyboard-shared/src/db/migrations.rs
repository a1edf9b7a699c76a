/// Database migration runner
///
/// Runs the SQL migrations stored in `migrations/` at the workspace root
/// through sqlx's embedded migrator. Migration files are named
/// `{version}_{name}.sql` and applied in order; applied versions are tracked
/// in the `_sqlx_migrations` table.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations.
///
/// # Errors
///
/// Returns an error if a migration file fails to apply or the connection is
/// lost mid-run. Failed migrations are rolled back where PostgreSQL allows.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
