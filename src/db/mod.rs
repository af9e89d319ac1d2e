use sqlx::migrate::MigrateError;
use sqlx::PgPool;

pub mod ranking_queries;

/// Apply the schema in `migrations/`. Already applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
