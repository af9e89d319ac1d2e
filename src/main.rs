use std::net::TcpListener;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use rei_da_pelada_backend::run;
use rei_da_pelada_backend::config::settings::{get_config, get_jwt_settings};
use rei_da_pelada_backend::db::run_migrations;
use rei_da_pelada_backend::services::{RankingService, SnapshotSource};
use rei_da_pelada_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_config().map_err(|e| {
        eprintln!("Failed to read the config: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let subscriber = get_subscriber(
        "rei-da-pelada-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
        .map_err(|e| {
            tracing::error!("Failed to create Postgres connection pool: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

    if config.database.run_migrations {
        run_migrations(&connection_pool).await.map_err(|e| {
            tracing::error!("Failed to migrate the database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;
        tracing::info!("Database migrations applied");
    }

    let ranking_service = RankingService::new(
        SnapshotSource::Postgres(connection_pool),
        config.ranking,
    );

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(listener, ranking_service, jwt_settings)?.await
}
