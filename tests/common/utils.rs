#![allow(dead_code)]

use std::net::TcpListener;
use std::time::Duration;
use once_cell::sync::Lazy;
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use rei_da_pelada_backend::auth::jwt::generate_token;
use rei_da_pelada_backend::config::jwt::JwtSettings;
use rei_da_pelada_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings};
use rei_da_pelada_backend::ranking::EventSnapshot;
use rei_da_pelada_backend::run;
use rei_da_pelada_backend::services::{RankingService, SnapshotSource};
use rei_da_pelada_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub jwt_settings: JwtSettings,
    pub client: Client,
}

impl TestApp {
    pub fn token_for(&self, player_id: Uuid) -> String {
        generate_token(&self.jwt_settings, player_id, "test player")
            .expect("Failed to generate token")
    }

    pub async fn get_as(&self, player_id: Uuid, path: &str) -> Response {
        self.client
            .get(&format!("{}{}", &self.address, path))
            .header("Authorization", format!("Bearer {}", self.token_for(player_id)))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_anonymous(&self, path: &str) -> Response {
        self.client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Spawn the real server on a random port, backed by a fixed snapshot.
pub async fn spawn_app(snapshot: EventSnapshot) -> TestApp {
    spawn_app_with_source(SnapshotSource::in_memory(snapshot)).await
}

pub async fn spawn_app_with_source(source: SnapshotSource) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let configuration = get_config().expect("Failed to read configuration.");
    let jwt_settings = get_jwt_settings(&configuration);
    let ranking_service = RankingService::new(source, configuration.ranking);

    let server = run(listener, ranking_service, jwt_settings.clone())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        jwt_settings,
        client: Client::new(),
    }
}

pub async fn spawn_empty_app() -> TestApp {
    spawn_app(EventSnapshot::new()).await
}

/// Fresh, migrated database for one test, or `None` when no Postgres server
/// is reachable with the configured credentials.
pub async fn test_database() -> Option<PgPool> {
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_url = None;
    configuration.database.db_name = Uuid::new_v4().to_string();

    let probe = tokio::time::timeout(
        Duration::from_secs(5),
        PgConnection::connect(configuration.database.connection_string_without_db().expose_secret()),
    )
    .await;
    match probe {
        Ok(Ok(connection)) => {
            let _ = connection.close().await;
        }
        _ => {
            eprintln!("Postgres is not reachable, skipping database test");
            return None;
        }
    }

    Some(configure_db(&configuration.database).await)
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            config.connection_string_without_db().expose_secret()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}
