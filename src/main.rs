use std::{str::FromStr, sync::Arc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notice_board::{
    api,
    config::Settings,
    repository::SqliteNoticeRepository,
    service::NoticeService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing, so RUST_LOG from .env is honored. A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notice_board=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Any failure here, or a missing database url, means we cannot run at all
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("FATAL ERROR: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let Some(database_url) = settings.database_url().map(str::to_string) else {
        tracing::error!("FATAL ERROR: database url is not configured (NOTICE_BOARD__DATABASE__URL)");
        std::process::exit(1);
    };

    tracing::info!("Starting notice board on {}", settings.bind_address());

    // Initialize database
    let connect_options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Successfully connected to the database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let notice_repo = Arc::new(SqliteNoticeRepository::new(db_pool.clone()));
    let notice_service = Arc::new(NoticeService::new(notice_repo));

    let app = api::create_app(notice_service);

    let listener = tokio::net::TcpListener::bind(settings.bind_address()).await?;

    tracing::info!("Server listening on http://{}", settings.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Database connections closed, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
