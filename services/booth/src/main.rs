use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use booth::{AppConfig, AppState, Dispatcher, create_router, repositories::ensure_schema};
use common::database::{DatabaseConfig, health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting photo booth service");

    let config = AppConfig::from_env()?;
    if config.uses_dev_secret() {
        warn!("SECRET_KEY is not set, using the development default");
    }

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    ensure_schema(&pool).await?;

    let dispatcher = Dispatcher::from_config(&config)?;
    let app_state = AppState::new(pool, dispatcher, config.static_dir.clone());
    let app = create_router(app_state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Photo booth service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Photo booth service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down photo booth service");
}
