use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use shule::logging::init_tracing;
use shule::metrics::{init_metrics, metrics_app};
use shule::router::init_router;
use shule::state::AppState;
use shule_cli::seeder::ensure_default_staff;
use shule_config::DatabaseConfig;
use shule_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    init_tracing(&log_dir)?;

    let db_config = DatabaseConfig::from_env();
    let db = init_db_pool(&db_config)
        .await
        .context("failed to open database")?;
    run_migrations(&db)
        .await
        .context("failed to run migrations")?;
    ensure_default_staff(&db).await?;

    let state = AppState::from_env(db).map_err(|e| e.error)?;
    let mut app = init_router(state);

    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics available at /metrics");
    }

    let addr = std::env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "server running");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
