use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use fishnik_api::bootstrap::app_context::{AppContext, AppServices};
use fishnik_api::bootstrap::config::{Config, PersistenceBackend};
use fishnik_api::infrastructure::crypto::JwtTokenCodec;
use fishnik_api::infrastructure::db;
use fishnik_api::infrastructure::db::repositories::fishnik_repository_sqlx::SqlxFishnikRepository;
use fishnik_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "fishnik_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting fishnik backend");

    let services = match cfg.persistence_backend {
        PersistenceBackend::Postgres => {
            let pool = db::connect_pool(&cfg.database_url).await?;
            db::migrate(&pool).await?;
            AppServices::new(
                Arc::new(SqlxUserRepository::new(pool.clone())),
                Arc::new(SqlxFishnikRepository::new(pool)),
                Arc::new(JwtTokenCodec::new(&cfg.jwt_secret)),
            )
        }
        PersistenceBackend::Memory => {
            tracing::warn!("memory_backend_enabled_data_is_not_persisted");
            AppServices::in_memory(&cfg.jwt_secret)
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);
    let app = fishnik_api::presentation::http::build_router(ctx);

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "ctrl_c_handler_failed");
    }
}
