use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use service::product::{FileProductRepository, SeaOrmProductRepository};
use service::ProductRepository;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Construct the configured persistence gateway.
///
/// For Postgres a first connection is attempted so problems show up in the log
/// right away, but a failure does not stop startup: requests get 500 until the
/// database answers.
pub async fn build_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
    match cfg.storage.backend {
        StorageBackend::Postgres => {
            let repo = SeaOrmProductRepository::new(cfg.database.clone());
            if let Err(e) = repo.connection().await {
                error!(error = %e, "cannot reach product store at startup; continuing");
            }
            Ok(Arc::new(repo))
        }
        StorageBackend::File => {
            let repo = FileProductRepository::open(&cfg.storage.file_path).await?;
            info!(path = %cfg.storage.file_path, "using file product store");
            Ok(Arc::new(repo))
        }
    }
}

/// Router with the given gateway injected.
pub fn build_app(repo: Arc<dyn ProductRepository>) -> Router {
    routes::build_router(AppState::new(repo), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Build the app from `cfg` and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg).await?;
    let app = build_app(repo);

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
