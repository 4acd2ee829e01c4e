use std::{env, net::SocketAddr, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::store::RecordStore;

use crate::routes;

/// How long in-flight requests get to finish after an interrupt.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or the `PORT` env var, with fallbacks.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let port = env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            ("0.0.0.0".to_string(), port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app, run the HTTP server, shut down
/// gracefully on interrupt. A bind failure is fatal.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let store = RecordStore::new();
    let app: Router = routes::build_router(store, build_cors());

    let addr = load_bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::signal::ctrl_c().await?;
    info!("shutting down the server");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(joined) => joined??,
        Err(_) => warn!("grace period elapsed with requests in flight, forcing exit"),
    }

    info!("server gracefully stopped");
    Ok(())
}
