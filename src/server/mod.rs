//! Read-only data endpoint serving the card kinds.
//!
//! - `GET /api/images`: `200` with `[{id, label, url}, ...]` or `500` with
//!   `{"error": ...}`
//! - `GET /health`: `200 ok`

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::provider::DeckProvider;

pub mod routes;

pub use routes::create_routes;

/// Serve the endpoint on `addr` until Ctrl-C.
pub async fn serve<P>(addr: SocketAddr, provider: P) -> std::io::Result<()>
where
    P: DeckProvider + Send + Sync + 'static,
{
    let app = create_routes(Arc::new(provider));

    info!(%addr, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("received shutdown signal");
}
