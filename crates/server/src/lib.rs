mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use santa_core::Tracker;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub use routes::{FEED_STATUS_HEADER, create_router};

/// Overlay server running on the current tokio runtime
pub struct OverlayServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl OverlayServer {
    pub async fn start(addr: SocketAddr, tracker: Arc<Tracker>) -> Result<Self, std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let app = create_router(tracker);

        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;

            if let Err(e) = served {
                tracing::error!("overlay server stopped: {e}");
            }
        });

        tracing::info!("serving overlay on http://{addr}");

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.handle).await;
    }
}

impl Drop for OverlayServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
