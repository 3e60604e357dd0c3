use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::http::connection::Connection;
use crate::site::Site;

/// Pause after a failed accept, so persistent errors such as EMFILE do not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Owns the listening socket and spawns one task per accepted connection.
///
/// Dropping the listener closes the socket.
pub struct Listener {
    inner: TcpListener,
    site: Arc<Site>,
}

impl Listener {
    pub async fn bind(addr: SocketAddr, site: Arc<Site>) -> anyhow::Result<Self> {
        let inner = TcpListener::bind(addr).await?;
        info!(address = %inner.local_addr()?, root = %site.resolver.root().display(), "Listening");

        Ok(Self { inner, site })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Accepts connections forever.
    pub async fn run(&self) {
        loop {
            let (socket, peer) = match self.inner.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(error = %e, "Accept failed");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };
            tracing::debug!(%peer, "Accepted connection");

            let site = Arc::clone(&self.site);
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, peer, site);
                if let Err(e) = conn.run().await {
                    tracing::debug!(%peer, error = %e, "Connection dropped");
                }
            });
        }
    }

    /// Accepts connections until `shutdown` resolves, then closes the socket.
    ///
    /// Connections already accepted keep running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            _ = self.run() => {}
            _ = shutdown => {
                info!("Shutdown signal received");
            }
        }
    }
}
