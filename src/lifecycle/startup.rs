//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned to the caller
//! - The silo exists before the listener accepts traffic
//! - `RunningHost::wait` stops the silo only after HTTP has drained

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::HostConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::silo::Silo;

/// A host that is accepting requests.
pub struct RunningHost {
    pub local_addr: SocketAddr,
    pub silo: Arc<Silo>,
    server: JoinHandle<std::io::Result<()>>,
}

impl RunningHost {
    /// Wait for the HTTP server to stop, then stop the silo.
    pub async fn wait(self) -> std::io::Result<()> {
        let served = match self.server.await {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e)),
        };
        self.silo.shutdown().await;
        served
    }
}

/// Start the silo and the HTTP server; the server stops when `shutdown` fires.
pub async fn start(config: HostConfig, shutdown: &Shutdown) -> std::io::Result<RunningHost> {
    let silo = Arc::new(Silo::new(config.silo.clone()));

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return Err(e);
        }
    };
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config, silo.clone());
    let server = tokio::spawn(server.run(listener, shutdown.subscribe()));

    Ok(RunningHost {
        local_addr,
        silo,
        server,
    })
}
