use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use hello_silo::config::resolve_config;
use hello_silo::lifecycle::{self, shutdown_signal, Shutdown};
use hello_silo::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "hello-silo")]
#[command(about = "HTTP API host for HelloGrain", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    // Logging is configured by this file, so errors here go to stderr.
    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability)?;
    tracing::info!("hello-silo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        cluster_id = %config.silo.cluster_id,
        service_id = %config.silo.service_id,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
            return Err(e.into());
        }
    }

    let shutdown = Shutdown::new();
    let host = match lifecycle::start(config, &shutdown).await {
        Ok(host) => host,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.trigger();
    });

    if let Err(e) = host.wait().await {
        tracing::error!(error = %e, "HTTP server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
