//! Shared utilities for integration tests.

use std::time::Duration;

use hello_silo::config::HostConfig;
use hello_silo::lifecycle::{self, RunningHost, Shutdown};

/// Config bound to an ephemeral local port.
pub fn test_config() -> HostConfig {
    let mut config = HostConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

/// Start a host and return it with the shutdown handle that stops it.
pub async fn start_host(config: HostConfig) -> (RunningHost, Shutdown) {
    let shutdown = Shutdown::new();
    let host = lifecycle::start(config, &shutdown).await.unwrap();
    (host, shutdown)
}

/// Client that never reuses connections, so shutdown is not held open.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
