//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use envgate::config::GatewayConfig;
use envgate::http::HttpServer;
use envgate::lifecycle::Shutdown;
use tokio::sync::mpsc;

/// A gateway running on an ephemeral port.
///
/// `shutdown` is held so the server's shutdown channel stays open; not every
/// test uses every handle.
#[allow(dead_code)]
pub struct TestGateway {
    pub addr: SocketAddr,
    /// Push configuration updates as the reload channel would.
    pub updates: mpsc::UnboundedSender<GatewayConfig>,
    pub shutdown: Shutdown,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn a gateway with the given configuration.
pub async fn spawn_gateway(config: GatewayConfig) -> TestGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let server = HttpServer::new(config).expect("config should compile");
    tokio::spawn(async move {
        let _ = server.run(listener, update_rx, server_shutdown).await;
    });

    // Give the accept loop a moment to come up.
    tokio::time::sleep(Duration::from_millis(100)).await;

    TestGateway {
        addr,
        updates: update_tx,
        shutdown,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
