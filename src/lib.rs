//! envgate — environment-namespace gateway.
//!
//! Serves the welcome page for the `/dev` and `/stg` namespaces, strips
//! those prefixes off every other path under them with a 302 redirect, and
//! answers load-balancer health probes at `/health`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
