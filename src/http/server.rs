//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all gateway handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hold the compiled state (route table + views) behind an atomic swap
//! - Apply hot-reloaded configurations
//! - Serve with graceful shutdown
//!
//! # Design Decisions
//! - One catch-all handler: the rule table, not the framework's router,
//!   decides what a path means
//! - Table and views are one generation, swapped together, so a request
//!   never sees a table from one config and views from another
//! - A bad reload is rejected and logged; the current generation stays live

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::request::{request_id, RequestIdLayer};
use crate::http::response::outcome_response;
use crate::observability::metrics;
use crate::routing::{RouteError, RouteMatch, RouteTable};
use crate::views::{StaticViewEngine, ViewEngine, ViewError};

/// Error type for building the server from a configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// One compiled configuration generation.
pub struct GatewayState {
    pub table: RouteTable,
    pub views: Box<dyn ViewEngine>,
}

impl GatewayState {
    /// Compile a configuration into servable state.
    pub fn compile(config: &GatewayConfig) -> Result<Self, ServerError> {
        let table = RouteTable::compile(&config.routes)?;
        let views = StaticViewEngine::from_config(&config.views)?;
        Ok(Self {
            table,
            views: Box::new(views),
        })
    }
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    shared: Arc<ArcSwap<GatewayState>>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    shared: Arc<ArcSwap<GatewayState>>,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let state = GatewayState::compile(&config)?;
        let shared = Arc::new(ArcSwap::from_pointee(state));

        let router = Self::build_router(&config, AppState {
            shared: shared.clone(),
        });

        Ok(Self {
            router,
            shared,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configurations arriving on `config_updates` are compiled and swapped
    /// in atomically; a config that fails to compile is rejected. The server
    /// drains and stops when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rules = self.shared.load().table.len(),
            "HTTP server starting"
        );

        // Apply reloads off the request path.
        let reload_shutdown = shutdown.resubscribe();
        tokio::spawn(apply_config_updates(
            self.shared.clone(),
            config_updates,
            reload_shutdown,
        ));

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Reload loop: compile each incoming config and swap it in whole.
async fn apply_config_updates(
    shared: Arc<ArcSwap<GatewayState>>,
    mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            update = config_updates.recv() => {
                let Some(config) = update else { break };
                match GatewayState::compile(&config) {
                    Ok(state) => {
                        let rules = state.table.len();
                        shared.store(Arc::new(state));
                        tracing::info!(rules, "Configuration update applied");
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            "Rejected configuration update, keeping current rules"
                        );
                    }
                }
            }
        }
    }
}

/// Gateway handler: match the path against the rule table and answer.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();
    let method_str = method.to_string();
    let path = request.uri().path().to_string();

    let shared = state.shared.load();

    let Some(RouteMatch { rule, outcome }) = shared.table.match_path(&path) else {
        // Pass-through: no rule claims this path.
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "No rule matched"
        );
        metrics::record_request(&method_str, StatusCode::NOT_FOUND.as_u16(), "none", start_time);
        return StatusCode::NOT_FOUND.into_response();
    };

    // Rules describe GET resources; HEAD is GET without a body.
    if method != Method::GET && method != Method::HEAD {
        metrics::record_request(
            &method_str,
            StatusCode::METHOD_NOT_ALLOWED.as_u16(),
            rule,
            start_time,
        );
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let response = outcome_response(outcome, shared.views.as_ref());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        rule = %rule,
        status = %response.status(),
        "Request handled"
    );
    metrics::record_request(&method_str, response.status().as_u16(), rule, start_time);

    response
}
