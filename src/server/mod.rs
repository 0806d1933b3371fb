//! # Local HTTP Print Relay
//!
//! Lets the station front-end print tickets through plain HTTP calls instead
//! of opening printer sockets itself.
//!
//! ## Usage
//!
//! ```bash
//! ticket-relay serve --listen 127.0.0.1:8105 --printer-ip 192.168.192.10
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/health` | Liveness check |
//! | GET | `/api/printer/config/:id` | Default printer configuration |
//! | PUT | `/api/printer/config/:id` | Acknowledged, not stored |
//! | POST | `/api/printer/test/:id` | Connect-only printer probe |
//! | POST | `/api/printer/print/daypass` | Print a day pass |
//! | POST | `/api/printer/print/exitpass` | Print an exit pass |
//!
//! `OPTIONS` on any path answers the CORS preflight. Everything else is a
//! JSON 404.

mod cors;
pub mod handlers;
mod state;

pub use state::{AppState, DEFAULT_PORT, RelayConfig};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::{RelayError, Result};

/// Build the relay's routing table.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        .route(
            "/api/printer/config/:id",
            get(handlers::printer::get_config)
                .put(handlers::printer::update_config)
                .fallback(handlers::not_found),
        )
        .route(
            "/api/printer/test/:id",
            post(handlers::printer::test).fallback(handlers::not_found),
        )
        .route(
            "/api/printer/print/daypass",
            post(handlers::print::day_pass).fallback(handlers::not_found),
        )
        .route(
            "/api/printer/print/exitpass",
            post(handlers::print::exit_pass).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(cors::cors)),
        )
        .with_state(state)
}

/// Observable relay lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStatus {
    Stopped,
    Starting,
    Running,
}

struct RunningRelay {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<()>>,
}

enum Lifecycle {
    Stopped,
    Starting,
    Running(RunningRelay),
}

/// # Print Relay Handle
///
/// Owns the HTTP server for as long as it runs. Dropping a running relay
/// shuts the server down.
///
/// ## Example
///
/// ```no_run
/// use ticket_relay::server::{PrinterRelay, RelayConfig, RelayStatus};
///
/// # async fn example() -> ticket_relay::error::Result<()> {
/// let mut relay = PrinterRelay::new(RelayConfig::with_port(8105));
/// if relay.start().await? == RelayStatus::Running {
///     // serve until the host application exits
/// }
/// relay.stop().await?;
/// # Ok(())
/// # }
/// ```
pub struct PrinterRelay {
    config: RelayConfig,
    lifecycle: Lifecycle,
}

impl PrinterRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Stopped,
        }
    }

    pub fn status(&self) -> RelayStatus {
        match &self.lifecycle {
            Lifecycle::Stopped => RelayStatus::Stopped,
            Lifecycle::Starting => RelayStatus::Starting,
            Lifecycle::Running(running) if running.task.is_finished() => RelayStatus::Stopped,
            Lifecycle::Running(_) => RelayStatus::Running,
        }
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &self.lifecycle {
            Lifecycle::Running(running) if !running.task.is_finished() => Some(running.local_addr),
            _ => None,
        }
    }

    /// Bind the listen address and serve in a background task.
    ///
    /// A port held by another process is not an error: the relay logs it
    /// and stays [`RelayStatus::Stopped`] so the host keeps running.
    pub async fn start(&mut self) -> Result<RelayStatus> {
        if self.status() == RelayStatus::Running {
            info!(addr = ?self.local_addr(), "Printer relay already running");
            return Ok(RelayStatus::Running);
        }

        self.lifecycle = Lifecycle::Starting;
        let addr = self.config.listen_addr.clone();

        let bound = TcpListener::bind(&addr)
            .await
            .and_then(|listener| listener.local_addr().map(|local| (listener, local)));
        let (listener, local_addr) = match bound {
            Ok(bound) => bound,
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                warn!(%addr, "Port already in use, printer relay not started");
                self.lifecycle = Lifecycle::Stopped;
                return Ok(RelayStatus::Stopped);
            }
            Err(e) => {
                self.lifecycle = Lifecycle::Stopped;
                return Err(RelayError::Server(format!("Failed to bind to {}: {}", addr, e)));
            }
        };

        let app = router(Arc::new(AppState::new(self.config.clone())));
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    // A dropped sender also shuts down.
                    let _ = shutdown_rx.await;
                })
                .await
                .map_err(|e| RelayError::Server(e.to_string()))
        });

        info!(%local_addr, printer = %self.config.default_printer.ip, "Printer relay started");
        self.lifecycle = Lifecycle::Running(RunningRelay {
            local_addr,
            shutdown,
            task,
        });
        Ok(RelayStatus::Running)
    }

    /// Stop serving and wait for in-flight requests to finish.
    pub async fn stop(&mut self) -> Result<()> {
        let Lifecycle::Running(running) = std::mem::replace(&mut self.lifecycle, Lifecycle::Stopped)
        else {
            return Ok(());
        };

        let _ = running.shutdown.send(());
        running
            .task
            .await
            .map_err(|e| RelayError::Server(format!("Relay task failed: {}", e)))??;

        info!(addr = %running.local_addr, "Printer relay stopped");
        Ok(())
    }
}
