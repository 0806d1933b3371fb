//! # Network Printer Transport
//!
//! Sends ESC/POS jobs to a thermal printer's raw TCP port.
//!
//! ## Connection Lifecycle
//!
//! Every job opens its own connection; nothing is pooled or retried.
//!
//! ```text
//! connect ──► write ──► settle ──► drop
//!   │           │          │
//!   │ timeout   │ timeout  ├─ peer closed ........ delivered
//!   │ = error   │ = error  ├─ read error ......... error
//!   ▼           ▼          └─ window elapsed ..... policy
//! ```
//!
//! The connect and write phases share the printer timeout (5s by default).
//! The settle phase is governed by [`SettlePolicy`].

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, info, instrument, warn};

use super::{Delivery, Printer};
use crate::error::{RelayError, Result};
use crate::printer::{PrinterConfig, PrinterTarget};

/// Default timeout for the connect and write phases.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Read buffer for status bytes the printer may send back while settling.
const SETTLE_READ_BUF: usize = 256;

/// # Settle Policy
///
/// What to conclude when a printer neither closes the connection nor errors
/// after receiving a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// How long to wait after the write for the printer to close.
    pub window: Duration,
    /// Whether an elapsed window counts as a delivered job.
    pub assume_delivered_on_post_write_timeout: bool,
}

impl SettlePolicy {
    /// Short window, silence counts as delivered.
    pub const LENIENT: Self = Self {
        window: Duration::from_millis(500),
        assume_delivered_on_post_write_timeout: true,
    };

    /// Full timeout window, silence is a failure.
    pub const STRICT: Self = Self {
        window: Duration::from_millis(5000),
        assume_delivered_on_post_write_timeout: false,
    };
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::LENIENT
    }
}

/// Network printer (TCP port 9100)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
    settle: SettlePolicy,
}

impl NetworkPrinter {
    /// Create a printer for `host:port`.
    ///
    /// The host may be an IP address or a DNS name; it is resolved on every
    /// connect.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(RelayError::InvalidConfig("Printer host is empty".to_string()));
        }
        if port == 0 {
            return Err(RelayError::InvalidConfig(format!(
                "Invalid printer port for {}: 0",
                host
            )));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            timeout: DEFAULT_TIMEOUT,
            settle: SettlePolicy::default(),
        })
    }

    /// Create from a printer configuration, using its timeout.
    pub fn from_config(config: &PrinterConfig) -> Result<Self> {
        Ok(Self::new(&config.ip, config.port)?.with_timeout(config.timeout()))
    }

    /// Create from a per-job target.
    pub fn from_target(target: &PrinterTarget) -> Result<Self> {
        Self::new(&target.ip, target.port)
    }

    /// Set connect/write timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the post-write settle policy
    pub fn with_settle(mut self, settle: SettlePolicy) -> Self {
        self.settle = settle;
        self
    }

    /// `host:port` for log and error messages.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn connect(&self) -> Result<TcpStream> {
        timeout(self.timeout, TcpStream::connect((self.host.as_str(), self.port)))
            .await
            .map_err(|_| RelayError::Timeout(format!("Connection timeout: {}", self.addr())))?
            .map_err(|e| RelayError::Connection(format!("{}: {}", self.addr(), e)))
    }

    async fn settle(&self, stream: &mut TcpStream) -> Result<Delivery> {
        let deadline = Instant::now() + self.settle.window;
        let mut buf = [0u8; SETTLE_READ_BUF];

        loop {
            match timeout_at(deadline, stream.read(&mut buf)).await {
                Ok(Ok(0)) => return Ok(Delivery::PeerClosed),
                Ok(Ok(n)) => debug!(bytes = n, "Discarding printer response"),
                Ok(Err(e)) => return Err(RelayError::Io(e)),
                Err(_) if self.settle.assume_delivered_on_post_write_timeout => {
                    return Ok(Delivery::AssumedAfterTimeout);
                }
                Err(_) => {
                    return Err(RelayError::Timeout(format!(
                        "Printer connection timeout: {}",
                        self.addr()
                    )));
                }
            }
        }
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr(), data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> Result<Delivery> {
        debug!("Connecting to printer");
        let mut stream = self.connect().await?;

        timeout(self.timeout, stream.write_all(data))
            .await
            .map_err(|_| RelayError::Timeout(format!("Write timeout: {}", self.addr())))?
            .map_err(|e| {
                RelayError::Io(std::io::Error::new(e.kind(), format!("Write failed: {}", e)))
            })?;
        stream.flush().await?;

        let delivery = self.settle(&mut stream).await?;
        info!(?delivery, "Print job sent");
        Ok(delivery)
    }

    #[instrument(skip(self), fields(addr = %self.addr()))]
    async fn is_online(&self) -> bool {
        match self.connect().await {
            Ok(_) => {
                info!("Printer online");
                true
            }
            Err(e) => {
                warn!(error = %e, "Printer offline");
                false
            }
        }
    }
}
