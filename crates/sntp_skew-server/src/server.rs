// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! SNTP server using the Tokio runtime.
//!
//! The server binds one IPv4 UDP socket and handles datagrams strictly one
//! at a time: receive, build the reply, send, repeat. Nothing is queued
//! beyond the kernel's receive buffer.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use sntp_server::protocol::{Offset, ReferenceIdentifier};
//! use sntp_server::server::SntpServer;
//!
//! let server = SntpServer::builder()
//!     .listen("127.0.0.1:123")
//!     .offset(Offset::from_seconds_f64(3600.0)?)
//!     .reference_id(ReferenceIdentifier::GPS)
//!     .build()
//!     .await?;
//!
//! server.run().await
//! # }
//! ```

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::net::UdpSocket;

use crate::error::ConfigError;
use crate::protocol::{self, Offset};
use crate::server_common::{HandleResult, ServerMetrics, ServerSystemState, handle_request};
use crate::unix_time;

// Large enough for a header plus extension fields; longer datagrams are
// truncated by the socket and the header is still read.
const RECV_BUFFER_SIZE: usize = 2048;

/// Builder for configuring and creating an [`SntpServer`].
#[derive(Debug)]
pub struct SntpServerBuilder {
    listen_addr: String,
    offset: Offset,
    system_state: ServerSystemState,
    metrics: Option<Arc<ServerMetrics>>,
}

impl SntpServerBuilder {
    fn new() -> Self {
        SntpServerBuilder {
            listen_addr: crate::DEFAULT_LISTEN_ADDR.to_string(),
            offset: Offset::ZERO,
            system_state: ServerSystemState::default(),
            metrics: None,
        }
    }

    /// Set the listen address (`host:port`). Defaults to `127.0.0.1:123`.
    ///
    /// Host names are resolved when the server is built; the first IPv4
    /// address is used.
    pub fn listen(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set the skew added to the receive and transmit timestamps of every
    /// reply. Defaults to zero.
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Set the reference identifier advertised in replies. Defaults to `GOES`.
    pub fn reference_id(mut self, reference_id: protocol::ReferenceIdentifier) -> Self {
        self.system_state.reference_id = reference_id;
        self
    }

    /// Set the advertised clock precision in log2 seconds. Defaults to 0.
    pub fn precision(mut self, precision: i8) -> Self {
        self.system_state.precision = precision;
        self
    }

    /// Set the advertised poll interval in log2 seconds. Defaults to 0.
    pub fn poll(mut self, poll: i8) -> Self {
        self.system_state.poll = poll;
        self
    }

    /// Set the advertised root delay.
    pub fn root_delay(mut self, delay: protocol::ShortFormat) -> Self {
        self.system_state.root_delay = delay;
        self
    }

    /// Set the advertised root dispersion.
    pub fn root_dispersion(mut self, dispersion: protocol::ShortFormat) -> Self {
        self.system_state.root_dispersion = dispersion;
        self
    }

    /// Attach metrics counters, shared with the caller.
    pub fn metrics(mut self, metrics: Arc<ServerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Resolve the listen address and bind the socket.
    ///
    /// Fails with [`ConfigError::InvalidListenAddress`] (as an `io::Error` of
    /// kind `InvalidInput`) when the address does not resolve to IPv4, and
    /// with the socket's own error when the bind fails.
    pub async fn build(self) -> io::Result<SntpServer> {
        let addr = resolve_ipv4(&self.listen_addr).await?;
        let sock = UdpSocket::bind(addr).await?;
        info!(
            "SNTP server listening on {} (offset {}, reference {})",
            sock.local_addr()?,
            self.offset,
            self.system_state.reference_id
        );

        Ok(SntpServer {
            sock,
            offset: self.offset,
            system_state: self.system_state,
            metrics: self.metrics,
        })
    }
}

async fn resolve_ipv4(listen_addr: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = |detail: String| ConfigError::InvalidListenAddress {
        address: listen_addr.to_string(),
        detail,
    };
    let mut addrs = tokio::net::lookup_host(listen_addr)
        .await
        .map_err(|e| invalid(e.to_string()))?;
    addrs
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| invalid("no IPv4 address".to_string()))
}

/// An SNTP server that answers every request with skewed timestamps.
///
/// Created via [`SntpServer::builder()`]. Call [`run()`](SntpServer::run) to
/// start serving.
#[derive(Debug)]
pub struct SntpServer {
    sock: UdpSocket,
    offset: Offset,
    system_state: ServerSystemState,
    metrics: Option<Arc<ServerMetrics>>,
}

impl SntpServer {
    /// Create a builder for configuring the server.
    pub fn builder() -> SntpServerBuilder {
        SntpServerBuilder::new()
    }

    /// The offset applied to replies.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// The values copied into every reply.
    pub fn system_state(&self) -> &ServerSystemState {
        &self.system_state
    }

    /// Get the attached metrics instance, if any.
    pub fn metrics(&self) -> Option<&Arc<ServerMetrics>> {
        self.metrics.as_ref()
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.sock.local_addr()
    }

    /// Serve requests until receiving from the socket fails.
    ///
    /// A failed send is logged and the loop moves on to the next request.
    pub async fn run(self) -> io::Result<()> {
        let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

        loop {
            let (recv_len, src_addr) = self.sock.recv_from(&mut recv_buf).await?;
            let receive_time: protocol::TimestampFormat = unix_time::Instant::now().into();

            let result = handle_request(
                &recv_buf[..recv_len],
                src_addr,
                &self.system_state,
                self.offset,
                receive_time,
                self.metrics.as_deref(),
            );

            match result {
                HandleResult::Response(resp_buf) => {
                    match self.sock.send_to(&resp_buf, src_addr).await {
                        Ok(_) => {
                            if let Some(m) = &self.metrics {
                                m.inc_responses_sent();
                            }
                        }
                        Err(e) => {
                            warn!("failed to send reply to {}: {}", src_addr, e);
                            if let Some(m) = &self.metrics {
                                m.inc_send_errors();
                            }
                        }
                    }
                }
                HandleResult::Drop => {
                    debug!("dropped {} byte datagram from {}", recv_len, src_addr);
                }
            }
        }
    }
}
