// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Lock-free server metrics using atomic counters.
//!
//! All counters use relaxed ordering; a snapshot taken while the server is
//! running may mix values from adjacent requests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Runtime server metrics, updated on every request.
///
/// Wrap in `Arc` and pass to
/// [`SntpServerBuilder::metrics()`](crate::server::SntpServerBuilder::metrics).
///
/// ```no_run
/// # async fn example() -> std::io::Result<()> {
/// use std::sync::Arc;
/// use sntp_server::server::SntpServer;
/// use sntp_server::server_common::ServerMetrics;
///
/// let metrics = Arc::new(ServerMetrics::new());
/// let server = SntpServer::builder()
///     .listen("127.0.0.1:1123")
///     .metrics(metrics.clone())
///     .build()
///     .await?;
/// tokio::spawn(server.run());
///
/// let snap = metrics.snapshot();
/// println!("answered {} of {}", snap.responses_sent, snap.requests_received);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ServerMetrics {
    /// Datagrams received, answered or not.
    pub requests_received: AtomicU64,
    /// Replies handed to the socket successfully.
    pub responses_sent: AtomicU64,
    /// Datagrams dropped without a reply (malformed or refused mode).
    pub requests_dropped: AtomicU64,
    /// Replies built but not sent because the socket reported an error.
    pub send_errors: AtomicU64,
}

impl ServerMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            responses_sent: self.responses_sent.load(Ordering::Relaxed),
            requests_dropped: self.requests_dropped.load(Ordering::Relaxed),
            send_errors: self.send_errors.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn inc_requests_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_responses_sent(&self) {
        self.responses_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_requests_dropped(&self) {
        self.requests_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_send_errors(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of server metrics (non-atomic, copyable).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsSnapshot {
    /// Datagrams received, answered or not.
    pub requests_received: u64,
    /// Replies handed to the socket successfully.
    pub responses_sent: u64,
    /// Datagrams dropped without a reply.
    pub requests_dropped: u64,
    /// Replies that failed to send.
    pub send_errors: u64,
}
