// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! SNTP server that answers every request with timestamps skewed by a fixed
//! offset.
//!
//! Point a time client at it to see how the client copes with a server whose
//! clock is wrong by a known amount. The server is stateless: each reply is
//! built from the request, the local clock and the configured
//! [`Offset`](protocol::Offset).
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use sntp_server::protocol::Offset;
//! use sntp_server::server::SntpServer;
//!
//! let server = SntpServer::builder()
//!     .listen("127.0.0.1:1123")
//!     .offset(Offset::from_seconds_f64(-5.0)?)
//!     .build()
//!     .await?;
//!
//! server.run().await
//! # }
//! ```

#![warn(missing_docs)]

// Re-export protocol types from sntp_proto for convenience.
pub use sntp_proto::{protocol, unix_time};

/// Offset configuration loaded at startup.
pub mod config;

/// Error types for server operations.
pub mod error;

/// Reply construction and the per-request pipeline.
pub mod server_common;

/// SNTP server using the Tokio runtime.
pub mod server;

/// Default listen address: the loopback interface on the standard SNTP port.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:123";
