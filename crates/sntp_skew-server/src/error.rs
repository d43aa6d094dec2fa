// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for the skewing SNTP server.
//!
//! Public APIs return `io::Result<T>`. Errors are built as [`SntpServerError`]
//! values and converted to `io::Error` through `From<SntpServerError> for
//! io::Error`, so callers that need to match on them can downcast:
//!
//! ```no_run
//! use sntp_server::error::{ConfigError, SntpServerError};
//!
//! # fn example(result: std::io::Result<()>) {
//! if let Err(e) = result {
//!     match e
//!         .get_ref()
//!         .and_then(|inner| inner.downcast_ref::<SntpServerError>())
//!     {
//!         Some(SntpServerError::Config(ConfigError::InvalidOffset { value, .. })) => {
//!             eprintln!("bad offset {value:?}")
//!         }
//!         Some(other) => eprintln!("server error: {other}"),
//!         None => eprintln!("I/O error: {e}"),
//!     }
//! }
//! # }
//! ```

pub use sntp_proto::error::FormatError;

use std::fmt;
use std::io;

/// Errors that can occur while configuring or running the server.
#[derive(Debug)]
pub enum SntpServerError {
    /// A request could not be answered.
    Protocol(ProtocolError),
    /// Invalid configuration (offset, listen address, reference identifier).
    Config(ConfigError),
    /// Underlying I/O error (socket bind, send/recv).
    Io(io::Error),
}

/// Reasons a single request is dropped instead of answered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// The datagram is not a well-formed 48-byte header.
    Malformed(FormatError),
    /// The request carries a mode a server must not answer.
    UnexpectedMode {
        /// The mode value received.
        mode: u8,
    },
}

/// Startup configuration errors. All of them are fatal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// The offset file could not be read.
    OffsetFileUnreadable {
        /// Path of the offset file.
        path: String,
        /// Detail from the underlying I/O error.
        detail: String,
    },
    /// The configured offset is not a usable number of seconds.
    InvalidOffset {
        /// The text that was rejected.
        value: String,
        /// Why it was rejected.
        detail: String,
    },
    /// The listen address could not be resolved.
    InvalidListenAddress {
        /// The address that was invalid.
        address: String,
        /// Detail about why it is invalid.
        detail: String,
    },
    /// The reference identifier is longer than four bytes.
    InvalidReferenceId {
        /// The text that was rejected.
        value: String,
    },
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for SntpServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SntpServerError::Protocol(e) => write!(f, "SNTP protocol error: {e}"),
            SntpServerError::Config(e) => write!(f, "SNTP server config error: {e}"),
            SntpServerError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "malformed request: {e}"),
            ProtocolError::UnexpectedMode { mode } => {
                write!(f, "unexpected request mode: {mode}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OffsetFileUnreadable { path, detail } => {
                write!(f, "cannot read offset file '{path}': {detail}")
            }
            ConfigError::InvalidOffset { value, detail } => {
                write!(f, "invalid offset '{value}': {detail}")
            }
            ConfigError::InvalidListenAddress { address, detail } => {
                write!(f, "invalid listen address '{address}': {detail}")
            }
            ConfigError::InvalidReferenceId { value } => {
                write!(f, "invalid reference identifier '{value}': at most 4 bytes")
            }
        }
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for SntpServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SntpServerError::Protocol(e) => Some(e),
            SntpServerError::Config(e) => Some(e),
            SntpServerError::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Malformed(e) => Some(e),
            ProtocolError::UnexpectedMode { .. } => None,
        }
    }
}

impl std::error::Error for ConfigError {}

// ── From conversions ────────────────────────────────────────────────

impl From<SntpServerError> for io::Error {
    fn from(err: SntpServerError) -> io::Error {
        let kind = match &err {
            SntpServerError::Protocol(_) => io::ErrorKind::InvalidData,
            SntpServerError::Config(ConfigError::OffsetFileUnreadable { .. }) => {
                io::ErrorKind::NotFound
            }
            SntpServerError::Config(_) => io::ErrorKind::InvalidInput,
            SntpServerError::Io(e) => e.kind(),
        };
        if let SntpServerError::Io(e) = err {
            return e;
        }
        io::Error::new(kind, err)
    }
}

impl From<io::Error> for SntpServerError {
    fn from(err: io::Error) -> SntpServerError {
        SntpServerError::Io(err)
    }
}

impl From<ProtocolError> for SntpServerError {
    fn from(err: ProtocolError) -> SntpServerError {
        SntpServerError::Protocol(err)
    }
}

impl From<ConfigError> for SntpServerError {
    fn from(err: ConfigError) -> SntpServerError {
        SntpServerError::Config(err)
    }
}

impl From<FormatError> for ProtocolError {
    fn from(err: FormatError) -> ProtocolError {
        ProtocolError::Malformed(err)
    }
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> io::Error {
        SntpServerError::Config(err).into()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
