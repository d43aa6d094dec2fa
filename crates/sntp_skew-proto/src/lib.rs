// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! SNTP wire codec.
//!
//! This crate provides the packet types and the bit-exact parsing and
//! serialization logic for the fixed 48-byte NTPv4 header (RFC 4330 /
//! RFC 5905), including conversion between real seconds and the 16.16 and
//! 32.32 fixed-point formats used on the wire.
//!
//! # Examples
//!
//! ```
//! use sntp_proto::protocol::{self, Mode, Packet, TimestampFormat};
//!
//! let request = Packet {
//!     transmit_timestamp: TimestampFormat::from_seconds_f64(100.0)?,
//!     ..Packet::default()
//! };
//! let bytes = protocol::encode(&request);
//! let decoded = protocol::decode(&bytes)?;
//! assert_eq!(decoded.mode, Mode::Client);
//! assert_eq!(decoded.transmit_timestamp.as_seconds_f64(), 100.0);
//! # Ok::<(), sntp_proto::error::FormatError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Error type for packet parsing, serialization and fixed-point conversion.
pub mod error;

/// SNTP packet types, the 48-byte codec, and fixed-point arithmetic.
pub mod protocol;

/// Conversion between wall-clock time and NTP timestamps.
pub mod unix_time;
