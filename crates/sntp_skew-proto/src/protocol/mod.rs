// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Packet types and the 48-byte header codec.
//!
//! [`decode`] and [`encode`] are the entry points used by the server. The
//! [`FromBytes`] and [`ToBytes`] traits expose the same codec per field, and the
//! fixed-point types convert to and from real seconds through
//! `from_seconds_f64` / `as_seconds_f64`.
//!
//! Field documentation is largely derived from IETF RFC 5905.

use crate::error::FormatError;

/// Default NTP/SNTP UDP port.
pub const PORT: u16 = 123;

mod bytes;
mod fixed_point;
mod traits;
mod types;

pub use self::fixed_point::Offset;
pub use self::traits::*;
pub use self::types::*;

/// Decode a request or reply from the front of `buf`.
///
/// Only the 48-byte header is read; trailing bytes (extension fields or a MAC)
/// are ignored. Fails with [`FormatError::BufferTooShort`] when fewer than 48
/// bytes are available, and with [`FormatError::InvalidField`] when the
/// reference identifier is not valid text.
pub fn decode(buf: &[u8]) -> Result<Packet, FormatError> {
    let (packet, _) = Packet::from_bytes(buf)?;
    Ok(packet)
}

/// Encode a packet into its 48-byte wire form.
pub fn encode(packet: &Packet) -> [u8; Packet::PACKED_SIZE_BYTES] {
    packet.to_wire()
}
