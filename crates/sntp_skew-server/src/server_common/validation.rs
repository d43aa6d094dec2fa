// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::error::ProtocolError;
use crate::protocol;

/// Decode an incoming request and decide whether it may be answered.
///
/// Only the 48-byte header is checked; version, stratum and timestamps are
/// taken as they come. Replies from other servers (`Server` mode) and
/// broadcasts are refused so two servers cannot answer each other forever.
pub fn validate_request(recv_buf: &[u8]) -> Result<protocol::Packet, ProtocolError> {
    let request = protocol::decode(recv_buf)?;

    match request.mode {
        protocol::Mode::Server | protocol::Mode::Broadcast => {
            Err(ProtocolError::UnexpectedMode {
                mode: request.mode as u8,
            })
        }
        _ => Ok(request),
    }
}
