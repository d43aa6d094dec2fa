// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;

use log::debug;

use crate::protocol::{self, ConstPackedSizeBytes, Offset};
use crate::unix_time;

use super::{ServerMetrics, ServerSystemState, build_reply, validate_request};

/// The outcome of handling one datagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HandleResult {
    /// Send this reply to the sender.
    Response([u8; protocol::Packet::PACKED_SIZE_BYTES]),
    /// Send nothing.
    Drop,
}

/// Handle a single incoming datagram (pure logic, no I/O).
///
/// `receive_time` is the unskewed server clock reading taken when the
/// datagram arrived. The transmit time is read here, after the reply is
/// assembled, so it sits as close to the send as possible. Malformed
/// datagrams and refused modes are dropped without a reply.
///
/// Counts `requests_received` and `requests_dropped`; the caller counts
/// `responses_sent` once the reply has actually gone out.
pub fn handle_request(
    recv_buf: &[u8],
    src_addr: SocketAddr,
    system: &ServerSystemState,
    offset: Offset,
    receive_time: protocol::TimestampFormat,
    metrics: Option<&ServerMetrics>,
) -> HandleResult {
    if let Some(m) = metrics {
        m.inc_requests_received();
    }

    let request = match validate_request(recv_buf) {
        Ok(request) => request,
        Err(e) => {
            debug!("dropping request from {}: {}", src_addr, e);
            if let Some(m) = metrics {
                m.inc_requests_dropped();
            }
            return HandleResult::Drop;
        }
    };

    let transmit_time: protocol::TimestampFormat = unix_time::Instant::now().into();
    let reply = build_reply(&request, system, receive_time, transmit_time, offset);
    debug!(
        "replying to {} ({:?} v{}) with transmit {}.{:08x}",
        src_addr,
        request.mode,
        request.version.value(),
        reply.transmit_timestamp.seconds,
        reply.transmit_timestamp.fraction
    );

    HandleResult::Response(protocol::encode(&reply))
}
