// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::protocol::{self, Offset};

use super::ServerSystemState;

/// Build the reply to `request`.
///
/// - `version` echoes the request; `mode` is `Server`, stratum 1, no leap warning
/// - `origin_timestamp` is the request's `transmit_timestamp`, copied bit for bit
/// - `receive_timestamp` and `transmit_timestamp` are the server clock readings
///   shifted by `offset`
/// - everything else comes from `system`
pub fn build_reply(
    request: &protocol::Packet,
    system: &ServerSystemState,
    receive_time: protocol::TimestampFormat,
    transmit_time: protocol::TimestampFormat,
    offset: Offset,
) -> protocol::Packet {
    protocol::Packet {
        leap_indicator: protocol::LeapIndicator::NoWarning,
        version: request.version,
        mode: protocol::Mode::Server,
        stratum: protocol::Stratum::PRIMARY,
        poll: system.poll,
        precision: system.precision,
        root_delay: system.root_delay,
        root_dispersion: system.root_dispersion,
        reference_id: system.reference_id,
        reference_timestamp: system.reference_timestamp,
        origin_timestamp: request.transmit_timestamp,
        receive_timestamp: receive_time + offset,
        transmit_timestamp: transmit_time + offset,
    }
}
