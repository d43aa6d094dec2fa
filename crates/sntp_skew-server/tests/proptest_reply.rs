// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use sntp_server::protocol::{self, Mode, Offset, Packet, TimestampFormat, Version};
use sntp_server::server_common::{HandleResult, ServerSystemState, build_reply, handle_request};

fn arb_timestamp() -> impl Strategy<Value = TimestampFormat> {
    (any::<u32>(), any::<u32>()).prop_map(|(seconds, fraction)| TimestampFormat { seconds, fraction })
}

proptest! {
    /// The origin timestamp is always the request's transmit timestamp, and
    /// both server timestamps move by exactly the offset.
    #[test]
    fn reply_echoes_origin_and_applies_offset(
        request_tx in arb_timestamp(),
        t2 in arb_timestamp(),
        t3 in arb_timestamp(),
        offset_units in any::<i64>(),
        vn in 0u8..8,
    ) {
        let request = Packet {
            version: Version::new(vn).unwrap(),
            transmit_timestamp: request_tx,
            ..Packet::default()
        };
        let offset = Offset::from_raw(offset_units);
        let reply = build_reply(&request, &ServerSystemState::default(), t2, t3, offset);

        prop_assert_eq!(reply.origin_timestamp, request_tx);
        prop_assert_eq!(reply.version, request.version);
        prop_assert_eq!(reply.mode, Mode::Server);
        prop_assert_eq!(
            reply.receive_timestamp.to_bits(),
            t2.to_bits().wrapping_add(offset_units as u64)
        );
        prop_assert_eq!(
            reply.transmit_timestamp.to_bits(),
            t3.to_bits().wrapping_add(offset_units as u64)
        );
    }

    /// Random datagrams never panic the pipeline, and anything answered is a
    /// well-formed server reply.
    #[test]
    fn pipeline_handles_arbitrary_datagrams(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
        let src = "127.0.0.1:40000".parse().unwrap();
        let result = handle_request(
            &bytes,
            src,
            &ServerSystemState::default(),
            Offset::ZERO,
            TimestampFormat::default(),
            None,
        );
        if let HandleResult::Response(buf) = result {
            prop_assert!(bytes.len() >= 48);
            let reply = protocol::decode(&buf).unwrap();
            prop_assert_eq!(reply.mode, Mode::Server);
            prop_assert_eq!(&buf[24..32], &bytes[40..48]);
        }
    }
}
