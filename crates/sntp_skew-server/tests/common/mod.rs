// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared test helpers for server integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use sntp_server::protocol::{self, ConstPackedSizeBytes, Packet, Version};
use sntp_server::server::SntpServerBuilder;
use tokio::net::UdpSocket;

/// Transmit timestamp carried by every test request.
pub(crate) const CLIENT_TRANSMIT: protocol::TimestampFormat = protocol::TimestampFormat {
    seconds: 0xE000_0000,
    fraction: 0x1234_5678,
};

/// Spawn a test server on an ephemeral loopback port and return its address.
///
/// The server runs in a background tokio task and stops when the runtime is
/// dropped.
pub(crate) async fn spawn_test_server(builder: SntpServerBuilder) -> SocketAddr {
    let server = builder
        .listen("127.0.0.1:0")
        .build()
        .await
        .expect("failed to bind test server");
    let addr = server.local_addr().expect("failed to get local addr");
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

/// Build a minimal NTPv4 client request.
pub(crate) fn build_client_packet() -> [u8; Packet::PACKED_SIZE_BYTES] {
    build_client_packet_version(Version::V4)
}

/// Build a client request with a specific NTP version.
pub(crate) fn build_client_packet_version(version: Version) -> [u8; Packet::PACKED_SIZE_BYTES] {
    protocol::encode(&Packet {
        version,
        transmit_timestamp: CLIENT_TRANSMIT,
        ..Packet::default()
    })
}

/// Send a raw UDP datagram to `addr` and wait for one reply.
///
/// Returns `None` if nothing arrives within `timeout`.
pub(crate) async fn send_receive_raw(
    addr: SocketAddr,
    packet: &[u8],
    timeout: Duration,
) -> Option<Vec<u8>> {
    let sock = UdpSocket::bind("127.0.0.1:0").await.expect("bind failed");
    sock.send_to(packet, addr).await.expect("send failed");

    let mut buf = vec![0u8; 2048];
    match tokio::time::timeout(timeout, sock.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => {
            buf.truncate(len);
            Some(buf)
        }
        _ => None,
    }
}

/// Decode a reply buffer.
pub(crate) fn parse_response(buf: &[u8]) -> Packet {
    protocol::decode(buf).expect("failed to parse response")
}
