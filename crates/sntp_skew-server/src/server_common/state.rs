// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::protocol;

/// Server-wide values copied into every reply.
///
/// Replies always claim stratum 1. The defaults name `GOES` as the reference
/// clock, leave poll, precision, delay and dispersion at zero, and report a
/// reference timestamp of zero (never set).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerSystemState {
    /// Poll interval advertised in replies, in log2 seconds.
    pub poll: i8,
    /// Precision of the server's clock, in log2 seconds.
    pub precision: i8,
    /// Total round-trip delay to the primary reference source.
    pub root_delay: protocol::ShortFormat,
    /// Total dispersion to the primary reference source.
    pub root_dispersion: protocol::ShortFormat,
    /// Reference clock identifier.
    pub reference_id: protocol::ReferenceIdentifier,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: protocol::TimestampFormat,
}

impl Default for ServerSystemState {
    fn default() -> Self {
        ServerSystemState {
            poll: 0,
            precision: 0,
            root_delay: protocol::ShortFormat::default(),
            root_dispersion: protocol::ShortFormat::default(),
            reference_id: protocol::ReferenceIdentifier::GOES,
            reference_timestamp: protocol::TimestampFormat::default(),
        }
    }
}
