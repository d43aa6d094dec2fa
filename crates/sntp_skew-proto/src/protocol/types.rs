// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use crate::error::FormatError;

use super::ConstPackedSizeBytes;

/// **NTP Short Format** (16.16 fixed point), used for root delay and root
/// dispersion.
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Seconds              |           Fraction            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The fraction counts units of 2^-16 seconds, so `{ seconds: 1, fraction:
/// 0x8000 }` is 1.5 s.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShortFormat {
    /// Whole seconds (16-bit unsigned).
    pub seconds: u16,
    /// Fractional seconds in units of 2^-16 s.
    pub fraction: u16,
}

/// **NTP Timestamp Format** (32.32 fixed point), seconds since the prime epoch
/// 1900-01-01 00:00:00 UTC.
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Seconds                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Fraction                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The 32-bit seconds field wraps every 2^32 seconds (one NTP era, ~136 years).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampFormat {
    /// Whole seconds since 1900-01-01 00:00:00 UTC.
    pub seconds: u32,
    /// Fractional seconds in units of 2^-32 s (~232 picoseconds).
    pub fraction: u32,
}

/// A 2-bit warning of an impending leap second in the last minute of the
/// current day.
///
/// Every 2-bit value has a variant, so any packed byte decodes.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No leap required.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    AddOne = 1,
    /// Last minute of the day has 59 seconds.
    SubOne = 2,
    /// Alarm condition: clock unsynchronized.
    Unknown = 3,
}

impl TryFrom<u8> for LeapIndicator {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LeapIndicator::NoWarning),
            1 => Ok(LeapIndicator::AddOne),
            2 => Ok(LeapIndicator::SubOne),
            3 => Ok(LeapIndicator::Unknown),
            _ => Err(()),
        }
    }
}

/// A 3-bit protocol version number.
///
/// Construct through the associated constants or [`Version::new`]; both keep
/// the value within 3 bits so it always packs into the header.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(pub(super) u8);

/// A 3-bit association mode.
///
/// All eight values are defined, including the reserved ones, so mode bits
/// `111` decode to [`Mode::ReservedForPrivateUse`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Reserved (0).
    Reserved = 0,
    /// Symmetric active (1).
    SymmetricActive = 1,
    /// Symmetric passive (2).
    SymmetricPassive = 2,
    /// Client (3).
    #[default]
    Client = 3,
    /// Server (4).
    Server = 4,
    /// Broadcast (5).
    Broadcast = 5,
    /// NTP control message (6).
    NtpControlMessage = 6,
    /// Reserved for private use (7).
    ReservedForPrivateUse = 7,
}

impl TryFrom<u8> for Mode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Reserved),
            1 => Ok(Mode::SymmetricActive),
            2 => Ok(Mode::SymmetricPassive),
            3 => Ok(Mode::Client),
            4 => Ok(Mode::Server),
            5 => Ok(Mode::Broadcast),
            6 => Ok(Mode::NtpControlMessage),
            7 => Ok(Mode::ReservedForPrivateUse),
            _ => Err(()),
        }
    }
}

/// An 8-bit stratum: the distance in hops from a reference clock.
///
/// ```ignore
/// +--------+-----------------------------------------------------+
/// | Value  | Meaning                                             |
/// +--------+-----------------------------------------------------+
/// | 0      | unspecified or invalid (kiss-o'-death)              |
/// | 1      | primary server (e.g., equipped with a GPS receiver) |
/// | 2-15   | secondary server (via NTP)                          |
/// | 16     | unsynchronized                                      |
/// | 17-255 | reserved                                            |
/// +--------+-----------------------------------------------------+
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stratum(pub u8);

/// The 4-byte reference identifier, carried as a text token.
///
/// At stratum 1 this is the left-justified, NUL-padded ASCII name of the
/// reference clock (`GOES`, `GPS\0`, ...); at stratum 0 it is a kiss code.
/// The bytes are always valid UTF-8: [`ReferenceIdentifier::from_text`] and
/// [`ReferenceIdentifier::from_wire`] reject anything else.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ReferenceIdentifier([u8; 4]);

/// **Packet Header** - the 48-byte NTPv4 header exchanged by SNTP clients and
/// servers.
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |LI | VN  |Mode |    Stratum     |     Poll      |  Precision   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Delay                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Dispersion                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          Reference ID                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                     Reference Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Origin Timestamp (64)                    +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Receive Timestamp (64)                   +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Transmit Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Fields hold their wire representation, so a decoded packet re-encodes to
/// the exact bytes it was decoded from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Leap indicator warning of impending leap second.
    pub leap_indicator: LeapIndicator,
    /// Protocol version number.
    pub version: Version,
    /// Association mode.
    pub mode: Mode,
    /// Stratum level of the time source.
    pub stratum: Stratum,
    /// Maximum interval between successive messages, in log2 seconds.
    pub poll: i8,
    /// Precision of the system clock, in log2 seconds (-20 is about one
    /// microsecond).
    pub precision: i8,
    /// Total round-trip delay to the reference clock.
    pub root_delay: ShortFormat,
    /// Total dispersion to the reference clock.
    pub root_dispersion: ShortFormat,
    /// Reference identifier (clock source name or kiss code).
    pub reference_id: ReferenceIdentifier,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: TimestampFormat,
    /// Client time when the request departed for the server (T1).
    pub origin_timestamp: TimestampFormat,
    /// Server time when the request arrived (T2).
    pub receive_timestamp: TimestampFormat,
    /// Sender time when the packet departed (T1 in requests, T3 in replies).
    pub transmit_timestamp: TimestampFormat,
}

/// The fields packed into the first header byte.
pub type PacketByte1 = (LeapIndicator, Version, Mode);

// Inherent implementations.

impl ReferenceIdentifier {
    /// Geosynchronous Orbit Environment Satellite.
    pub const GOES: Self = ReferenceIdentifier(*b"GOES");
    /// Global Positioning System.
    pub const GPS: Self = ReferenceIdentifier(*b"GPS\0");
    /// Uncalibrated local clock.
    pub const LOCL: Self = ReferenceIdentifier(*b"LOCL");
    /// Kiss code: access denied.
    pub const DENY: Self = ReferenceIdentifier(*b"DENY");
    /// Kiss code: access restricted.
    pub const RSTR: Self = ReferenceIdentifier(*b"RSTR");
    /// Kiss code: reduce the polling rate.
    pub const RATE: Self = ReferenceIdentifier(*b"RATE");

    /// Build an identifier from text of at most 4 bytes.
    ///
    /// Shorter text is left-justified and NUL-padded (`"GPS"` becomes
    /// `b"GPS\0"`). Longer text fails with [`FormatError::InvalidField`], whose
    /// value is the text length in bytes.
    pub fn from_text(text: &str) -> Result<Self, FormatError> {
        let raw = text.as_bytes();
        if raw.len() > Self::PACKED_SIZE_BYTES {
            return Err(FormatError::InvalidField {
                field: "reference identifier",
                value: raw.len() as u32,
            });
        }
        let mut bytes = [0u8; 4];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(ReferenceIdentifier(bytes))
    }

    /// Validate 4 raw wire bytes as text.
    pub fn from_wire(bytes: [u8; 4]) -> Result<Self, FormatError> {
        match core::str::from_utf8(&bytes) {
            Ok(_) => Ok(ReferenceIdentifier(bytes)),
            Err(_) => Err(FormatError::InvalidField {
                field: "reference identifier",
                value: u32::from_be_bytes(bytes),
            }),
        }
    }

    /// Returns the raw 4-byte representation.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Returns the identifier text with trailing NUL padding removed.
    pub fn as_text(&self) -> &str {
        let len = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        // Valid UTF-8 by construction; a NUL never splits a multi-byte sequence.
        core::str::from_utf8(&self.0[..len]).unwrap_or_default()
    }

    /// Returns true for the `DENY`, `RSTR` and `RATE` kiss codes.
    pub fn is_kiss_of_death(&self) -> bool {
        matches!(*self, Self::DENY | Self::RSTR | Self::RATE)
    }
}

impl Version {
    /// NTP version 1.
    pub const V1: Self = Version(1);
    /// NTP version 2.
    pub const V2: Self = Version(2);
    /// NTP version 3.
    pub const V3: Self = Version(3);
    /// NTP version 4 (current standard).
    pub const V4: Self = Version(4);

    /// Create a `Version` from a raw version number.
    ///
    /// Returns `None` if the value does not fit the 3-bit field.
    pub fn new(v: u8) -> Option<Self> {
        if v <= 0b111 { Some(Version(v)) } else { None }
    }

    /// Returns the raw version number.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether the version is one of the published NTP versions (1-4).
    pub fn is_known(&self) -> bool {
        (1..=4).contains(&self.0)
    }
}

impl Stratum {
    /// Unspecified or invalid.
    pub const UNSPECIFIED: Self = Stratum(0);
    /// A primary server, synchronized to a reference clock.
    pub const PRIMARY: Self = Stratum(1);
    /// An unsynchronized server.
    pub const UNSYNCHRONIZED: Self = Stratum(16);
}

// Size implementations.

impl ConstPackedSizeBytes for ShortFormat {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for TimestampFormat {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for Stratum {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for ReferenceIdentifier {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for PacketByte1 {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for Packet {
    const PACKED_SIZE_BYTES: usize = PacketByte1::PACKED_SIZE_BYTES
        + Stratum::PACKED_SIZE_BYTES
        + 2
        + ShortFormat::PACKED_SIZE_BYTES * 2
        + ReferenceIdentifier::PACKED_SIZE_BYTES
        + TimestampFormat::PACKED_SIZE_BYTES * 4;
}

// Default implementations.

impl Default for Version {
    fn default() -> Self {
        Version::V4
    }
}

impl Default for ReferenceIdentifier {
    /// Four NUL bytes (an unset identifier).
    fn default() -> Self {
        ReferenceIdentifier([0; 4])
    }
}

impl Default for Packet {
    /// An NTPv4 client request template with every timestamp zeroed.
    fn default() -> Self {
        Packet {
            leap_indicator: LeapIndicator::default(),
            version: Version::default(),
            mode: Mode::default(),
            stratum: Stratum::default(),
            poll: 0,
            precision: 0,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: ReferenceIdentifier::default(),
            reference_timestamp: TimestampFormat::default(),
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat::default(),
        }
    }
}

// Display implementations.

impl fmt::Display for ReferenceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_text())
    }
}
