// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use byteorder::{BE, ByteOrder};

use crate::error::FormatError;

use super::{
    ConstPackedSizeBytes, FromBytes, LeapIndicator, Mode, Packet, ReferenceIdentifier,
    ShortFormat, Stratum, TimestampFormat, ToBytes, Version,
};

fn check_len(buf: &[u8], needed: usize) -> Result<(), FormatError> {
    if buf.len() < needed {
        return Err(FormatError::BufferTooShort {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

// Reader implementations.

impl FromBytes for ShortFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        let seconds = BE::read_u16(&buf[0..2]);
        let fraction = BE::read_u16(&buf[2..4]);
        Ok((ShortFormat { seconds, fraction }, Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        let seconds = BE::read_u32(&buf[0..4]);
        let fraction = BE::read_u32(&buf[4..8]);
        Ok((
            TimestampFormat { seconds, fraction },
            Self::PACKED_SIZE_BYTES,
        ))
    }
}

impl FromBytes for Stratum {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        Ok((Stratum(buf[0]), Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for (LeapIndicator, Version, Mode) {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        let li_vn_mode = buf[0];
        let li_u8 = li_vn_mode >> 6;
        let vn_u8 = (li_vn_mode >> 3) & 0b111;
        let mode_u8 = li_vn_mode & 0b111;
        let li = LeapIndicator::try_from(li_u8).map_err(|_| FormatError::InvalidField {
            field: "leap indicator",
            value: li_u8 as u32,
        })?;
        let vn = Version(vn_u8);
        let mode = Mode::try_from(mode_u8).map_err(|_| FormatError::InvalidField {
            field: "association mode",
            value: mode_u8 as u32,
        })?;
        Ok(((li, vn, mode), Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for ReferenceIdentifier {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        let id = ReferenceIdentifier::from_wire([buf[0], buf[1], buf[2], buf[3]])?;
        Ok((id, Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for Packet {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;

        let mut offset = 0;

        let ((leap_indicator, version, mode), n) =
            <(LeapIndicator, Version, Mode)>::from_bytes(&buf[offset..])?;
        offset += n;

        let (stratum, n) = Stratum::from_bytes(&buf[offset..])?;
        offset += n;

        let poll = buf[offset] as i8;
        offset += 1;

        let precision = buf[offset] as i8;
        offset += 1;

        let (root_delay, n) = ShortFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (root_dispersion, n) = ShortFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (reference_id, n) = ReferenceIdentifier::from_bytes(&buf[offset..])?;
        offset += n;

        let (reference_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (origin_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (receive_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (transmit_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        Ok((
            Packet {
                leap_indicator,
                version,
                mode,
                stratum,
                poll,
                precision,
                root_delay,
                root_dispersion,
                reference_id,
                reference_timestamp,
                origin_timestamp,
                receive_timestamp,
                transmit_timestamp,
            },
            offset,
        ))
    }
}

// Writer implementations.

impl ShortFormat {
    fn write_be(&self, buf: &mut [u8]) {
        BE::write_u16(&mut buf[0..2], self.seconds);
        BE::write_u16(&mut buf[2..4], self.fraction);
    }
}

impl TimestampFormat {
    fn write_be(&self, buf: &mut [u8]) {
        BE::write_u32(&mut buf[0..4], self.seconds);
        BE::write_u32(&mut buf[4..8], self.fraction);
    }
}

impl Packet {
    /// Serialize into the 48-byte wire form.
    ///
    /// Infallible: every field type is limited to its wire width.
    pub fn to_wire(&self) -> [u8; Packet::PACKED_SIZE_BYTES] {
        let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
        buf[0] = pack_li_vn_mode(self.leap_indicator, self.version, self.mode);
        buf[1] = self.stratum.0;
        buf[2] = self.poll as u8;
        buf[3] = self.precision as u8;
        self.root_delay.write_be(&mut buf[4..8]);
        self.root_dispersion.write_be(&mut buf[8..12]);
        buf[12..16].copy_from_slice(&self.reference_id.as_bytes());
        self.reference_timestamp.write_be(&mut buf[16..24]);
        self.origin_timestamp.write_be(&mut buf[24..32]);
        self.receive_timestamp.write_be(&mut buf[32..40]);
        self.transmit_timestamp.write_be(&mut buf[40..48]);
        buf
    }
}

fn pack_li_vn_mode(li: LeapIndicator, vn: Version, mode: Mode) -> u8 {
    ((li as u8) << 6) | ((vn.0 & 0b111) << 3) | (mode as u8)
}

impl ToBytes for ShortFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        self.write_be(buf);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        self.write_be(buf);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for Stratum {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        buf[0] = self.0;
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for (LeapIndicator, Version, Mode) {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        let (li, vn, mode) = *self;
        buf[0] = pack_li_vn_mode(li, vn, mode);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for ReferenceIdentifier {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        buf[..4].copy_from_slice(&self.as_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for Packet {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        buf[..Self::PACKED_SIZE_BYTES].copy_from_slice(&self.to_wire());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn make_test_packet() -> Packet {
        Packet {
            leap_indicator: LeapIndicator::NoWarning,
            version: Version::V4,
            mode: Mode::Client,
            stratum: Stratum::UNSPECIFIED,
            poll: 6,
            precision: -20,
            root_delay: ShortFormat {
                seconds: 1,
                fraction: 0x8000,
            },
            root_dispersion: ShortFormat {
                seconds: 0,
                fraction: 0x4000,
            },
            reference_id: ReferenceIdentifier::default(),
            reference_timestamp: TimestampFormat {
                seconds: 3_913_056_000,
                fraction: 0,
            },
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat {
                seconds: 3_913_056_001,
                fraction: 0x1234_5678,
            },
        }
    }

    #[test]
    fn li_vn_mode_packs_msb_first() {
        let mut buf = [0u8; 1];
        (LeapIndicator::AddOne, Version::V4, Mode::Client)
            .to_bytes(&mut buf)
            .unwrap();
        assert_eq!(buf[0], 0b01_100_011);
        assert_eq!(buf[0], 0x63);
    }

    #[test]
    fn li_vn_mode_unpacks() {
        let ((li, vn, mode), n) = <(LeapIndicator, Version, Mode)>::from_bytes(&[0xE4]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(li, LeapIndicator::Unknown);
        assert_eq!(vn, Version::V4);
        assert_eq!(mode, Mode::Server);
    }

    #[test]
    fn mode_bits_111_are_reserved_for_private_use() {
        let ((_, _, mode), _) = <(LeapIndicator, Version, Mode)>::from_bytes(&[0x27]).unwrap();
        assert_eq!(mode, Mode::ReservedForPrivateUse);
    }

    #[test]
    fn short_format_is_big_endian() {
        let mut buf = [0u8; 4];
        ShortFormat {
            seconds: 0x0001,
            fraction: 0x8000,
        }
        .to_bytes(&mut buf)
        .unwrap();
        assert_eq!(buf, [0x00, 0x01, 0x80, 0x00]);
    }

    #[test]
    fn timestamp_format_is_big_endian() {
        let mut buf = [0u8; 8];
        TimestampFormat {
            seconds: 0x0000_0064,
            fraction: 0xDEAD_BEEF,
        }
        .to_bytes(&mut buf)
        .unwrap();
        assert_eq!(buf, [0x00, 0x00, 0x00, 0x64, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn field_readers_reject_short_buffers() {
        assert!(ShortFormat::from_bytes(&[0u8; 3]).is_err());
        assert!(TimestampFormat::from_bytes(&[0u8; 7]).is_err());
        assert!(Stratum::from_bytes(&[]).is_err());
        assert!(ReferenceIdentifier::from_bytes(&[b'G', b'P']).is_err());
    }

    #[test]
    fn field_writers_reject_short_buffers() {
        let mut buf = [0u8; 3];
        assert_eq!(
            ShortFormat::default().to_bytes(&mut buf),
            Err(FormatError::BufferTooShort {
                needed: 4,
                available: 3,
            })
        );
        let mut buf = [0u8; 47];
        assert!(make_test_packet().to_bytes(&mut buf).is_err());
    }

    #[test]
    fn packet_roundtrip() {
        let pkt = make_test_packet();
        let buf = pkt.to_wire();
        let (decoded, consumed) = Packet::from_bytes(&buf).unwrap();
        assert_eq!(consumed, 48);
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn packet_to_bytes_matches_to_wire() {
        let pkt = make_test_packet();
        let mut buf = [0u8; 64];
        let written = pkt.to_bytes(&mut buf).unwrap();
        assert_eq!(written, 48);
        assert_eq!(buf[..48], pkt.to_wire());
        assert!(buf[48..].iter().all(|&b| b == 0));
    }

    #[test]
    fn packet_field_offsets() {
        let buf = make_test_packet().to_wire();
        assert_eq!(buf[0], 0x23);
        assert_eq!(buf[2], 6);
        assert_eq!(buf[3], 0xEC);
        assert_eq!(buf[4..8], [0x00, 0x01, 0x80, 0x00]);
        assert_eq!(buf[8..12], [0x00, 0x00, 0x40, 0x00]);
        assert_eq!(buf[44..48], [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn packet_read_too_short() {
        let err = Packet::from_bytes(&[0u8; 47]).unwrap_err();
        assert_eq!(
            err,
            FormatError::BufferTooShort {
                needed: 48,
                available: 47,
            }
        );
    }

    #[test]
    fn packet_rejects_non_text_reference_id() {
        let mut buf = make_test_packet().to_wire();
        buf[12..16].copy_from_slice(&[0xC0, 0xA8, 0x01, 0x01]);
        let err = Packet::from_bytes(&buf).unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidField {
                field: "reference identifier",
                value: 0xC0A8_0101,
            }
        ));
    }

    #[test]
    fn packet_ignores_trailing_bytes() {
        let pkt = make_test_packet();
        let mut buf = [0xAAu8; 68];
        buf[..48].copy_from_slice(&pkt.to_wire());
        let (decoded, consumed) = Packet::from_bytes(&buf).unwrap();
        assert_eq!(consumed, 48);
        assert_eq!(decoded, pkt);
    }
}
