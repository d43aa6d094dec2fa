// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Conversion between real seconds and the wire fixed-point formats, and the
//! signed [`Offset`] applied to outgoing timestamps.
//!
//! Conversions work on the numbers directly: the integer part is the floor of
//! the value and the fractional part is scaled by 2^bits and truncated. A
//! scaled fraction that reaches 2^bits carries into the integer part.

use core::fmt;
use core::ops::{Add, Neg};

use crate::error::FormatError;

use super::{ShortFormat, TimestampFormat};

const SHORT_FRACTION_BITS: u32 = 16;
const TIMESTAMP_FRACTION_BITS: u32 = 32;

// 2^32, the number of fraction units in one second at timestamp resolution.
const TIMESTAMP_SCALE: f64 = 4_294_967_296.0;

// Offsets are limited to +/- 2^31 s so that the raw value fits an i64 and the
// skew stays within half an NTP era.
const OFFSET_LIMIT_SECONDS: f64 = 2_147_483_648.0;

/// Split a non-negative real into (seconds, fraction) for a format with
/// `frac_bits` fractional bits and at most `max_seconds` whole seconds.
fn split_seconds(
    value: f64,
    frac_bits: u32,
    max_seconds: u64,
    field: &'static str,
) -> Result<(u64, u64), FormatError> {
    // Also rejects NaN and -inf; +inf is caught by the upper bound.
    if !(value >= 0.0) || value >= max_seconds as f64 + 1.0 {
        return Err(FormatError::OutOfRange { field });
    }

    let one = 1u64 << frac_bits;
    // `as` truncates toward zero, which is floor for non-negative values.
    let mut seconds = value as u64;
    let mut fraction = ((value - seconds as f64) * one as f64) as u64;
    if fraction >= one {
        seconds += 1;
        fraction = 0;
    }
    if seconds > max_seconds {
        return Err(FormatError::OutOfRange { field });
    }
    Ok((seconds, fraction))
}

impl ShortFormat {
    /// Convert a non-negative number of seconds to 16.16 fixed point.
    ///
    /// The fraction is truncated to 2^-16 s. Fails with
    /// [`FormatError::OutOfRange`] for negative or non-finite values and for
    /// values of 65536 s or more.
    pub fn from_seconds_f64(value: f64) -> Result<Self, FormatError> {
        let (seconds, fraction) = split_seconds(
            value,
            SHORT_FRACTION_BITS,
            u16::MAX as u64,
            "short format",
        )?;
        Ok(ShortFormat {
            seconds: seconds as u16,
            fraction: fraction as u16,
        })
    }

    /// The value in seconds.
    pub fn as_seconds_f64(&self) -> f64 {
        self.seconds as f64 + self.fraction as f64 / (1u32 << SHORT_FRACTION_BITS) as f64
    }
}

impl TimestampFormat {
    /// Convert a non-negative number of seconds since 1900-01-01 to 32.32
    /// fixed point.
    ///
    /// The fraction is truncated to 2^-32 s. Fails with
    /// [`FormatError::OutOfRange`] for negative or non-finite values and for
    /// values beyond the end of era 0.
    pub fn from_seconds_f64(value: f64) -> Result<Self, FormatError> {
        let (seconds, fraction) = split_seconds(
            value,
            TIMESTAMP_FRACTION_BITS,
            u32::MAX as u64,
            "timestamp",
        )?;
        Ok(TimestampFormat {
            seconds: seconds as u32,
            fraction: fraction as u32,
        })
    }

    /// The value in seconds since 1900-01-01.
    pub fn as_seconds_f64(&self) -> f64 {
        self.seconds as f64 + self.fraction as f64 / TIMESTAMP_SCALE
    }

    /// The timestamp as a single 64-bit fixed-point number.
    pub fn to_bits(self) -> u64 {
        ((self.seconds as u64) << 32) | self.fraction as u64
    }

    /// Build a timestamp from a 64-bit fixed-point number.
    pub fn from_bits(bits: u64) -> Self {
        TimestampFormat {
            seconds: (bits >> 32) as u32,
            fraction: bits as u32,
        }
    }
}

/// A signed time offset with 2^-32 s resolution.
///
/// Adding an `Offset` to a [`TimestampFormat`] shifts it by that amount. The
/// addition is modular in 2^32 seconds, matching the way NTP timestamps roll
/// over between eras.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Offset(i64);

impl Offset {
    /// No offset.
    pub const ZERO: Offset = Offset(0);

    /// Build an offset from a (possibly negative or fractional) number of
    /// seconds, truncating toward zero at 2^-32 s.
    ///
    /// Fails with [`FormatError::OutOfRange`] for non-finite values and for
    /// magnitudes of 2^31 s or more.
    pub fn from_seconds_f64(seconds: f64) -> Result<Self, FormatError> {
        if !(seconds > -OFFSET_LIMIT_SECONDS && seconds < OFFSET_LIMIT_SECONDS) {
            return Err(FormatError::OutOfRange { field: "offset" });
        }
        Ok(Offset((seconds * TIMESTAMP_SCALE) as i64))
    }

    /// Build an offset from raw 2^-32 s units.
    pub const fn from_raw(units: i64) -> Self {
        Offset(units)
    }

    /// The offset in raw 2^-32 s units.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// The offset in seconds.
    pub fn as_seconds_f64(self) -> f64 {
        self.0 as f64 / TIMESTAMP_SCALE
    }

    /// Whether the offset is zero.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add<Offset> for TimestampFormat {
    type Output = TimestampFormat;

    fn add(self, offset: Offset) -> TimestampFormat {
        TimestampFormat::from_bits(self.to_bits().wrapping_add(offset.0 as u64))
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset(self.0.wrapping_neg())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.6}s", self.as_seconds_f64())
    }
}
