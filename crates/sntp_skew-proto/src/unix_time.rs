// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock instants relative to the Unix epoch and their conversion to and
//! from NTP timestamps.

use crate::protocol::TimestampFormat;
#[cfg(feature = "std")]
use std::time;

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

/// The number of seconds in one NTP era (2^32 seconds, approximately 136 years).
///
/// Era 0 ends at 2036-02-07 06:28:15 UTC.
pub const ERA_SECONDS: i64 = 1 << 32;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// An instant relative to `UNIX_EPOCH`, in whole seconds plus a non-negative
/// nanosecond part.
///
/// Instants before the epoch have negative `secs`; `subsec_nanos` always
/// counts forward from `secs`, so -0.25 s is `secs = -1, subsec_nanos = 750_000_000`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    secs: i64,
    subsec_nanos: u32,
}

impl Instant {
    /// Create a new **Instant**. Nanoseconds of a second or more are carried
    /// into `secs`.
    pub fn new(secs: i64, subsec_nanos: u32) -> Instant {
        let carry = (subsec_nanos as u64 / NANOS_PER_SEC) as i64;
        Instant {
            secs: secs.saturating_add(carry),
            subsec_nanos: (subsec_nanos as u64 % NANOS_PER_SEC) as u32,
        }
    }

    /// The current system time.
    ///
    /// ```
    /// let now = sntp_proto::unix_time::Instant::now();
    /// assert!(now.secs() > 0);
    /// ```
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(duration) => Instant::new(duration.as_secs() as i64, duration.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                let secs = -(before.as_secs() as i64);
                match before.subsec_nanos() {
                    0 => Instant::new(secs, 0),
                    nanos => Instant::new(secs - 1, NANOS_PER_SEC as u32 - nanos),
                }
            }
        }
    }

    /// Whole seconds since the Unix epoch, rounded toward negative infinity.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Nanoseconds past [`secs`](Self::secs), in `0..1_000_000_000`.
    pub fn subsec_nanos(&self) -> u32 {
        self.subsec_nanos
    }
}

/// Select the era for `raw_seconds` that lands closest to `pivot`, returning
/// absolute NTP seconds.
fn era_aware_ntp_seconds(raw_seconds: u32, pivot: &Instant) -> i64 {
    let pivot_ntp = pivot.secs + EPOCH_DELTA;
    let candidate = pivot_ntp.div_euclid(ERA_SECONDS) * ERA_SECONDS + raw_seconds as i64;

    let diff = candidate - pivot_ntp;
    if diff > ERA_SECONDS / 2 {
        candidate - ERA_SECONDS
    } else if diff < -(ERA_SECONDS / 2) {
        candidate + ERA_SECONDS
    } else {
        candidate
    }
}

/// Convert a [`TimestampFormat`] to an [`Instant`], picking the era that
/// places the result within half an era (~68 years) of `pivot`.
///
/// Pass `Instant::now()` as the pivot for timestamps seen on the wire.
pub fn timestamp_to_instant(ts: TimestampFormat, pivot: &Instant) -> Instant {
    let secs = era_aware_ntp_seconds(ts.seconds, pivot) - EPOCH_DELTA;
    let subsec_nanos = ((ts.fraction as u64 * NANOS_PER_SEC) >> 32) as u32;
    Instant::new(secs, subsec_nanos)
}

impl From<Instant> for TimestampFormat {
    /// Converts a Unix [`Instant`] to a 32-bit NTP timestamp.
    ///
    /// The seconds wrap modulo one era; the fraction is truncated to 2^-32 s.
    fn from(t: Instant) -> Self {
        let seconds = (t.secs + EPOCH_DELTA).rem_euclid(ERA_SECONDS) as u32;
        let fraction = (((t.subsec_nanos as u64) << 32) / NANOS_PER_SEC) as u32;
        TimestampFormat { seconds, fraction }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_is_epoch_delta() {
        let ts: TimestampFormat = Instant::new(0, 0).into();
        assert_eq!(ts.seconds, 2_208_988_800);
        assert_eq!(ts.fraction, 0);
    }

    #[test]
    fn half_second_maps_to_half_fraction() {
        let ts: TimestampFormat = Instant::new(1_704_067_200, 500_000_000).into();
        assert_eq!(ts.seconds, 3_913_056_000);
        assert_eq!(ts.fraction, 0x8000_0000);
    }

    #[test]
    fn new_carries_whole_seconds() {
        let instant = Instant::new(10, 2_500_000_000);
        assert_eq!(instant.secs(), 12);
        assert_eq!(instant.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn now_is_after_2024() {
        let now = Instant::now();
        assert!(now.secs() > 1_704_067_200);
        assert!(now.subsec_nanos() < 1_000_000_000);
    }

    #[test]
    fn era0_timestamp_to_instant() {
        // 2024-01-01 00:00:00 UTC
        let ts = TimestampFormat {
            seconds: 3_913_056_000,
            fraction: 0x4000_0000,
        };
        let pivot = Instant::new(1_704_067_200, 0);
        let result = timestamp_to_instant(ts, &pivot);
        assert_eq!(result.secs(), 1_704_067_200);
        assert_eq!(result.subsec_nanos(), 250_000_000);
    }

    #[test]
    fn pivot_before_rollover_resolves_to_era1() {
        let pivot = Instant::new(2_082_758_400, 0); // ~2036-01-01
        let ts = TimestampFormat {
            seconds: 1000,
            fraction: 0,
        };
        let result = timestamp_to_instant(ts, &pivot);
        assert_eq!(result.secs(), ERA_SECONDS + 1000 - EPOCH_DELTA);
    }

    #[test]
    fn pivot_after_rollover_resolves_to_era0() {
        let pivot = Instant::new(2_087_942_400, 0); // ~2036-03-01
        let ts = TimestampFormat {
            seconds: u32::MAX,
            fraction: 0,
        };
        let result = timestamp_to_instant(ts, &pivot);
        assert_eq!(result.secs(), u32::MAX as i64 - EPOCH_DELTA);
    }

    #[test]
    fn era1_instant_wraps_seconds() {
        let instant = Instant::new(2_185_978_496, 0); // era 1, offset 100_000_000
        let ts: TimestampFormat = instant.into();
        assert_eq!(ts.seconds, 100_000_000);
        assert_eq!(timestamp_to_instant(ts, &instant), instant);
    }
}
