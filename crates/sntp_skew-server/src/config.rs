// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Offset configuration.
//!
//! The skew applied to every reply is read once at startup, either from a
//! one-line text file holding a number of seconds or straight from the
//! command line. The file format is the first line of the file, parsed as a
//! decimal or exponent-form float; surrounding whitespace is ignored.
//!
//! ```no_run
//! use sntp_server::config::OffsetConfig;
//!
//! # fn example() -> std::io::Result<()> {
//! let config = OffsetConfig::from_file("offset.txt")?;
//! println!("replies will be skewed by {}", config.offset);
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::ConfigError;
use crate::protocol::Offset;

/// Default name of the offset file, relative to the working directory.
pub const DEFAULT_OFFSET_FILE: &str = "offset.txt";

/// The fixed skew applied to the receive and transmit timestamps of every reply.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OffsetConfig {
    /// Amount added to the server clock, possibly negative.
    pub offset: Offset,
}

impl OffsetConfig {
    /// Read the offset from the first line of the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::OffsetFileUnreadable {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;
        let first_line = contents.lines().next().unwrap_or_default();
        let config = Self::parse(first_line)?;
        debug!("loaded offset {} from {}", config.offset, path.display());
        Ok(config)
    }

    /// Parse an offset given in seconds, e.g. `"-5.0"` or `"3600"`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let trimmed = text.trim();
        let seconds: f64 = trimmed.parse().map_err(|e| ConfigError::InvalidOffset {
            value: trimmed.to_string(),
            detail: format!("{e}"),
        })?;
        let offset = Offset::from_seconds_f64(seconds).map_err(|e| ConfigError::InvalidOffset {
            value: trimmed.to_string(),
            detail: e.to_string(),
        })?;
        Ok(OffsetConfig { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "sntp_skew-config-{}-{}.txt",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parse_negative_offset() {
        let config = OffsetConfig::parse("-5.0").unwrap();
        assert_eq!(config.offset, Offset::from_seconds_f64(-5.0).unwrap());
    }

    #[test]
    fn parse_trims_whitespace() {
        let config = OffsetConfig::parse("  3600\n").unwrap();
        assert_eq!(config.offset.as_seconds_f64(), 3600.0);
    }

    #[test]
    fn parse_accepts_exponent_form() {
        let config = OffsetConfig::parse("1.5e2").unwrap();
        assert_eq!(config.offset.as_seconds_f64(), 150.0);
    }

    #[test]
    fn parse_rejects_text() {
        let err = OffsetConfig::parse("soon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOffset { ref value, .. } if value == "soon"));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(
            OffsetConfig::parse(""),
            Err(ConfigError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn parse_rejects_non_finite_and_huge() {
        assert!(OffsetConfig::parse("NaN").is_err());
        assert!(OffsetConfig::parse("inf").is_err());
        assert!(OffsetConfig::parse("1e12").is_err());
    }

    #[test]
    fn from_file_reads_first_line_only() {
        let path = fixture("first-line", "-5.0\nthis line is ignored\n");
        let config = OffsetConfig::from_file(&path).unwrap();
        assert_eq!(config.offset, Offset::from_seconds_f64(-5.0).unwrap());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn from_file_missing() {
        let path = std::env::temp_dir().join("sntp_skew-config-does-not-exist.txt");
        let err = OffsetConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::OffsetFileUnreadable { .. }));
    }

    #[test]
    fn from_file_non_numeric() {
        let path = fixture("non-numeric", "five seconds\n");
        let err = OffsetConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOffset { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn from_file_empty() {
        let path = fixture("empty", "");
        assert!(OffsetConfig::from_file(&path).is_err());
        let _ = fs::remove_file(path);
    }
}
