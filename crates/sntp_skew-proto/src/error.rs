// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error type for the SNTP codec.
//!
//! [`FormatError`] uses no heap allocation so it works without `std`. With the
//! `std` feature it also implements [`std::error::Error`] and converts into
//! [`std::io::Error`].

use core::fmt;

/// Errors raised while decoding or encoding SNTP packets and fixed-point values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
    /// A field holds a value with no valid interpretation.
    InvalidField {
        /// Name of the field that was invalid.
        field: &'static str,
        /// The raw value that was rejected.
        value: u32,
    },
    /// A real number cannot be represented in the field's fixed-point format.
    ///
    /// Raised for negative, NaN and infinite values, and for values whose integer
    /// part does not fit the field's width.
    OutOfRange {
        /// Name of the fixed-point field.
        field: &'static str,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            FormatError::InvalidField { field, value } => {
                write!(f, "invalid {} value: {:#010x}", field, value)
            }
            FormatError::OutOfRange { field } => {
                write!(f, "value out of range for {}", field)
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<FormatError> for std::io::Error {
    fn from(err: FormatError) -> std::io::Error {
        let kind = match &err {
            FormatError::BufferTooShort { .. } => std::io::ErrorKind::UnexpectedEof,
            FormatError::InvalidField { .. } => std::io::ErrorKind::InvalidData,
            FormatError::OutOfRange { .. } => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
