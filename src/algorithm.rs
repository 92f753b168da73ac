// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! The algorithm naming grammar.
//!
//! TLSH variants are conventionally named
//! `TLSH-{buckets}-{checksum bytes}[/{window length}]`:
//!
//! *   `TLSH-128-1/5`: 128 buckets, a 1-byte checksum, a 5-byte
//!     window;
//! *   `TLSH-256-3`: the window suffix defaults to `/5`;
//! *   `TLSH`: alias of `TLSH-128-1/5`.
//!
//! The combination of 48 buckets with a 3-byte checksum is not a
//! valid algorithm.

use crate::generate::{Digester, ParameterError};

/// An enumeration representing a cause of an algorithm name
/// resolution error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// The name does not follow the grammar
    /// `TLSH-(48|128|256)-(1|3)[/([4-8])]`.
    Unrecognized,
    /// The name follows the grammar but combines parameters that no
    /// digester supports.
    Parameter(ParameterError),
}

impl core::fmt::Display for NameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NameError::Unrecognized => f.write_str("algorithm name is not recognized"),
            NameError::Parameter(err) => err.fmt(f),
        }
    }
}

impl From<ParameterError> for NameError {
    // For wrapping with the '?' operator.
    fn from(value: ParameterError) -> Self {
        NameError::Parameter(value)
    }
}

crate::macros::impl_error! { NameError {} }

/// A named digester configuration.
///
/// An [`Algorithm`] is a validated `(window length, bucket count,
/// checksum length)` triple.  It parses from and displays as the
/// conventional algorithm name and builds ready-to-use digesters.
///
/// # Example
///
/// ```
/// use tlsh::Algorithm;
///
/// let algorithm: Algorithm = "TLSH-48-1".parse().unwrap();
/// assert_eq!(algorithm.to_string(), "TLSH-48-1/5");
/// assert_eq!(algorithm.bucket_count(), 48);
///
/// // The bare name is an alias of the default configuration.
/// let default: Algorithm = "TLSH".parse().unwrap();
/// assert_eq!(default, Algorithm::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Algorithm {
    /// The window length in bytes (4 to 8).
    window_length: u8,
    /// The bucket count (48, 128 or 256).
    bucket_count: u16,
    /// The checksum length in bytes (1 or 3).
    checksum_length: u8,
}

impl Algorithm {
    /// The default algorithm, `TLSH-128-1/5`.
    pub const DEFAULT: Algorithm = Algorithm {
        window_length: Digester::DEFAULT_WINDOW_LENGTH as u8,
        bucket_count: Digester::DEFAULT_BUCKET_COUNT as u16,
        checksum_length: Digester::DEFAULT_CHECKSUM_LENGTH as u8,
    };

    /// Creates an algorithm from a `(window length, bucket count,
    /// checksum length)` triple, validating it.
    pub fn new(
        window_length: usize,
        bucket_count: usize,
        checksum_length: usize,
    ) -> Result<Self, ParameterError> {
        Digester::validate_parameters(window_length, bucket_count, checksum_length)?;
        Ok(Algorithm {
            window_length: window_length as u8,
            bucket_count: bucket_count as u16,
            checksum_length: checksum_length as u8,
        })
    }

    /// The window length in bytes.
    #[inline]
    pub fn window_length(&self) -> usize {
        self.window_length as usize
    }

    /// The bucket count.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count as usize
    }

    /// The checksum length in bytes.
    #[inline]
    pub fn checksum_length(&self) -> usize {
        self.checksum_length as usize
    }

    /// Creates an empty digester for this algorithm.
    pub fn digester(&self) -> Digester {
        // The triple was validated on construction.
        Digester::new(
            self.window_length(),
            self.bucket_count(),
            self.checksum_length(),
        )
        .expect("a validated algorithm always builds")
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl core::fmt::Display for Algorithm {
    /// Formats the full algorithm name, window suffix included.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "TLSH-{}-{}/{}",
            self.bucket_count, self.checksum_length, self.window_length
        )
    }
}

impl core::str::FromStr for Algorithm {
    type Err = NameError;

    /// Parses an algorithm name.
    ///
    /// The grammar is `TLSH-(48|128|256)-(1|3)[/([4-8])]`, with `/5`
    /// assumed when the window suffix is omitted; the bare name
    /// `TLSH` aliases `TLSH-128-1/5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("TLSH").ok_or(NameError::Unrecognized)?;
        if rest.is_empty() {
            return Ok(Self::DEFAULT);
        }
        let rest = rest.strip_prefix('-').ok_or(NameError::Unrecognized)?;
        let (bucket_str, rest) = rest.split_once('-').ok_or(NameError::Unrecognized)?;
        let (checksum_str, window_str) = match rest.split_once('/') {
            Some((checksum_str, window_str)) => (checksum_str, Some(window_str)),
            None => (rest, None),
        };
        let bucket_count: usize = match bucket_str {
            "48" => 48,
            "128" => 128,
            "256" => 256,
            _ => return Err(NameError::Unrecognized),
        };
        let checksum_length: usize = match checksum_str {
            "1" => 1,
            "3" => 3,
            _ => return Err(NameError::Unrecognized),
        };
        let window_length: usize = match window_str {
            None => Digester::DEFAULT_WINDOW_LENGTH,
            Some("4") => 4,
            Some("5") => 5,
            Some("6") => 6,
            Some("7") => 7,
            Some("8") => 8,
            Some(_) => return Err(NameError::Unrecognized),
        };
        Ok(Self::new(window_length, bucket_count, checksum_length)?)
    }
}

mod tests;
