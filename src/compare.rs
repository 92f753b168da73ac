// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Scoring the distance between two TLSH digests.
//!
//! The score is a nonnegative integer: 0 means the digests are
//! identical (up to within-bucket noise) and larger values mean less
//! similar inputs.  It is the sum of four components:
//!
//! *   **checksum**: 0 if equal, 1 otherwise;
//! *   **length** (optional): the circular distance between the two
//!     length codes, scaled 12-fold beyond a distance of 1;
//! *   **q-ratios**: for each of the two ratio nibbles, the circular
//!     distance, scaled 12-fold beyond a distance of 1;
//! *   **body**: the sum of per-byte
//!     [bit-pair differences](bit_pairs::BIT_PAIRS_DIFF_TABLE).
//!
//! Only digests produced with the same bucket count and checksum
//! length are comparable; anything else fails with
//! [`MismatchError`].

use crate::hash::{FormatError, Tlsh};

pub(crate) mod bit_pairs;

use bit_pairs::BIT_PAIRS_DIFF_TABLE;

/// The scaling multiplier applied to distances beyond the
/// immediate neighborhood.
const DIFF_SCALE: i32 = 12;

/// An enumeration representing a cause of a digest comparison error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchError {
    /// The two digests carry checksums of different lengths.
    ///
    /// The payload is `(left length, right length)`.
    ChecksumLength(usize, usize),
    /// The two digests carry bodies of different lengths (they were
    /// produced with different bucket counts).
    ///
    /// The payload is `(left length, right length)`.
    BodyLength(usize, usize),
}

impl core::fmt::Display for MismatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MismatchError::ChecksumLength(left, right) => {
                write!(f, "number of checksum bytes differ ({} != {})", left, right)
            }
            MismatchError::BodyLength(left, right) => {
                write!(f, "number of body bytes differ ({} != {})", left, right)
            }
        }
    }
}

crate::macros::impl_error! { MismatchError {} }

/// The operand which failed to parse in a two-digest operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorSide {
    /// The first operand.
    Left,
    /// The second operand.
    Right,
}

/// An enumeration representing a cause of a [`score()`] error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreError {
    /// One of the buffers is not a valid packed digest.
    Format(ParseErrorSide, FormatError),
    /// Both buffers are valid digests of incomparable variants.
    Mismatched(MismatchError),
}

impl core::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScoreError::Format(ParseErrorSide::Left, err) => {
                write!(f, "left digest: {}", err)
            }
            ScoreError::Format(ParseErrorSide::Right, err) => {
                write!(f, "right digest: {}", err)
            }
            ScoreError::Mismatched(err) => err.fmt(f),
        }
    }
}

impl From<MismatchError> for ScoreError {
    // For wrapping with the '?' operator.
    fn from(value: MismatchError) -> Self {
        ScoreError::Mismatched(value)
    }
}

crate::macros::impl_error! { ScoreError {} }

/// The distance between two values on a circle of the given range.
#[inline]
fn mod_diff(x: u32, y: u32, range: u32) -> u32 {
    let d = x.abs_diff(y);
    core::cmp::min(d, range - d)
}

/// Scores two checksums: 0 if identical, 1 otherwise.
fn score_checksum(left: &[u8], right: &[u8]) -> Result<i32, MismatchError> {
    if left.len() != right.len() {
        return Err(MismatchError::ChecksumLength(left.len(), right.len()));
    }
    Ok(i32::from(left != right))
}

/// Scores two length codes over their circular distance.
fn score_lvalue(left: u8, right: u8) -> i32 {
    match mod_diff(left.into(), right.into(), 256) {
        0 => 0,
        1 => 1,
        d => DIFF_SCALE * d as i32,
    }
}

/// Scores two ratio nibbles over their circular distance.
fn score_q(left: u8, right: u8) -> i32 {
    let d = mod_diff(left.into(), right.into(), 16) as i32;
    if d <= 1 {
        d
    } else {
        (d - 1) * DIFF_SCALE
    }
}

/// Scores two bodies as the sum of per-byte bit-pair differences.
fn score_body(left: &[u8], right: &[u8]) -> Result<i32, MismatchError> {
    if left.len() != right.len() {
        return Err(MismatchError::BodyLength(left.len(), right.len()));
    }
    let mut diff = 0i32;
    for (&x, &y) in left.iter().zip(right.iter()) {
        diff += i32::from(BIT_PAIRS_DIFF_TABLE[x as usize][y as usize]);
    }
    Ok(diff)
}

impl Tlsh {
    /// Scores the distance to another digest.
    ///
    /// With `include_length` the quantized input lengths take part in
    /// the score; without it, inputs of very different sizes can
    /// still score close if their content mixes alike.
    ///
    /// Both digests must have been produced with the same bucket
    /// count and checksum length.
    ///
    /// # Example
    ///
    /// ```
    /// use tlsh::Tlsh;
    ///
    /// let a: Tlsh = "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
    ///     .parse().unwrap();
    /// let b: Tlsh = "F87000008008000822B80080002C82A000808002800C003020000B2830202008A83A22"
    ///     .parse().unwrap();
    /// assert_eq!(a.score(&b, false), Ok(165));
    /// ```
    pub fn score(&self, other: &Tlsh, include_length: bool) -> Result<i32, MismatchError> {
        let mut score = score_checksum(self.checksum(), other.checksum())?;
        if include_length {
            score += score_lvalue(self.lvalue(), other.lvalue());
        }
        score += score_q(self.q1_ratio(), other.q1_ratio());
        score += score_q(self.q2_ratio(), other.q2_ratio());
        score += score_body(self.body(), other.body())?;
        Ok(score)
    }
}

/// Scores the distance between two digests in packed form.
///
/// Both buffers must be valid packed digests (see
/// [`Tlsh::from_packed()`]) of the same variant.
///
/// # Example
///
/// ```
/// use tlsh::{score, Digester};
///
/// let mut digester = Digester::default();
/// digester.update(b"Hello world!");
/// let a = digester.finalize().pack();
///
/// let mut digester = Digester::default();
/// digester.update(b"Goodbye Cruel World");
/// let b = digester.finalize().pack();
///
/// assert_eq!(score(&a, &b, false), Ok(165));
/// assert_eq!(score(&a, &a, true), Ok(0));
/// ```
pub fn score(left: &[u8], right: &[u8], include_length: bool) -> Result<i32, ScoreError> {
    let left = Tlsh::from_packed(left)
        .map_err(|err| ScoreError::Format(ParseErrorSide::Left, err))?;
    let right = Tlsh::from_packed(right)
        .map_err(|err| ScoreError::Format(ParseErrorSide::Right, err))?;
    Ok(left.score(&right, include_length)?)
}
