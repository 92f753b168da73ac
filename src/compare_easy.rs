// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

#![cfg(feature = "easy-functions")]

use crate::compare::{ParseErrorSide, ScoreError};
use crate::hash::Tlsh;

/// Scores the distance between two digests in hexadecimal form.
///
/// Both strings are parsed as digests (the `T1` version tag is
/// accepted) and then scored; a parse failure reports which side
/// was at fault.
///
/// # Example
///
/// ```
/// let a = "T1DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0";
/// let b = "F87000008008000822B80080002C82A000808002800C003020000B2830202008A83A22";
/// assert_eq!(tlsh::score_hex(a, b, false), Ok(165));
/// ```
pub fn score_hex(left: &str, right: &str, include_length: bool) -> Result<i32, ScoreError> {
    let left: Tlsh = left
        .parse()
        .map_err(|err| ScoreError::Format(ParseErrorSide::Left, err))?;
    let right: Tlsh = right
        .parse()
        .map_err(|err| ScoreError::Format(ParseErrorSide::Right, err))?;
    Ok(left.score(&right, include_length)?)
}
