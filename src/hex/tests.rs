// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Tests: [`crate::hex`].

#![cfg(test)]

use alloc::string::String;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::hash::FormatError;

use super::{bytes_to_hex, hex_index, hex_to_bytes, HEX_INVALID, HEX_TABLE_UC};

/// Tries to convert a hexadecimal digit into its value.
///
/// If `ch` is not a hexadecimal digit, [`None`] is returned.
#[inline]
fn hex_index_simple(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        _ => None,
    }
}

#[test]
fn table_digits() {
    assert_eq!(&HEX_TABLE_UC, b"0123456789ABCDEF");
    for (value, &digit) in HEX_TABLE_UC.iter().enumerate() {
        assert_eq!(hex_index(digit), value as u8);
    }
}

#[test]
fn compare_impls() {
    // The branchless table and the simple implementation agree for
    // every byte value.
    for ch in u8::MIN..=u8::MAX {
        assert_eq!(hex_index(ch), hex_index_simple(ch).unwrap_or(HEX_INVALID));
    }
}

#[test]
fn invalid_marker_is_no_digit() {
    assert!(HEX_INVALID > 0x0f);
}

#[test]
fn encode_is_upper_case() {
    assert_eq!(bytes_to_hex(&[]), "");
    assert_eq!(bytes_to_hex(&[0x00]), "00");
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "DEADBEEF");
    assert_eq!(bytes_to_hex(&[0x01, 0x23, 0x45, 0x67, 0x89]), "0123456789");
}

#[test]
fn decode_accepts_both_cases() {
    assert_eq!(hex_to_bytes("deadBEEF"), Ok(alloc::vec![0xde, 0xad, 0xbe, 0xef]));
    assert_eq!(hex_to_bytes(""), Ok(alloc::vec![]));
}

#[test]
fn decode_rejects_malformed() {
    assert_eq!(hex_to_bytes("F"), Err(FormatError::StringLengthInvalid));
    assert_eq!(hex_to_bytes("ABC"), Err(FormatError::StringLengthInvalid));
    assert_eq!(hex_to_bytes("GG"), Err(FormatError::UnexpectedCharacter));
    assert_eq!(hex_to_bytes("0G"), Err(FormatError::UnexpectedCharacter));
    assert_eq!(hex_to_bytes("G0"), Err(FormatError::UnexpectedCharacter));
    assert_eq!(hex_to_bytes("  "), Err(FormatError::UnexpectedCharacter));
    assert_eq!(hex_to_bytes("0x"), Err(FormatError::UnexpectedCharacter));
}

#[test]
fn round_trip_random() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0xcafe);
    for len in 0..64usize {
        let mut buffer = alloc::vec![0u8; len];
        rng.fill_bytes(buffer.as_mut_slice());
        let hex: String = bytes_to_hex(&buffer);
        assert_eq!(hex.len(), len * 2);
        assert_eq!(hex_to_bytes(&hex), Ok(buffer));
    }
}
