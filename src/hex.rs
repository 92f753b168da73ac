// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! The hexadecimal transport encoding of packed digests.

#[cfg(all(feature = "alloc", not(any(test, doc, feature = "std"))))]
use alloc::string::String;
#[cfg(all(feature = "alloc", not(any(test, doc, feature = "std"))))]
use alloc::vec::Vec;
#[cfg(any(test, doc, feature = "std"))]
use std::string::String;
#[cfg(any(test, doc, feature = "std"))]
use std::vec::Vec;

use crate::hash::FormatError;

/// Upper-case hexadecimal digit table in [`u8`].
///
/// Digests transport in upper case; the parser accepts both cases.
pub(crate) const HEX_TABLE_UC: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7',
    b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F',
];

/// Reverse byte to hexadecimal digit value table.
///
/// This table has all 256 entries for branchless lookup, even on safe
/// Rust.  Both letter cases decode to the same values.
const HEX_REV_TABLE_U8: [u8; 256] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

/// The constant representing an "invalid" hexadecimal digit.
pub(crate) const HEX_INVALID: u8 = 0xff;

/// Tries to convert a hexadecimal digit into its value.
///
/// If `ch` is not a hexadecimal digit, [`HEX_INVALID`] is returned.
/// Bound checking will not be performed on optimized settings because
/// [`HEX_REV_TABLE_U8`] covers all possible values of [`u8`].
#[inline]
pub(crate) fn hex_index(ch: u8) -> u8 {
    HEX_REV_TABLE_U8[ch as usize]
}

/// Encodes bytes into upper-case hexadecimal digits.
///
/// `dst` must be exactly twice as long as `src`.
pub(crate) fn encode_into(src: &[u8], dst: &mut [u8]) {
    debug_assert_eq!(dst.len(), src.len() * 2);
    for (value, out) in src.iter().zip(dst.chunks_exact_mut(2)) {
        out[0] = HEX_TABLE_UC[(value >> 4) as usize];
        out[1] = HEX_TABLE_UC[(value & 0x0f) as usize];
    }
}

/// Decodes hexadecimal digits into bytes.
///
/// `src` must be exactly twice as long as `dst`; a non-hexadecimal
/// character is rejected.
pub(crate) fn decode_into(src: &[u8], dst: &mut [u8]) -> Result<(), FormatError> {
    debug_assert_eq!(src.len(), dst.len() * 2);
    for (out, digits) in dst.iter_mut().zip(src.chunks_exact(2)) {
        let hi = hex_index(digits[0]);
        let lo = hex_index(digits[1]);
        if hi == HEX_INVALID || lo == HEX_INVALID {
            return Err(FormatError::UnexpectedCharacter);
        }
        *out = hi << 4 | lo;
    }
    Ok(())
}

/// Converts a byte buffer to its upper-case hexadecimal string.
///
/// # Example
///
/// ```
/// assert_eq!(tlsh::bytes_to_hex(&[0xde, 0xad, 0x00]), "DEAD00");
/// ```
#[cfg(feature = "alloc")]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut buffer = alloc::vec![0u8; bytes.len() * 2];
    encode_into(bytes, buffer.as_mut_slice());
    // The buffer only contains digits from HEX_TABLE_UC.
    String::from_utf8(buffer).expect("hex digits are valid UTF-8")
}

/// Converts a hexadecimal string to a byte buffer.
///
/// The input must have an even number of characters and consist only
/// of hexadecimal digits (either case); anything else fails with a
/// [`FormatError`].
///
/// # Example
///
/// ```
/// assert_eq!(tlsh::hex_to_bytes("DEad00"), Ok(vec![0xde, 0xad, 0x00]));
/// assert!(tlsh::hex_to_bytes("F").is_err());
/// assert!(tlsh::hex_to_bytes("GG").is_err());
/// ```
#[cfg(feature = "alloc")]
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, FormatError> {
    let src = hex.as_bytes();
    if src.len() % 2 != 0 {
        return Err(FormatError::StringLengthInvalid);
    }
    let mut buffer = alloc::vec![0u8; src.len() / 2];
    decode_into(src, buffer.as_mut_slice())?;
    Ok(buffer)
}

mod tests;
