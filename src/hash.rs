// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! The TLSH digest value type.
//!
//! # Digest internals
//!
//! A TLSH digest consists of four parts:
//!
//! 1.  The checksum (1 or 3 bytes of rolling Pearson state),
//! 2.  the "lvalue" (the input length quantized to one byte, see
//!     [`l_capturing()`](crate::length::l_capturing())),
//! 3.  the two quartile ratios `q1_ratio` and `q2_ratio` (one nibble
//!     each) and
//! 4.  the body: one 2-bit code per histogram bucket, four codes per
//!     byte, so 12, 32 or 64 bytes for 48, 128 or 256 buckets.
//!
//! # Packed form
//!
//! The canonical byte (network) form is laid out as follows, for a
//! checksum of `c` bytes and a body of `m` bytes:
//!
//! ```text
//! offset        content
//! 0 .. c        checksum bytes, each with its nibbles swapped
//! c             lvalue, nibbles swapped
//! c + 1         q1_ratio << 4 | q2_ratio
//! c + 2 .. end  body bytes in reverse order (last bucket group first)
//! ```
//!
//! The five valid packed lengths are 15, 35, 37, 67 and 69 bytes; the
//! pair `(bucket count, checksum length)` is inferred from the length
//! alone, which is what makes the compact form self-describing.
//!
//! # String form
//!
//! The string form is the upper-case hexadecimal expansion of the
//! packed form, optionally preceded by the version tag `T1`.  Parsing
//! accepts both letter cases and the optional tag.

#[cfg(all(feature = "alloc", not(any(test, doc, feature = "std"))))]
use alloc::string::String;
#[cfg(all(feature = "alloc", not(any(test, doc, feature = "std"))))]
use alloc::vec::Vec;
#[cfg(any(test, doc, feature = "std"))]
use std::string::String;
#[cfg(any(test, doc, feature = "std"))]
use std::vec::Vec;

use crate::hex;
use crate::length::l_capturing;
use crate::macros::{invariant, optionally_unsafe};

/// The maximum checksum length in bytes.
pub(crate) const MAX_CHECKSUM_SIZE: usize = 3;

/// The maximum body length in bytes (256 buckets, 4 per byte).
pub(crate) const MAX_BODY_SIZE: usize = 64;

/// An enumeration representing a cause of a digest format error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// A packed buffer has a length other than 15, 35, 37, 67
    /// or 69 bytes.
    PackedLengthInvalid,
    /// A digest string has a length other than twice a valid packed
    /// length (not counting the optional `T1` prefix), or an odd
    /// number of hexadecimal digits was supplied.
    StringLengthInvalid,
    /// A character that is not a hexadecimal digit was encountered.
    UnexpectedCharacter,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            FormatError::PackedLengthInvalid => "packed digest has an unexpected length",
            FormatError::StringLengthInvalid => "digest string has an unexpected length",
            FormatError::UnexpectedCharacter => "an unexpected character is encountered",
        })
    }
}

crate::macros::impl_error! { FormatError {} }

/// An enumeration representing a cause of a digest store error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// Storing the requested form would overflow the output buffer.
    BufferOverflow,
}

impl core::fmt::Display for OperationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            OperationError::BufferOverflow => {
                "overflow will occur while storing the requested form"
            }
        })
    }
}

crate::macros::impl_error! { OperationError {} }

/// Swaps the two nibbles of a byte.
#[inline(always)]
const fn swap_nibble(x: u8) -> u8 {
    x << 4 | x >> 4
}

/// A TLSH digest as a plain value.
///
/// A digest is produced by [`Digester::finalize()`](crate::Digester::finalize()),
/// unpacked from its canonical byte form with [`from_packed()`](Self::from_packed())
/// or parsed from its hexadecimal form with [`str::parse()`].
/// See the [module documentation](self) for the layout of both forms.
///
/// Two digests compare equal iff all their parts are element-wise
/// equal.  The value is plain data (`Copy`) and holds no references.
///
/// # Example
///
/// ```
/// use tlsh::Tlsh;
///
/// let digest: Tlsh =
///     "T1DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
///         .parse()
///         .unwrap();
/// assert_eq!(digest.bucket_count(), 128);
/// assert_eq!(digest.checksum(), &[0xDD]);
/// assert_eq!(digest.lvalue(), 0x06);
/// ```
#[derive(Copy, Clone)]
pub struct Tlsh {
    /// Checksum bytes.  Elements `[checksum_len..]` are always zero.
    checksum: [u8; MAX_CHECKSUM_SIZE],
    /// The quantized input length.
    lvalue: u8,
    /// `q1 * 100 / q3`, low nibble.
    q1_ratio: u8,
    /// `q2 * 100 / q3`, low nibble.
    q2_ratio: u8,
    /// Bucket quartile codes, four 2-bit codes per byte.
    /// Elements `[body_len..]` are always zero.
    body: [u8; MAX_BODY_SIZE],
    /// Effective length of `checksum` (1 or 3).
    checksum_len: u8,
    /// Effective length of `body` (12, 32 or 64).
    body_len: u8,
}

impl Tlsh {
    /// The maximum length of a packed digest in bytes.
    pub const MAX_PACKED_LEN: usize = MAX_CHECKSUM_SIZE + 2 + MAX_BODY_SIZE;

    /// The maximum length of the string representation, not counting
    /// the optional `T1` version prefix.
    pub const MAX_LEN_IN_STR: usize = Self::MAX_PACKED_LEN * 2;

    /// The version tag accepted (and emitted by
    /// [`to_hex_t1()`](Self::to_hex_t1())) in the string form.
    pub const VERSION_PREFIX: &'static str = "T1";

    /// Infers `(checksum length, body length)` from a packed length.
    fn dimensions_of_packed(len: usize) -> Result<(u8, u8), FormatError> {
        // checksum + lvalue + q-ratios + body
        match len {
            15 => Ok((1, 12)), // 48 buckets
            35 => Ok((1, 32)), // 128 buckets
            37 => Ok((3, 32)),
            67 => Ok((1, 64)), // 256 buckets
            69 => Ok((3, 64)),
            _ => Err(FormatError::PackedLengthInvalid),
        }
    }

    /// Creates a digest from the finalized digester state.
    ///
    /// `q1`, `q2` and `q3` are the quartile boundary counter values;
    /// the ratios are truncated to their low nibbles.  When `q3` is
    /// zero (the histogram never saw a full window) both ratios are
    /// defined to be zero.
    pub(crate) fn from_digest_state(
        checksum: &[u8],
        count: u64,
        q1: u64,
        q2: u64,
        q3: u64,
        body: &[u8],
    ) -> Self {
        debug_assert!(checksum.len() == 1 || checksum.len() == MAX_CHECKSUM_SIZE);
        debug_assert!(matches!(body.len(), 12 | 32 | 64));
        let (q1_ratio, q2_ratio) = if q3 == 0 {
            (0, 0)
        } else {
            // Widen the multiply; the counters are unbounded u64.
            (
                (q1 as u128 * 100 / q3 as u128) as u8 & 0x0f,
                (q2 as u128 * 100 / q3 as u128) as u8 & 0x0f,
            )
        };
        let mut this = Tlsh {
            checksum: [0; MAX_CHECKSUM_SIZE],
            lvalue: l_capturing(count),
            q1_ratio,
            q2_ratio,
            body: [0; MAX_BODY_SIZE],
            checksum_len: checksum.len() as u8,
            body_len: body.len() as u8,
        };
        this.checksum[..checksum.len()].copy_from_slice(checksum);
        this.body[..body.len()].copy_from_slice(body);
        this
    }

    /// Creates a digest from its canonical packed byte form.
    ///
    /// The bucket count and checksum length are inferred from the
    /// buffer length; any length other than 15, 35, 37, 67 or 69
    /// bytes fails with [`FormatError::PackedLengthInvalid`].
    pub fn from_packed(buffer: &[u8]) -> Result<Self, FormatError> {
        let (checksum_len, body_len) = Self::dimensions_of_packed(buffer.len())?;
        let c = checksum_len as usize;
        let mut this = Tlsh {
            checksum: [0; MAX_CHECKSUM_SIZE],
            lvalue: swap_nibble(buffer[c]),
            q1_ratio: buffer[c + 1] >> 4,
            q2_ratio: buffer[c + 1] & 0x0f,
            body: [0; MAX_BODY_SIZE],
            checksum_len,
            body_len,
        };
        for (i, &value) in buffer[..c].iter().enumerate() {
            this.checksum[i] = swap_nibble(value);
        }
        for (i, &value) in buffer[c + 2..].iter().rev().enumerate() {
            this.body[i] = value;
        }
        Ok(this)
    }

    /// The checksum bytes (1 or 3 of them).
    #[inline]
    pub fn checksum(&self) -> &[u8] {
        optionally_unsafe! {
            invariant!((self.checksum_len as usize) <= MAX_CHECKSUM_SIZE);
        }
        &self.checksum[..self.checksum_len as usize]
    }

    /// The quantized input length code.
    #[inline]
    pub fn lvalue(&self) -> u8 {
        self.lvalue
    }

    /// The first quartile ratio (a nibble).
    #[inline]
    pub fn q1_ratio(&self) -> u8 {
        self.q1_ratio
    }

    /// The second quartile ratio (a nibble).
    #[inline]
    pub fn q2_ratio(&self) -> u8 {
        self.q2_ratio
    }

    /// The body: four 2-bit bucket quartile codes per byte.
    #[inline]
    pub fn body(&self) -> &[u8] {
        optionally_unsafe! {
            invariant!((self.body_len as usize) <= MAX_BODY_SIZE);
        }
        &self.body[..self.body_len as usize]
    }

    /// The checksum length in bytes (1 or 3).
    #[inline]
    pub fn checksum_len(&self) -> usize {
        self.checksum_len as usize
    }

    /// The number of histogram buckets this digest was produced
    /// from (48, 128 or 256).
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.body_len as usize * 4
    }

    /// The length of this digest's packed form in bytes.
    #[inline]
    pub fn packed_len(&self) -> usize {
        self.checksum_len as usize + 2 + self.body_len as usize
    }

    /// The length of this digest's string representation, not
    /// counting the optional `T1` version prefix.
    #[inline]
    pub fn len_in_str(&self) -> usize {
        self.packed_len() * 2
    }

    /// Stores the packed form into a byte buffer.
    ///
    /// On success the number of bytes written is returned.  The only
    /// failure is a buffer shorter than [`packed_len()`](Self::packed_len())
    /// bytes, in which case `buffer` is not modified.
    pub fn pack_into(&self, buffer: &mut [u8]) -> Result<usize, OperationError> {
        let packed_len = self.packed_len();
        if buffer.len() < packed_len {
            return Err(OperationError::BufferOverflow);
        }
        let c = self.checksum_len as usize;
        for (out, &value) in buffer[..c].iter_mut().zip(self.checksum().iter()) {
            *out = swap_nibble(value);
        }
        buffer[c] = swap_nibble(self.lvalue);
        buffer[c + 1] = self.q1_ratio << 4 | self.q2_ratio;
        for (out, &value) in buffer[c + 2..packed_len].iter_mut().zip(self.body().iter().rev()) {
            *out = value;
        }
        Ok(packed_len)
    }

    /// The packed form as a freshly allocated buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use tlsh::Tlsh;
    ///
    /// let hex = "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0";
    /// let digest: Tlsh = hex.parse().unwrap();
    /// assert_eq!(digest.pack(), tlsh::hex_to_bytes(hex).unwrap());
    /// ```
    #[cfg(feature = "alloc")]
    pub fn pack(&self) -> Vec<u8> {
        let mut buffer = alloc::vec![0u8; self.packed_len()];
        // The buffer length is exact by construction.
        self.pack_into(buffer.as_mut_slice()).expect("exact-size buffer");
        buffer
    }

    /// Stores the hexadecimal form (without the `T1` prefix) into a
    /// byte buffer.
    ///
    /// On success the number of bytes written
    /// ([`len_in_str()`](Self::len_in_str())) is returned.
    pub fn store_hex_into(&self, buffer: &mut [u8]) -> Result<usize, OperationError> {
        let len_in_str = self.len_in_str();
        if buffer.len() < len_in_str {
            return Err(OperationError::BufferOverflow);
        }
        let mut packed = [0u8; Self::MAX_PACKED_LEN];
        let packed_len = self.pack_into(&mut packed)?;
        hex::encode_into(&packed[..packed_len], &mut buffer[..len_in_str]);
        Ok(len_in_str)
    }

    /// The upper-case hexadecimal form.
    #[cfg(feature = "alloc")]
    pub fn to_hex(&self) -> String {
        let mut buffer = alloc::vec![0u8; self.len_in_str()];
        self.store_hex_into(buffer.as_mut_slice()).expect("exact-size buffer");
        String::from_utf8(buffer).expect("hex digits are valid UTF-8")
    }

    /// The upper-case hexadecimal form with the `T1` version prefix.
    ///
    /// # Example
    ///
    /// ```
    /// let mut digester = tlsh::Digester::default();
    /// digester.update(b"Hello world!");
    /// assert!(digester.finalize().to_hex_t1().starts_with("T1DD60"));
    /// ```
    #[cfg(feature = "alloc")]
    pub fn to_hex_t1(&self) -> String {
        let mut out = String::with_capacity(2 + self.len_in_str());
        out.push_str(Self::VERSION_PREFIX);
        out.push_str(self.to_hex().as_str());
        out
    }
}

impl PartialEq for Tlsh {
    fn eq(&self, other: &Self) -> bool {
        self.checksum() == other.checksum()
            && self.lvalue == other.lvalue
            && self.q1_ratio == other.q1_ratio
            && self.q2_ratio == other.q2_ratio
            && self.body() == other.body()
    }
}

impl Eq for Tlsh {}

impl core::hash::Hash for Tlsh {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        // Hash the effective parts only, consistently with PartialEq.
        self.checksum().hash(state);
        self.lvalue.hash(state);
        self.q1_ratio.hash(state);
        self.q2_ratio.hash(state);
        self.body().hash(state);
    }
}

impl core::fmt::Debug for Tlsh {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tlsh")
            .field("checksum", &self.checksum())
            .field("lvalue", &self.lvalue)
            .field("q1_ratio", &self.q1_ratio)
            .field("q2_ratio", &self.q2_ratio)
            .field("body", &self.body())
            .finish()
    }
}

impl core::fmt::Display for Tlsh {
    /// Formats the digest as its upper-case hexadecimal form,
    /// without the `T1` prefix.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut buffer = [0u8; Self::MAX_LEN_IN_STR];
        let len = self.store_hex_into(&mut buffer).map_err(|_| core::fmt::Error)?;
        f.write_str(core::str::from_utf8(&buffer[..len]).map_err(|_| core::fmt::Error)?)
    }
}

impl core::str::FromStr for Tlsh {
    type Err = FormatError;

    /// Parses a digest from its hexadecimal form.
    ///
    /// Exactly [`len_in_str()`](Tlsh::len_in_str()) hexadecimal
    /// digits of one of the five variants are accepted, optionally
    /// preceded by the `T1` version tag.  Both letter cases decode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix(Self::VERSION_PREFIX).unwrap_or(s);
        let src = hex.as_bytes();
        if src.len() % 2 != 0 {
            return Err(FormatError::StringLengthInvalid);
        }
        let packed_len = src.len() / 2;
        if Self::dimensions_of_packed(packed_len).is_err() {
            return Err(FormatError::StringLengthInvalid);
        }
        let mut packed = [0u8; Self::MAX_PACKED_LEN];
        hex::decode_into(src, &mut packed[..packed_len])?;
        Self::from_packed(&packed[..packed_len])
    }
}
