// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! The streaming TLSH digester.
//!
//! # The digest computation
//!
//! The digester slides a window of `w` bytes over the input.  Once
//! the window is full (the first `w - 1` bytes only warm it up), each
//! new byte:
//!
//! 1.  advances the rolling Pearson checksum over the byte and its
//!     predecessor and
//! 2.  increments one histogram bucket per salted byte triplet taken
//!     from the window (`C(w - 1, 2)` buckets per input byte).
//!
//! Finalization sorts a copy of the first `b` bucket counters, reads
//! the three quartile boundaries `q1`/`q2`/`q3`, and emits one 2-bit
//! code per bucket describing which quartile its counter falls in.
//! Together with the quantized input length and the two quartile
//! ratios this forms the [digest](crate::Tlsh).
//!
//! # Streaming
//!
//! `update(a); update(b)` is equivalent to `update(a ++ b)`: splits
//! of the input do not change the digest, only the byte sequence
//! does.  The digester never fails, suspends or performs I/O, and a
//! single instance must not be shared between threads without
//! exclusive access (distinct digesters are independent).

use crate::hash::Tlsh;

pub(crate) mod windows;

use windows::{Window4, Window5, Window6, Window7, Window8};

/// An enumeration representing a cause of a digester parameter error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// The window length is not in `4..=8`.
    ///
    /// The payload is the length that was supplied.
    WindowLengthOutOfRange(usize),
    /// The bucket count is not 48, 128 or 256.
    ///
    /// The payload is the count that was supplied.
    BucketCountInvalid(usize),
    /// The checksum length is not 1 or 3.
    ///
    /// The payload is the length that was supplied.
    ChecksumLengthInvalid(usize),
    /// The checksum length is valid but not supported with the
    /// requested bucket count (48 buckets require a 1-byte checksum).
    ///
    /// The payload is `(bucket count, checksum length)`.
    ChecksumLengthUnsupported(usize, usize),
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::WindowLengthOutOfRange(w) => {
                write!(f, "window length {} is not in 4..=8", w)
            }
            ParameterError::BucketCountInvalid(b) => {
                write!(f, "bucket count {} is not one of 48, 128 or 256", b)
            }
            ParameterError::ChecksumLengthInvalid(c) => {
                write!(f, "checksum length {} is not 1 or 3", c)
            }
            ParameterError::ChecksumLengthUnsupported(b, c) => {
                write!(f, "checksum length {} is not supported with {} buckets", c, b)
            }
        }
    }
}

crate::macros::impl_error! { ParameterError {} }

/// The window-specialized digester, selected once at construction.
#[derive(Clone, Debug)]
enum Inner {
    /// 4-byte window.
    W4(Window4),
    /// 5-byte window.
    W5(Window5),
    /// 6-byte window.
    W6(Window6),
    /// 7-byte window.
    W7(Window7),
    /// 8-byte window.
    W8(Window8),
}

/// A streaming TLSH digester.
///
/// A digester is configured by the `(window length, bucket count,
/// checksum length)` triple; see [`new()`](Self::new()).  Bytes are
/// fed with [`update()`](Self::update()) (in any number of chunks)
/// and the digest is taken exactly once with
/// [`finalize()`](Self::finalize()), which consumes the digester.
/// [`reset()`](Self::reset()) returns a digester to its empty state.
///
/// # Example
///
/// ```
/// use tlsh::Digester;
///
/// let mut digester = Digester::new(5, 128, 1).unwrap();
/// digester.update(b"Hello ");
/// digester.update(b"world!");
/// let digest = digester.finalize();
///
/// let mut digester = Digester::default();
/// digester.update(b"Hello world!");
/// assert_eq!(digester.finalize(), digest);
/// ```
#[derive(Clone, Debug)]
pub struct Digester {
    /// The window-specialized digester.
    inner: Inner,
}

impl Digester {
    /// The smallest supported window length.
    pub const MIN_WINDOW_LENGTH: usize = Window4::WINDOW_LENGTH;

    /// The largest supported window length.
    pub const MAX_WINDOW_LENGTH: usize = Window8::WINDOW_LENGTH;

    /// The window length used when none is requested.
    pub const DEFAULT_WINDOW_LENGTH: usize = Window5::WINDOW_LENGTH;

    /// The bucket count used when none is requested.
    pub const DEFAULT_BUCKET_COUNT: usize = 128;

    /// The checksum length used when none is requested.
    pub const DEFAULT_CHECKSUM_LENGTH: usize = 1;

    /// Validates a `(window length, bucket count, checksum length)`
    /// triple.
    pub(crate) fn validate_parameters(
        window_length: usize,
        bucket_count: usize,
        checksum_length: usize,
    ) -> Result<(), ParameterError> {
        if !(Self::MIN_WINDOW_LENGTH..=Self::MAX_WINDOW_LENGTH).contains(&window_length) {
            return Err(ParameterError::WindowLengthOutOfRange(window_length));
        }
        if !matches!(bucket_count, 48 | 128 | 256) {
            return Err(ParameterError::BucketCountInvalid(bucket_count));
        }
        if !matches!(checksum_length, 1 | 3) {
            return Err(ParameterError::ChecksumLengthInvalid(checksum_length));
        }
        if bucket_count == 48 && checksum_length != 1 {
            return Err(ParameterError::ChecksumLengthUnsupported(
                bucket_count,
                checksum_length,
            ));
        }
        Ok(())
    }

    /// Creates an empty digester for the given configuration.
    ///
    /// The window length must be in `4..=8`, the bucket count one of
    /// 48, 128 or 256 and the checksum length 1 or 3; 48 buckets only
    /// support a 1-byte checksum.  Anything else is rejected with a
    /// [`ParameterError`].
    pub fn new(
        window_length: usize,
        bucket_count: usize,
        checksum_length: usize,
    ) -> Result<Self, ParameterError> {
        Self::validate_parameters(window_length, bucket_count, checksum_length)?;
        let b = bucket_count as u16;
        let c = checksum_length as u8;
        let inner = match window_length {
            4 => Inner::W4(Window4::new(b, c)),
            5 => Inner::W5(Window5::new(b, c)),
            6 => Inner::W6(Window6::new(b, c)),
            7 => Inner::W7(Window7::new(b, c)),
            _ => Inner::W8(Window8::new(b, c)),
        };
        Ok(Digester { inner })
    }

    /// Consumes a slice of bytes.
    ///
    /// Splitting the input over several calls does not change the
    /// digest.
    pub fn update(&mut self, buffer: &[u8]) -> &mut Self {
        match &mut self.inner {
            Inner::W4(w) => buffer.iter().for_each(|&ch| w.update_byte(ch)),
            Inner::W5(w) => buffer.iter().for_each(|&ch| w.update_byte(ch)),
            Inner::W6(w) => buffer.iter().for_each(|&ch| w.update_byte(ch)),
            Inner::W7(w) => buffer.iter().for_each(|&ch| w.update_byte(ch)),
            Inner::W8(w) => buffer.iter().for_each(|&ch| w.update_byte(ch)),
        }
        self
    }

    /// Consumes a single byte.
    #[inline]
    pub fn update_by_byte(&mut self, byte: u8) -> &mut Self {
        match &mut self.inner {
            Inner::W4(w) => w.update_byte(byte),
            Inner::W5(w) => w.update_byte(byte),
            Inner::W6(w) => w.update_byte(byte),
            Inner::W7(w) => w.update_byte(byte),
            Inner::W8(w) => w.update_byte(byte),
        }
        self
    }

    /// Consumes an iterator of bytes.
    pub fn update_by_iter(&mut self, iter: impl Iterator<Item = u8>) -> &mut Self {
        for byte in iter {
            self.update_by_byte(byte);
        }
        self
    }

    /// Returns the digester to its empty state, keeping the
    /// configuration.
    pub fn reset(&mut self) {
        match &mut self.inner {
            Inner::W4(w) => w.reset(),
            Inner::W5(w) => w.reset(),
            Inner::W6(w) => w.reset(),
            Inner::W7(w) => w.reset(),
            Inner::W8(w) => w.reset(),
        }
    }

    /// Finishes the computation and returns the digest.
    ///
    /// This consumes the digester; the computation cannot be resumed
    /// afterwards.  Keep a [`Clone`] or call [`reset()`](Self::reset())
    /// beforehand to digest more data.
    pub fn finalize(self) -> Tlsh {
        match &self.inner {
            Inner::W4(w) => w.finalize(),
            Inner::W5(w) => w.finalize(),
            Inner::W6(w) => w.finalize(),
            Inner::W7(w) => w.finalize(),
            Inner::W8(w) => w.finalize(),
        }
    }

    /// The window length in bytes.
    pub fn window_length(&self) -> usize {
        match &self.inner {
            Inner::W4(_) => Window4::WINDOW_LENGTH,
            Inner::W5(_) => Window5::WINDOW_LENGTH,
            Inner::W6(_) => Window6::WINDOW_LENGTH,
            Inner::W7(_) => Window7::WINDOW_LENGTH,
            Inner::W8(_) => Window8::WINDOW_LENGTH,
        }
    }

    /// The number of histogram buckets consumed at finalization.
    pub fn bucket_count(&self) -> usize {
        self.core().bucket_count()
    }

    /// The checksum length in bytes.
    pub fn checksum_length(&self) -> usize {
        self.core().checksum_len()
    }

    /// Window-independent state.
    fn core(&self) -> &windows::DigestCore {
        match &self.inner {
            Inner::W4(w) => w.core(),
            Inner::W5(w) => w.core(),
            Inner::W6(w) => w.core(),
            Inner::W7(w) => w.core(),
            Inner::W8(w) => w.core(),
        }
    }
}

/// Read-only inspection of the digester internals.
///
/// These accessors exist for tests and cross-implementation
/// comparison harnesses and make no stability promises about the
/// values between crate versions beyond what the digest itself fixes.
#[cfg(any(test, feature = "internal-state"))]
impl Digester {
    /// The number of bytes consumed so far.
    pub fn byte_count(&self) -> u64 {
        self.core().count()
    }

    /// A single histogram bucket counter.
    ///
    /// All 256 physical buckets can be read; only the lowest
    /// [`bucket_count()`](Self::bucket_count()) are consumed at
    /// finalization.
    pub fn bucket(&self, index: usize) -> u64 {
        self.core().bucket(index)
    }

    /// The current checksum bytes.
    pub fn checksum(&self) -> &[u8] {
        self.core().checksum()
    }

    /// The lag window (the last `window_length - 1` bytes consumed),
    /// most recent byte first.
    pub fn lag_window(&self) -> ([u8; 7], usize) {
        let mut out = [0u8; 7];
        let len = match &self.inner {
            Inner::W4(w) => w.lag_window(&mut out),
            Inner::W5(w) => w.lag_window(&mut out),
            Inner::W6(w) => w.lag_window(&mut out),
            Inner::W7(w) => w.lag_window(&mut out),
            Inner::W8(w) => w.lag_window(&mut out),
        };
        (out, len)
    }
}

impl Default for Digester {
    /// Creates the default digester (`TLSH-128-1/5`).
    fn default() -> Self {
        Digester {
            inner: Inner::W5(Window5::new(
                Self::DEFAULT_BUCKET_COUNT as u16,
                Self::DEFAULT_CHECKSUM_LENGTH as u8,
            )),
        }
    }
}

impl core::ops::AddAssign<&[u8]> for Digester {
    /// Consumes a slice of bytes.
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8]) {
        self.update(buffer);
    }
}

impl<const N: usize> core::ops::AddAssign<&[u8; N]> for Digester {
    /// Consumes an array of bytes.
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8; N]) {
        self.update(&buffer[..]);
    }
}

impl core::ops::AddAssign<u8> for Digester {
    /// Consumes a single byte.
    #[inline(always)]
    fn add_assign(&mut self, byte: u8) {
        self.update_by_byte(byte);
    }
}

mod tests;
