// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! The five window-specialized digesters.
//!
//! For every input byte, a digester of window length `w` mixes the
//! byte with ordered pairs taken from the previous `w - 1` bytes and
//! increments one histogram bucket per pair.  Each pair carries its
//! own salt so that the same triplet of bytes lands in different
//! buckets depending on its position inside the window; the salts are
//! the Pearson hashes of the first small primes.
//!
//! Keeping one type per window length lets the lag bytes live in
//! plain fields and the per-byte bucket list stay fully unrolled.
//! The pair lists nest: the window-`w` list is the window-`(w-1)`
//! list plus the pairs involving the oldest byte, so each type below
//! extends the previous one by one batch of increments.

use crate::hash::{Tlsh, MAX_BODY_SIZE, MAX_CHECKSUM_SIZE};
use crate::pearson::{b_mapping, fast_b_mapping, TABLE};

/// Pearson hash of salt prime 0 (checksum chain).
const T0: u8 = TABLE[0];
/// Pearson hash of salt prime 2.
const T2: u8 = TABLE[2];
/// Pearson hash of salt prime 3.
const T3: u8 = TABLE[3];
/// Pearson hash of salt prime 5.
const T5: u8 = TABLE[5];
/// Pearson hash of salt prime 7.
const T7: u8 = TABLE[7];
/// Pearson hash of salt prime 11.
const T11: u8 = TABLE[11];
/// Pearson hash of salt prime 13.
const T13: u8 = TABLE[13];
/// Pearson hash of salt prime 17.
const T17: u8 = TABLE[17];
/// Pearson hash of salt prime 19.
const T19: u8 = TABLE[19];
/// Pearson hash of salt prime 23.
const T23: u8 = TABLE[23];
/// Pearson hash of salt prime 29.
const T29: u8 = TABLE[29];
/// Pearson hash of salt prime 31.
const T31: u8 = TABLE[31];
/// Pearson hash of salt prime 37.
const T37: u8 = TABLE[37];
/// Pearson hash of salt prime 41.
const T41: u8 = TABLE[41];
/// Pearson hash of salt prime 43.
const T43: u8 = TABLE[43];
/// Pearson hash of salt prime 47.
const T47: u8 = TABLE[47];
/// Pearson hash of salt prime 53.
const T53: u8 = TABLE[53];
/// Pearson hash of salt prime 59.
const T59: u8 = TABLE[59];
/// Pearson hash of salt prime 61.
const T61: u8 = TABLE[61];
/// Pearson hash of salt prime 67.
const T67: u8 = TABLE[67];
/// Pearson hash of salt prime 71.
const T71: u8 = TABLE[71];
/// Pearson hash of salt prime 73.
const T73: u8 = TABLE[73];

/// The window-independent digester state: the bucket histogram, the
/// rolling checksum and the byte counter.
///
/// There are always 256 physical buckets; only the lowest
/// `bucket_count` are consumed at finalization.
#[derive(Clone)]
pub(crate) struct DigestCore {
    /// The bucket histogram.
    buckets: [u64; 256],
    /// Checksum bytes.  Elements `[checksum_len..]` stay zero.
    checksum: [u8; MAX_CHECKSUM_SIZE],
    /// The number of bytes consumed.
    count: u64,
    /// The number of buckets consumed at finalization (48, 128 or 256).
    bucket_count: u16,
    /// The checksum length in bytes (1 or 3).
    checksum_len: u8,
}

impl DigestCore {
    /// Creates an empty core for a validated configuration.
    pub(crate) fn new(bucket_count: u16, checksum_len: u8) -> Self {
        debug_assert!(matches!(bucket_count, 48 | 128 | 256));
        debug_assert!(checksum_len == 1 || checksum_len == 3);
        DigestCore {
            buckets: [0; 256],
            checksum: [0; MAX_CHECKSUM_SIZE],
            count: 0,
            bucket_count,
            checksum_len,
        }
    }

    /// Returns the core to its empty state, keeping the configuration.
    pub(crate) fn reset(&mut self) {
        self.buckets = [0; 256];
        self.checksum = [0; MAX_CHECKSUM_SIZE];
        self.count = 0;
    }

    /// Advances the rolling checksum with the current byte and its
    /// predecessor.
    ///
    /// With a multi-byte checksum, every further byte is chained on
    /// the freshly updated previous one, so the bytes diffuse through
    /// the whole checksum.
    #[inline(always)]
    fn update_checksum(&mut self, l0: u8, l1: u8) {
        self.checksum[0] = fast_b_mapping(T0, l0, l1, self.checksum[0]);
        if self.checksum_len > 1 {
            self.checksum[1] = b_mapping(self.checksum[0], l0, l1, self.checksum[1]);
            self.checksum[2] = b_mapping(self.checksum[1], l0, l1, self.checksum[2]);
        }
    }

    /// Computes the quartile boundaries and compresses the histogram
    /// into the digest body.
    pub(crate) fn finalize(&self) -> Tlsh {
        let n = self.bucket_count as usize;
        let quartile = n / 4;

        let mut sorted = self.buckets;
        sorted[..n].sort_unstable();
        let q1 = sorted[quartile - 1];
        let q2 = sorted[2 * quartile - 1];
        let q3 = sorted[3 * quartile - 1];

        // One byte per four buckets: a 2-bit quartile code each,
        // lowest bucket in the lowest bits.
        let mut body = [0u8; MAX_BODY_SIZE];
        for (i, chunk) in self.buckets[..n].chunks_exact(4).enumerate() {
            let mut packed = 0u8;
            for (j, &value) in chunk.iter().enumerate() {
                let code = if value > q3 {
                    3
                } else if value > q2 {
                    2
                } else if value > q1 {
                    1
                } else {
                    0
                };
                packed |= code << (2 * j);
            }
            body[i] = packed;
        }

        Tlsh::from_digest_state(
            &self.checksum[..self.checksum_len as usize],
            self.count,
            q1,
            q2,
            q3,
            &body[..quartile],
        )
    }

    /// The number of buckets consumed at finalization.
    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.bucket_count as usize
    }

    /// The checksum length in bytes.
    #[inline]
    pub(crate) fn checksum_len(&self) -> usize {
        self.checksum_len as usize
    }

    /// The number of bytes consumed so far.
    #[cfg(any(test, feature = "internal-state"))]
    #[inline]
    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    /// A single bucket counter.
    #[cfg(any(test, feature = "internal-state"))]
    #[inline]
    pub(crate) fn bucket(&self, index: usize) -> u64 {
        self.buckets[index]
    }

    /// The checksum bytes.
    #[cfg(any(test, feature = "internal-state"))]
    #[inline]
    pub(crate) fn checksum(&self) -> &[u8] {
        &self.checksum[..self.checksum_len as usize]
    }
}

impl core::fmt::Debug for DigestCore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The histogram is noise in test output; show the shape only.
        f.debug_struct("DigestCore")
            .field("bucket_count", &self.bucket_count)
            .field("checksum_len", &self.checksum_len)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

/// A digester with a 4-byte sliding window (3 buckets per byte).
#[derive(Clone, Debug)]
pub(crate) struct Window4 {
    /// Window-independent state.
    core: DigestCore,
    /// The most recent lag byte.
    l1: u8,
    /// The second most recent lag byte.
    l2: u8,
    /// The oldest lag byte.
    l3: u8,
}

impl Window4 {
    /// The window length this digester implements.
    pub(crate) const WINDOW_LENGTH: usize = 4;

    /// Creates an empty digester for a validated configuration.
    pub(crate) fn new(bucket_count: u16, checksum_len: u8) -> Self {
        Window4 {
            core: DigestCore::new(bucket_count, checksum_len),
            l1: 0,
            l2: 0,
            l3: 0,
        }
    }

    /// Consumes one byte.
    #[inline(always)]
    pub(crate) fn update_byte(&mut self, l0: u8) {
        self.core.count += 1;
        if self.core.count >= Self::WINDOW_LENGTH as u64 {
            self.core.update_checksum(l0, self.l1);
            let b = &mut self.core.buckets;
            b[fast_b_mapping(T2, l0, self.l1, self.l2) as usize] += 1;
            b[fast_b_mapping(T3, l0, self.l1, self.l3) as usize] += 1;
            b[fast_b_mapping(T5, l0, self.l2, self.l3) as usize] += 1;
        }
        self.l3 = self.l2;
        self.l2 = self.l1;
        self.l1 = l0;
    }

    /// Returns the digester to its empty state.
    pub(crate) fn reset(&mut self) {
        self.core.reset();
        self.l1 = 0;
        self.l2 = 0;
        self.l3 = 0;
    }

    /// Finishes the computation.
    pub(crate) fn finalize(&self) -> Tlsh {
        self.core.finalize()
    }

    /// Window-independent state.
    #[inline]
    pub(crate) fn core(&self) -> &DigestCore {
        &self.core
    }

    /// Writes the lag window, most recent byte first, and returns
    /// its length.
    #[cfg(any(test, feature = "internal-state"))]
    pub(crate) fn lag_window(&self, out: &mut [u8; 7]) -> usize {
        out[..3].copy_from_slice(&[self.l1, self.l2, self.l3]);
        Self::WINDOW_LENGTH - 1
    }
}

/// A digester with a 5-byte sliding window (6 buckets per byte).
///
/// This is the window length every standard `TLSH-*` algorithm name
/// resolves to by default.
#[derive(Clone, Debug)]
pub(crate) struct Window5 {
    /// Window-independent state.
    core: DigestCore,
    /// The most recent lag byte.
    l1: u8,
    /// The second most recent lag byte.
    l2: u8,
    /// The third most recent lag byte.
    l3: u8,
    /// The oldest lag byte.
    l4: u8,
}

impl Window5 {
    /// The window length this digester implements.
    pub(crate) const WINDOW_LENGTH: usize = 5;

    /// Creates an empty digester for a validated configuration.
    pub(crate) fn new(bucket_count: u16, checksum_len: u8) -> Self {
        Window5 {
            core: DigestCore::new(bucket_count, checksum_len),
            l1: 0,
            l2: 0,
            l3: 0,
            l4: 0,
        }
    }

    /// Consumes one byte.
    #[inline(always)]
    pub(crate) fn update_byte(&mut self, l0: u8) {
        self.core.count += 1;
        if self.core.count >= Self::WINDOW_LENGTH as u64 {
            self.core.update_checksum(l0, self.l1);
            let b = &mut self.core.buckets;
            b[fast_b_mapping(T2, l0, self.l1, self.l2) as usize] += 1;
            b[fast_b_mapping(T3, l0, self.l1, self.l3) as usize] += 1;
            b[fast_b_mapping(T5, l0, self.l2, self.l3) as usize] += 1;
            b[fast_b_mapping(T7, l0, self.l2, self.l4) as usize] += 1;
            b[fast_b_mapping(T11, l0, self.l1, self.l4) as usize] += 1;
            b[fast_b_mapping(T13, l0, self.l3, self.l4) as usize] += 1;
        }
        self.l4 = self.l3;
        self.l3 = self.l2;
        self.l2 = self.l1;
        self.l1 = l0;
    }

    /// Returns the digester to its empty state.
    pub(crate) fn reset(&mut self) {
        self.core.reset();
        self.l1 = 0;
        self.l2 = 0;
        self.l3 = 0;
        self.l4 = 0;
    }

    /// Finishes the computation.
    pub(crate) fn finalize(&self) -> Tlsh {
        self.core.finalize()
    }

    /// Window-independent state.
    #[inline]
    pub(crate) fn core(&self) -> &DigestCore {
        &self.core
    }

    /// Writes the lag window, most recent byte first, and returns
    /// its length.
    #[cfg(any(test, feature = "internal-state"))]
    pub(crate) fn lag_window(&self, out: &mut [u8; 7]) -> usize {
        out[..4].copy_from_slice(&[self.l1, self.l2, self.l3, self.l4]);
        Self::WINDOW_LENGTH - 1
    }
}

/// A digester with a 6-byte sliding window (10 buckets per byte).
#[derive(Clone, Debug)]
pub(crate) struct Window6 {
    /// Window-independent state.
    core: DigestCore,
    /// The most recent lag byte.
    l1: u8,
    /// The second most recent lag byte.
    l2: u8,
    /// The third most recent lag byte.
    l3: u8,
    /// The fourth most recent lag byte.
    l4: u8,
    /// The oldest lag byte.
    l5: u8,
}

impl Window6 {
    /// The window length this digester implements.
    pub(crate) const WINDOW_LENGTH: usize = 6;

    /// Creates an empty digester for a validated configuration.
    pub(crate) fn new(bucket_count: u16, checksum_len: u8) -> Self {
        Window6 {
            core: DigestCore::new(bucket_count, checksum_len),
            l1: 0,
            l2: 0,
            l3: 0,
            l4: 0,
            l5: 0,
        }
    }

    /// Consumes one byte.
    #[inline(always)]
    pub(crate) fn update_byte(&mut self, l0: u8) {
        self.core.count += 1;
        if self.core.count >= Self::WINDOW_LENGTH as u64 {
            self.core.update_checksum(l0, self.l1);
            let b = &mut self.core.buckets;
            b[fast_b_mapping(T2, l0, self.l1, self.l2) as usize] += 1;
            b[fast_b_mapping(T3, l0, self.l1, self.l3) as usize] += 1;
            b[fast_b_mapping(T5, l0, self.l2, self.l3) as usize] += 1;
            b[fast_b_mapping(T7, l0, self.l2, self.l4) as usize] += 1;
            b[fast_b_mapping(T11, l0, self.l1, self.l4) as usize] += 1;
            b[fast_b_mapping(T13, l0, self.l3, self.l4) as usize] += 1;
            b[fast_b_mapping(T17, l0, self.l1, self.l5) as usize] += 1;
            b[fast_b_mapping(T19, l0, self.l2, self.l5) as usize] += 1;
            b[fast_b_mapping(T23, l0, self.l3, self.l5) as usize] += 1;
            b[fast_b_mapping(T29, l0, self.l4, self.l5) as usize] += 1;
        }
        self.l5 = self.l4;
        self.l4 = self.l3;
        self.l3 = self.l2;
        self.l2 = self.l1;
        self.l1 = l0;
    }

    /// Returns the digester to its empty state.
    pub(crate) fn reset(&mut self) {
        self.core.reset();
        self.l1 = 0;
        self.l2 = 0;
        self.l3 = 0;
        self.l4 = 0;
        self.l5 = 0;
    }

    /// Finishes the computation.
    pub(crate) fn finalize(&self) -> Tlsh {
        self.core.finalize()
    }

    /// Window-independent state.
    #[inline]
    pub(crate) fn core(&self) -> &DigestCore {
        &self.core
    }

    /// Writes the lag window, most recent byte first, and returns
    /// its length.
    #[cfg(any(test, feature = "internal-state"))]
    pub(crate) fn lag_window(&self, out: &mut [u8; 7]) -> usize {
        out[..5].copy_from_slice(&[self.l1, self.l2, self.l3, self.l4, self.l5]);
        Self::WINDOW_LENGTH - 1
    }
}

/// A digester with a 7-byte sliding window (15 buckets per byte).
#[derive(Clone, Debug)]
pub(crate) struct Window7 {
    /// Window-independent state.
    core: DigestCore,
    /// The most recent lag byte.
    l1: u8,
    /// The second most recent lag byte.
    l2: u8,
    /// The third most recent lag byte.
    l3: u8,
    /// The fourth most recent lag byte.
    l4: u8,
    /// The fifth most recent lag byte.
    l5: u8,
    /// The oldest lag byte.
    l6: u8,
}

impl Window7 {
    /// The window length this digester implements.
    pub(crate) const WINDOW_LENGTH: usize = 7;

    /// Creates an empty digester for a validated configuration.
    pub(crate) fn new(bucket_count: u16, checksum_len: u8) -> Self {
        Window7 {
            core: DigestCore::new(bucket_count, checksum_len),
            l1: 0,
            l2: 0,
            l3: 0,
            l4: 0,
            l5: 0,
            l6: 0,
        }
    }

    /// Consumes one byte.
    #[inline(always)]
    pub(crate) fn update_byte(&mut self, l0: u8) {
        self.core.count += 1;
        if self.core.count >= Self::WINDOW_LENGTH as u64 {
            self.core.update_checksum(l0, self.l1);
            let b = &mut self.core.buckets;
            b[fast_b_mapping(T2, l0, self.l1, self.l2) as usize] += 1;
            b[fast_b_mapping(T3, l0, self.l1, self.l3) as usize] += 1;
            b[fast_b_mapping(T5, l0, self.l2, self.l3) as usize] += 1;
            b[fast_b_mapping(T7, l0, self.l2, self.l4) as usize] += 1;
            b[fast_b_mapping(T11, l0, self.l1, self.l4) as usize] += 1;
            b[fast_b_mapping(T13, l0, self.l3, self.l4) as usize] += 1;
            b[fast_b_mapping(T17, l0, self.l1, self.l5) as usize] += 1;
            b[fast_b_mapping(T19, l0, self.l2, self.l5) as usize] += 1;
            b[fast_b_mapping(T23, l0, self.l3, self.l5) as usize] += 1;
            b[fast_b_mapping(T29, l0, self.l4, self.l5) as usize] += 1;
            b[fast_b_mapping(T31, l0, self.l1, self.l6) as usize] += 1;
            b[fast_b_mapping(T37, l0, self.l2, self.l6) as usize] += 1;
            b[fast_b_mapping(T41, l0, self.l3, self.l6) as usize] += 1;
            b[fast_b_mapping(T43, l0, self.l4, self.l6) as usize] += 1;
            b[fast_b_mapping(T47, l0, self.l5, self.l6) as usize] += 1;
        }
        self.l6 = self.l5;
        self.l5 = self.l4;
        self.l4 = self.l3;
        self.l3 = self.l2;
        self.l2 = self.l1;
        self.l1 = l0;
    }

    /// Returns the digester to its empty state.
    pub(crate) fn reset(&mut self) {
        self.core.reset();
        self.l1 = 0;
        self.l2 = 0;
        self.l3 = 0;
        self.l4 = 0;
        self.l5 = 0;
        self.l6 = 0;
    }

    /// Finishes the computation.
    pub(crate) fn finalize(&self) -> Tlsh {
        self.core.finalize()
    }

    /// Window-independent state.
    #[inline]
    pub(crate) fn core(&self) -> &DigestCore {
        &self.core
    }

    /// Writes the lag window, most recent byte first, and returns
    /// its length.
    #[cfg(any(test, feature = "internal-state"))]
    pub(crate) fn lag_window(&self, out: &mut [u8; 7]) -> usize {
        out[..6].copy_from_slice(&[self.l1, self.l2, self.l3, self.l4, self.l5, self.l6]);
        Self::WINDOW_LENGTH - 1
    }
}

/// A digester with an 8-byte sliding window (21 buckets per byte).
#[derive(Clone, Debug)]
pub(crate) struct Window8 {
    /// Window-independent state.
    core: DigestCore,
    /// The most recent lag byte.
    l1: u8,
    /// The second most recent lag byte.
    l2: u8,
    /// The third most recent lag byte.
    l3: u8,
    /// The fourth most recent lag byte.
    l4: u8,
    /// The fifth most recent lag byte.
    l5: u8,
    /// The sixth most recent lag byte.
    l6: u8,
    /// The oldest lag byte.
    l7: u8,
}

impl Window8 {
    /// The window length this digester implements.
    pub(crate) const WINDOW_LENGTH: usize = 8;

    /// Creates an empty digester for a validated configuration.
    pub(crate) fn new(bucket_count: u16, checksum_len: u8) -> Self {
        Window8 {
            core: DigestCore::new(bucket_count, checksum_len),
            l1: 0,
            l2: 0,
            l3: 0,
            l4: 0,
            l5: 0,
            l6: 0,
            l7: 0,
        }
    }

    /// Consumes one byte.
    #[inline(always)]
    pub(crate) fn update_byte(&mut self, l0: u8) {
        self.core.count += 1;
        if self.core.count >= Self::WINDOW_LENGTH as u64 {
            self.core.update_checksum(l0, self.l1);
            let b = &mut self.core.buckets;
            b[fast_b_mapping(T2, l0, self.l1, self.l2) as usize] += 1;
            b[fast_b_mapping(T3, l0, self.l1, self.l3) as usize] += 1;
            b[fast_b_mapping(T5, l0, self.l2, self.l3) as usize] += 1;
            b[fast_b_mapping(T7, l0, self.l2, self.l4) as usize] += 1;
            b[fast_b_mapping(T11, l0, self.l1, self.l4) as usize] += 1;
            b[fast_b_mapping(T13, l0, self.l3, self.l4) as usize] += 1;
            b[fast_b_mapping(T17, l0, self.l1, self.l5) as usize] += 1;
            b[fast_b_mapping(T19, l0, self.l2, self.l5) as usize] += 1;
            b[fast_b_mapping(T23, l0, self.l3, self.l5) as usize] += 1;
            b[fast_b_mapping(T29, l0, self.l4, self.l5) as usize] += 1;
            b[fast_b_mapping(T31, l0, self.l1, self.l6) as usize] += 1;
            b[fast_b_mapping(T37, l0, self.l2, self.l6) as usize] += 1;
            b[fast_b_mapping(T41, l0, self.l3, self.l6) as usize] += 1;
            b[fast_b_mapping(T43, l0, self.l4, self.l6) as usize] += 1;
            b[fast_b_mapping(T47, l0, self.l5, self.l6) as usize] += 1;
            b[fast_b_mapping(T53, l0, self.l1, self.l7) as usize] += 1;
            b[fast_b_mapping(T59, l0, self.l2, self.l7) as usize] += 1;
            b[fast_b_mapping(T61, l0, self.l3, self.l7) as usize] += 1;
            b[fast_b_mapping(T67, l0, self.l4, self.l7) as usize] += 1;
            b[fast_b_mapping(T71, l0, self.l5, self.l7) as usize] += 1;
            b[fast_b_mapping(T73, l0, self.l6, self.l7) as usize] += 1;
        }
        self.l7 = self.l6;
        self.l6 = self.l5;
        self.l5 = self.l4;
        self.l4 = self.l3;
        self.l3 = self.l2;
        self.l2 = self.l1;
        self.l1 = l0;
    }

    /// Returns the digester to its empty state.
    pub(crate) fn reset(&mut self) {
        self.core.reset();
        self.l1 = 0;
        self.l2 = 0;
        self.l3 = 0;
        self.l4 = 0;
        self.l5 = 0;
        self.l6 = 0;
        self.l7 = 0;
    }

    /// Finishes the computation.
    pub(crate) fn finalize(&self) -> Tlsh {
        self.core.finalize()
    }

    /// Window-independent state.
    #[inline]
    pub(crate) fn core(&self) -> &DigestCore {
        &self.core
    }

    /// Writes the lag window, most recent byte first, and returns
    /// its length.
    #[cfg(any(test, feature = "internal-state"))]
    pub(crate) fn lag_window(&self, out: &mut [u8; 7]) -> usize {
        out.copy_from_slice(&[
            self.l1, self.l2, self.l3, self.l4, self.l5, self.l6, self.l7,
        ]);
        Self::WINDOW_LENGTH - 1
    }
}
