// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Pearson's byte permutation and the mixing primitives built on it.
//!
//! TLSH uses Pearson hashing as its 8-bit mixing step: the digester
//! selects a bucket for every byte triplet and stirs the rolling
//! checksum through chains of table lookups over a fixed permutation
//! of `0..=255`.  The canonical table is the sample random table from
//! Pearson's original publication ("Fast Hashing of Variable-Length
//! Text Strings", CACM 33(6), 1990) and is shared by every TLSH
//! implementation.

/// The canonical Pearson permutation.
///
/// Every value in `0..=255` appears exactly once; the table is an
/// 8-bit S-box.
pub(crate) const TABLE: [u8; 256] = [
    1, 87, 49, 12, 176, 178, 102, 166, 121, 193, 6, 84, 249, 230, 44, 163,
    14, 197, 213, 181, 161, 85, 218, 80, 64, 239, 24, 226, 236, 142, 38, 200,
    110, 177, 104, 103, 141, 253, 255, 50, 77, 101, 81, 18, 45, 96, 31, 222,
    25, 107, 190, 70, 86, 237, 240, 34, 72, 242, 20, 214, 244, 227, 149, 235,
    97, 234, 57, 22, 60, 250, 82, 175, 208, 5, 127, 199, 111, 62, 135, 248,
    174, 169, 211, 58, 66, 154, 106, 195, 245, 171, 17, 187, 182, 179, 0, 243,
    132, 56, 148, 75, 128, 133, 158, 100, 130, 126, 91, 13, 153, 246, 216, 219,
    119, 68, 223, 78, 83, 88, 201, 99, 122, 11, 92, 32, 136, 114, 52, 10,
    138, 30, 48, 183, 156, 35, 61, 26, 143, 74, 251, 94, 129, 162, 63, 152,
    170, 7, 115, 167, 241, 206, 3, 150, 55, 59, 151, 220, 90, 53, 23, 131,
    125, 173, 15, 238, 79, 95, 89, 16, 105, 137, 225, 224, 217, 160, 37, 123,
    118, 73, 2, 157, 46, 116, 9, 145, 134, 228, 207, 212, 202, 215, 69, 229,
    27, 188, 67, 124, 168, 252, 42, 4, 29, 108, 21, 247, 19, 205, 39, 203,
    233, 40, 186, 147, 198, 192, 155, 33, 164, 191, 98, 204, 165, 180, 117, 76,
    140, 36, 210, 172, 41, 54, 159, 8, 185, 232, 113, 196, 231, 47, 146, 120,
    51, 65, 28, 144, 254, 221, 93, 189, 194, 139, 112, 43, 71, 109, 184, 209,
];

/// Mixes a pre-hashed salt with three bytes.
///
/// Computes `T[T[T[salt_hash ^ i] ^ j] ^ k]` where `salt_hash` is
/// already a table value (`T[salt]`).  The window digesters keep the
/// hashed salts as constants, saving one lookup per call on the
/// hottest path of the crate.
#[inline(always)]
pub(crate) fn fast_b_mapping(salt_hash: u8, i: u8, j: u8, k: u8) -> u8 {
    let h = TABLE[(salt_hash ^ i) as usize];
    let h = TABLE[(h ^ j) as usize];
    TABLE[(h ^ k) as usize]
}

/// Mixes a raw salt with three bytes.
///
/// Computes `T[T[T[T[salt] ^ i] ^ j] ^ k]`, the four-lookup form used
/// by the multi-byte checksum chain where the salt is itself a
/// running state byte.
#[inline(always)]
pub(crate) fn b_mapping(salt: u8, i: u8, j: u8, k: u8) -> u8 {
    fast_b_mapping(TABLE[salt as usize], i, j, k)
}

/// An enumeration representing a cause of a [`Pearson`]
/// construction error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermutationError {
    /// The supplied table does not have exactly 256 entries.
    ///
    /// The payload is the length that was supplied.
    LengthInvalid(usize),
    /// The supplied table is not a permutation of `0..=255`
    /// (some value occurs more than once).
    ///
    /// The payload is the first duplicated value.
    NotAPermutation(u8),
}

impl core::fmt::Display for PermutationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PermutationError::LengthInvalid(len) => {
                write!(f, "permutation table has {} entries (expected 256)", len)
            }
            PermutationError::NotAPermutation(value) => {
                write!(f, "table is not a permutation (value {} is duplicated)", value)
            }
        }
    }
}

crate::macros::impl_error! { PermutationError {} }

/// A Pearson hasher over a validated byte permutation.
///
/// The digester itself always uses the canonical
/// [classic](Self::classic()) table; this type exists for callers that
/// want the raw Pearson primitive, for instance to cross-check a
/// digest against a differently-seeded mixing step.
///
/// # Example
///
/// ```
/// use tlsh::Pearson;
///
/// let pearson = Pearson::classic();
/// assert_eq!(pearson.hash1(0), 1);
/// // The fold over an empty sequence is the hash of the zero state.
/// assert_eq!(pearson.hash([]), 0);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Pearson {
    /// The permutation used for hashing.
    table: [u8; 256],
}

impl Pearson {
    /// Creates a hasher over the canonical permutation.
    pub fn classic() -> Self {
        Pearson { table: TABLE }
    }

    /// Creates a hasher over a custom permutation.
    ///
    /// The slice must contain exactly 256 entries forming a
    /// permutation of `0..=255`; anything else is rejected with a
    /// [`PermutationError`].
    pub fn new(table: &[u8]) -> Result<Self, PermutationError> {
        if table.len() != 256 {
            return Err(PermutationError::LengthInvalid(table.len()));
        }
        let mut seen = [false; 256];
        let mut copy = [0u8; 256];
        for (i, &value) in table.iter().enumerate() {
            if seen[value as usize] {
                return Err(PermutationError::NotAPermutation(value));
            }
            seen[value as usize] = true;
            copy[i] = value;
        }
        Ok(Pearson { table: copy })
    }

    /// Hashes a single byte: `T[x]`.
    #[inline]
    pub fn hash1(&self, x: u8) -> u8 {
        self.table[x as usize]
    }

    /// Hashes two bytes: `T[T[a] ^ b]`.
    #[inline]
    pub fn hash2(&self, a: u8, b: u8) -> u8 {
        self.table[(self.table[a as usize] ^ b) as usize]
    }

    /// Hashes three bytes: `T[T[T[a] ^ b] ^ c]`.
    #[inline]
    pub fn hash3(&self, a: u8, b: u8, c: u8) -> u8 {
        let h = self.hash2(a, b);
        self.table[(h ^ c) as usize]
    }

    /// Hashes a byte sequence by folding from the zero state:
    /// `h := T[h ^ x]` for each byte `x`.
    pub fn hash(&self, seq: impl IntoIterator<Item = u8>) -> u8 {
        let mut h = 0u8;
        for x in seq {
            h = self.table[(h ^ x) as usize];
        }
        h
    }

    /// The underlying permutation.
    pub fn table(&self) -> &[u8; 256] {
        &self.table
    }
}

impl Default for Pearson {
    fn default() -> Self {
        Self::classic()
    }
}

impl core::fmt::Debug for Pearson {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The full table is noise in test output; identify it instead.
        if self.table == TABLE {
            f.write_str("Pearson(classic)")
        } else {
            f.write_str("Pearson(custom)")
        }
    }
}
