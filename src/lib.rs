// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! A pure Rust implementation of TLSH, the Trend Micro Locality
//! Sensitive Hash.
//!
//! TLSH is a *fuzzy* digest: small perturbations of the input cause
//! small changes in the digest, and the numeric distance between two
//! digests correlates with the edit distance between the inputs.  This
//! crate implements the streaming digester, the digest value type with
//! its canonical packed and hexadecimal forms, and the distance score
//! between two digests.
//!
//! # Quick start
//!
//! ```
//! // Requires the "alloc" feature for `to_hex()` (default enabled).
//! # #[cfg(feature = "alloc")]
//! # {
//! use tlsh::Digester;
//!
//! let mut digester = Digester::default();
//! digester.update(b"Hello world!");
//! let digest = digester.finalize();
//! assert_eq!(
//!     digest.to_hex(),
//!     "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
//! );
//! # }
//! ```
//!
//! Scoring two digests:
//!
//! ```
//! use tlsh::Digester;
//!
//! let mut digester = Digester::default();
//! digester.update(b"Hello world!");
//! let a = digester.finalize();
//!
//! let mut digester = Digester::default();
//! digester.update(b"Goodbye Cruel World");
//! let b = digester.finalize();
//!
//! assert_eq!(a.score(&b, false), Ok(165));
//! assert_eq!(a.score(&a, true), Ok(0));
//! ```
//!
//! # Digester parameters
//!
//! A digester is configured by a triple:
//!
//! *   the window length `w` (4 to 8 bytes; 5 is the default),
//! *   the bucket count `b` (48, 128 or 256; 128 is the default) and
//! *   the checksum length `c` (1 or 3 bytes; 1 is the default;
//!     48 buckets only support a 1-byte checksum).
//!
//! The conventional names for these configurations follow the grammar
//! `TLSH-{b}-{c}/{w}` and can be resolved with [`Algorithm`]:
//!
//! ```
//! use tlsh::Algorithm;
//!
//! let algorithm: Algorithm = "TLSH-256-3/7".parse().unwrap();
//! let digester = algorithm.digester();
//! assert_eq!(digester.bucket_count(), 256);
//! ```
//!
//! # Cargo features
//!
//! *   `alloc` / `std`:
//!     this crate is `no_std` by default.  `alloc` enables the
//!     [`String`](alloc::string::String)/[`Vec`](alloc::vec::Vec)
//!     conveniences and `std` (default) additionally implements
//!     [`std::error::Error`] on the error types.
//! *   `easy-functions` (default):
//!     one-liners such as [`hash_buf()`] and [`score_hex()`].
//! *   `internal-state`:
//!     read-only access to the digester internals (bucket counters,
//!     checksum, byte count and the lag window) for tests and
//!     cross-implementation comparison harnesses.
//! *   `unsafe`:
//!     opt-in optimization hints (everything is sound without it).
//!
//! # No cryptographic security
//!
//! TLSH is not a cryptographic hash.  It is trivially possible to
//! construct an input matching a given digest; use it only to measure
//! similarity.

#![no_std]
// unsafe code is only allowed with the "unsafe" feature or on tests.
#![cfg_attr(not(any(feature = "unsafe", test)), forbid(unsafe_code))]
// Non-test code requires documents.
#![cfg_attr(not(test), warn(missing_docs, clippy::missing_docs_in_private_items))]
// On tests, the "unsafe" feature turns the optimization-hint blocks
// into unsafe blocks that no longer contain unsafe operations.
#![cfg_attr(test, allow(unused_unsafe))]

// Import alloc and std only when necessary.
#[cfg(any(feature = "alloc", test, doc))]
extern crate alloc;
#[cfg(any(feature = "std", test, doc))]
extern crate std;

mod algorithm;
mod compare;
mod compare_easy;
mod generate;
mod generate_easy;
mod generate_easy_std;
mod hash;
mod hex;
mod length;
mod macros;
mod pearson;
mod test_utils;

pub use algorithm::{Algorithm, NameError};
pub use compare::{score, MismatchError, ParseErrorSide, ScoreError};
#[cfg(feature = "easy-functions")]
pub use compare_easy::score_hex;
pub use generate::{Digester, ParameterError};
#[cfg(feature = "easy-functions")]
pub use generate_easy::hash_buf;
#[cfg(all(feature = "easy-functions", feature = "std"))]
pub use generate_easy_std::{hash_file, hash_stream};
pub use hash::{FormatError, OperationError, Tlsh};
#[cfg(feature = "alloc")]
pub use hex::{bytes_to_hex, hex_to_bytes};
pub use length::l_capturing;
#[cfg(feature = "std")]
pub use length::l_capturing_log;
pub use pearson::{Pearson, PermutationError};

/// The maximum length of a packed digest in bytes.
///
/// This is the packed length of the largest variant
/// (256 buckets with a 3-byte checksum); see [`Tlsh::packed_len()`]
/// for the per-variant lengths.
pub const MAX_PACKED_LEN: usize = Tlsh::MAX_PACKED_LEN;

/// The maximum length of a digest's string representation
/// (without the optional `T1` version prefix).
///
/// The `T1`-prefixed form produced by [`Tlsh::to_hex_t1()`] is two
/// characters longer.
pub const MAX_LEN_IN_STR: usize = Tlsh::MAX_LEN_IN_STR;

/// Constant assertions related to the base requirements.
#[doc(hidden)]
mod const_asserts {
    use static_assertions::{const_assert, const_assert_eq};

    use super::*;

    // We expect that usize is at least 16 bits in width.
    const_assert!(usize::BITS >= 16);

    // The packed layout is checksum + lvalue + q-ratios + body.
    const_assert_eq!(MAX_PACKED_LEN, 3 + 2 + 64);
    const_assert_eq!(MAX_LEN_IN_STR, 2 * MAX_PACKED_LEN);
}

mod tests;
