// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

#![cfg(feature = "easy-functions")]

use crate::generate::Digester;
use crate::hash::Tlsh;

/// Digests a buffer with the default algorithm (`TLSH-128-1/5`).
///
/// # Example
///
/// ```
/// // Requires the "alloc" feature to use `to_hex()` (default enabled).
/// # #[cfg(feature = "alloc")]
/// assert_eq!(
///     tlsh::hash_buf(b"Hello world!").to_hex(),
///     "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
/// );
/// ```
pub fn hash_buf(buffer: &[u8]) -> Tlsh {
    let mut digester = Digester::default();
    digester.update(buffer);
    digester.finalize()
}

mod tests;
