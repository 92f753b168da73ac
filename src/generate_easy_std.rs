// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

#![cfg(all(feature = "std", feature = "easy-functions"))]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::generate::Digester;
use crate::hash::Tlsh;
use crate::macros::{invariant, optionally_unsafe};

/// Constant temporary buffer size for "easy" functions.
const BUFFER_SIZE: usize = 32768;

/// Digests a reader stream with a prepared digester.
///
/// This is an internal function to allow other functions to
/// configure the [`Digester`] object.
#[inline]
fn hash_stream_common<R: Read>(
    mut digester: Digester,
    reader: &mut R,
) -> Result<Tlsh, std::io::Error> {
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let len = reader.read(&mut buffer)?;
        if len == 0 {
            break;
        }
        optionally_unsafe! {
            invariant!(len <= buffer.len());
        }
        digester.update(&buffer[0..len]);
    }
    Ok(digester.finalize())
}

/// Digests a reader stream with the default algorithm
/// (`TLSH-128-1/5`).
///
/// Only I/O can fail; the digest computation itself accepts any
/// stream, including an empty one.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
///
/// fn main() -> Result<(), std::io::Error> {
///     let mut stream = Cursor::new(b"Hello world!");
///     let digest = tlsh::hash_stream(&mut stream)?;
///     assert_eq!(
///         digest.to_hex(),
///         "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
///     );
///     Ok(())
/// }
/// ```
pub fn hash_stream<R: Read>(reader: &mut R) -> Result<Tlsh, std::io::Error> {
    hash_stream_common(Digester::default(), reader)
}

/// Digests a file with the default algorithm (`TLSH-128-1/5`).
///
/// The file is read front to back in fixed-size chunks; appends that
/// happen while hashing extend the digest accordingly.  If the file
/// could change underneath, digest a snapshot instead.
pub fn hash_file<P: AsRef<Path>>(path: P) -> Result<Tlsh, std::io::Error> {
    let mut file = File::open(path)?;
    hash_stream_common(Digester::default(), &mut file)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    /// The "Hello world!" digest (TLSH-128-1/5).
    const HELLO_HEX: &str =
        "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0";

    #[test]
    fn hash_stream_usage() {
        let mut stream = Cursor::new(b"Hello world!");
        let digest = hash_stream(&mut stream).unwrap();
        assert_eq!(digest.to_hex(), HELLO_HEX);
    }

    #[test]
    fn hash_stream_chunk_boundaries() {
        // A stream longer than the internal buffer digests the same
        // as the one-shot buffer.
        let buffer: std::vec::Vec<u8> =
            (0..(BUFFER_SIZE * 2 + 13)).map(|i| (i % 251) as u8).collect();
        let mut stream = Cursor::new(buffer.clone());
        let streamed = hash_stream(&mut stream).unwrap();

        let mut digester = Digester::default();
        digester.update(&buffer);
        assert_eq!(streamed, digester.finalize());
    }

    #[test]
    fn hash_stream_empty() {
        let mut stream = Cursor::new(b"");
        let digest = hash_stream(&mut stream).unwrap();
        assert_eq!(digest.lvalue(), 0);
    }

    #[test]
    fn hash_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Hello world!").unwrap();
        file.flush().unwrap();
        let digest = hash_file(file.path()).unwrap();
        assert_eq!(digest.to_hex(), HELLO_HEX);
    }

    #[test]
    fn hash_file_noexist() {
        let err = hash_file("data/nonexistent/digest.bin");
        assert!(err.is_err());
        assert_eq!(
            err.unwrap_err().kind(),
            std::io::ErrorKind::NotFound
        );
    }
}
