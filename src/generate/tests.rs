// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Tests: [`crate::generate`].

#![cfg(test)]

use alloc::format;
use alloc::vec::Vec;

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::test_utils::test_auto_clone;

use super::{Digester, ParameterError};

/// Every valid `(window length, bucket count, checksum length)`
/// configuration.
fn all_configurations() -> Vec<(usize, usize, usize)> {
    let mut configurations = Vec::new();
    for w in Digester::MIN_WINDOW_LENGTH..=Digester::MAX_WINDOW_LENGTH {
        for &b in &[48usize, 128, 256] {
            for &c in &[1usize, 3] {
                if b == 48 && c != 1 {
                    continue;
                }
                configurations.push((w, b, c));
            }
        }
    }
    configurations
}

#[test]
fn parameter_validation() {
    for &(w, b, c) in all_configurations().iter() {
        assert!(Digester::new(w, b, c).is_ok(), "({}, {}, {})", w, b, c);
    }
    assert!(matches!(
        Digester::new(3, 128, 1),
        Err(ParameterError::WindowLengthOutOfRange(3))
    ));
    assert!(matches!(
        Digester::new(9, 128, 1),
        Err(ParameterError::WindowLengthOutOfRange(9))
    ));
    assert!(matches!(
        Digester::new(0, 128, 1),
        Err(ParameterError::WindowLengthOutOfRange(0))
    ));
    assert!(matches!(
        Digester::new(5, 64, 1),
        Err(ParameterError::BucketCountInvalid(64))
    ));
    assert!(matches!(
        Digester::new(5, 128, 2),
        Err(ParameterError::ChecksumLengthInvalid(2))
    ));
    assert!(matches!(
        Digester::new(5, 48, 3),
        Err(ParameterError::ChecksumLengthUnsupported(48, 3))
    ));
}

#[test]
fn default_configuration() {
    let digester = Digester::default();
    assert_eq!(digester.window_length(), 5);
    assert_eq!(digester.bucket_count(), 128);
    assert_eq!(digester.checksum_length(), 1);
}

#[test]
fn accessors_reflect_configuration() {
    for &(w, b, c) in all_configurations().iter() {
        let digester = Digester::new(w, b, c).unwrap();
        assert_eq!(digester.window_length(), w);
        assert_eq!(digester.bucket_count(), b);
        assert_eq!(digester.checksum_length(), c);
    }
}

#[test]
fn hello_world_digest() {
    let mut digester = Digester::default();
    digester.update(b"Hello world!");
    let digest = digester.finalize();
    assert_eq!(
        digest.to_hex(),
        "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
    );
}

#[test]
fn goodbye_cruel_world_digest() {
    let mut digester = Digester::default();
    digester.update(b"Goodbye Cruel World");
    let digest = digester.finalize();
    assert_eq!(
        digest.to_hex(),
        "F87000008008000822B80080002C82A000808002800C003020000B2830202008A83A22"
    );
}

#[test]
fn xor_pattern_digest_256_buckets() {
    // 64 KiB of b[i] = i ^ 0xAA through TLSH-256-1/5.
    let buffer: Vec<u8> = (0..65536u32).map(|i| (i & 0xff) as u8 ^ 0xaa).collect();
    let mut digester = Digester::new(5, 256, 1).unwrap();
    digester.update(&buffer);
    let digest = digester.finalize();
    assert_eq!(
        digest.to_hex(),
        "57532B05955D1EA730E17241C08C074C3DD1CF5C53CC580C1E2D3064CCF0E05DD8C152\
         8997453D416035B5D9D01F120B4D4CFA884F5B01C1EF764DA71C1E074D3D7B66"
    );
    assert_eq!(digest.bucket_count(), 256);
    assert_eq!(digest.packed_len(), 67);
}

#[test]
fn update_split_does_not_change_digest() {
    let mut digester = Digester::default();
    digester.update(b"Hello ");
    digester.update(b"world!");
    let split = digester.finalize();

    let mut digester = Digester::default();
    digester.update(b"Hello world!");
    assert_eq!(digester.finalize(), split);
}

#[test]
fn streaming_law_random_chunks() {
    // Chopping a random input at arbitrary positions never changes
    // the digest, for every configuration.
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x1f5a);
    let mut buffer = [0u8; 4096];
    rng.fill_bytes(&mut buffer);

    for &(w, b, c) in all_configurations().iter() {
        let mut whole = Digester::new(w, b, c).unwrap();
        whole.update(&buffer);
        let expected = whole.finalize();

        let mut chunked = Digester::new(w, b, c).unwrap();
        let mut offset = 0usize;
        while offset < buffer.len() {
            // Chunks deliberately smaller than any window length.
            let len = core::cmp::min(rng.gen_range(0..4), buffer.len() - offset);
            chunked.update(&buffer[offset..offset + len]);
            offset += len;
        }
        assert_eq!(chunked.finalize(), expected, "({}, {}, {})", w, b, c);
    }
}

#[test]
fn update_by_byte_matches_update() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x93c1);
    let mut buffer = [0u8; 512];
    rng.fill_bytes(&mut buffer);

    let mut by_slice = Digester::default();
    by_slice.update(&buffer);

    let mut by_byte = Digester::default();
    for &ch in buffer.iter() {
        by_byte.update_by_byte(ch);
    }

    let mut by_iter = Digester::default();
    by_iter.update_by_iter(buffer.iter().copied());

    let expected = by_slice.finalize();
    assert_eq!(by_byte.finalize(), expected);
    assert_eq!(by_iter.finalize(), expected);
}

#[test]
fn add_assign_sugar() {
    let mut reference = Digester::default();
    reference.update(b"Hello world!");

    let mut digester = Digester::default();
    digester += b"Hello ";
    digester += &b"world"[..];
    digester += b'!';
    assert_eq!(digester.finalize(), reference.finalize());
}

#[test]
fn reset_restores_empty_state() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x05u64);
    let mut buffer = [0u8; 1024];
    rng.fill_bytes(&mut buffer);

    for &(w, b, c) in all_configurations().iter() {
        let mut fresh = Digester::new(w, b, c).unwrap();
        fresh.update(&buffer);
        let expected = fresh.finalize();

        let mut reused = Digester::new(w, b, c).unwrap();
        reused.update(b"unrelated leftover data");
        reused.reset();
        reused.update(&buffer);
        assert_eq!(reused.finalize(), expected, "({}, {}, {})", w, b, c);
    }
}

#[test]
fn empty_input_digest() {
    let digest = Digester::default().finalize();
    // Nothing was hashed: zero checksum, zero length code, all-zero
    // body and both ratios defined as zero despite q3 == 0.
    assert_eq!(digest.checksum(), &[0]);
    assert_eq!(digest.lvalue(), 0);
    assert_eq!(digest.q1_ratio(), 0);
    assert_eq!(digest.q2_ratio(), 0);
    assert!(digest.body().iter().all(|&b| b == 0));
}

#[test]
fn input_shorter_than_window_only_counts() {
    // Four bytes never fill a 5-byte window; only the length code
    // differs from the empty digest.
    let mut digester = Digester::default();
    digester.update(b"abcd");
    assert_eq!(digester.byte_count(), 4);
    assert_eq!(digester.checksum(), &[0]);
    let digest = digester.finalize();
    assert_eq!(digest.lvalue(), crate::length::l_capturing(4));
    assert!(digest.body().iter().all(|&b| b == 0));
}

#[test]
fn warm_up_boundary_is_window_length() {
    for &(w, b, c) in all_configurations().iter() {
        let mut digester = Digester::new(w, b, c).unwrap();
        // One byte short of the window: no bucket activity at all.
        digester.update(&alloc::vec![0x5a; w - 1]);
        let total: u64 = (0..256).map(|i| digester.bucket(i)).sum();
        assert_eq!(total, 0, "({}, {}, {})", w, b, c);

        // The byte completing the window triggers the first update.
        digester.update_by_byte(0x5a);
        let total: u64 = (0..256).map(|i| digester.bucket(i)).sum();
        let triplets = (w - 1) * (w - 2) / 2; // C(w - 1, 2) pairs
        assert_eq!(total, triplets as u64, "({}, {}, {})", w, b, c);
    }
}

#[test]
fn lag_window_order() {
    for &(w, b, c) in all_configurations().iter() {
        let mut digester = Digester::new(w, b, c).unwrap();
        digester.update(&[0xaa, 0x55, 0xff]);
        let (lag, len) = digester.lag_window();
        assert_eq!(len, w - 1);
        // Most recent byte first.
        assert_eq!(lag[0], 0xff);
        assert_eq!(lag[1], 0x55);
        assert_eq!(lag[2], 0xaa);
        assert!(lag[3..len].iter().all(|&b| b == 0));
    }
}

#[test]
fn inspection_checksum_matches_digest() {
    let mut digester = Digester::default();
    digester.update(b"Hello world!");
    assert_eq!(digester.checksum(), &[0xdd]);
    assert_eq!(digester.byte_count(), 12);
    let digest = digester.finalize();
    assert_eq!(digest.checksum(), &[0xdd]);
}

#[test]
fn clone_preserves_state() {
    let mut digester = Digester::default();
    digester.update(b"Hello ");
    let mut cloned = digester.clone();
    digester.update(b"world!");
    cloned.update(b"world!");
    assert_eq!(digester.finalize(), cloned.finalize());
}

#[test]
fn debug_output_is_compact() {
    let digester = Digester::new(6, 256, 3).unwrap();
    let repr = format!("{:?}", digester);
    assert!(repr.contains("W6"));
    assert!(repr.contains("bucket_count: 256"));
    // The histogram itself must not be dumped.
    assert!(!repr.contains("buckets"));
}

#[test]
fn error_impls() {
    test_auto_clone::<ParameterError>(&ParameterError::WindowLengthOutOfRange(3));
    assert_eq!(
        format!("{}", ParameterError::WindowLengthOutOfRange(9)),
        "window length 9 is not in 4..=8"
    );
    assert_eq!(
        format!("{}", ParameterError::BucketCountInvalid(64)),
        "bucket count 64 is not one of 48, 128 or 256"
    );
    assert_eq!(
        format!("{}", ParameterError::ChecksumLengthInvalid(2)),
        "checksum length 2 is not 1 or 3"
    );
    assert_eq!(
        format!("{}", ParameterError::ChecksumLengthUnsupported(48, 3)),
        "checksum length 3 is not supported with 48 buckets"
    );
    assert_eq!(
        format!("{:?}", ParameterError::ChecksumLengthUnsupported(48, 3)),
        "ChecksumLengthUnsupported(48, 3)"
    );
}
