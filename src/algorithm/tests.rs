// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Tests: [`crate::algorithm`].

#![cfg(test)]

use alloc::format;
use alloc::string::ToString;

use crate::generate::ParameterError;
use crate::test_utils::test_auto_clone;

use super::{Algorithm, NameError};

#[test]
fn default_alias() {
    let bare: Algorithm = "TLSH".parse().unwrap();
    assert_eq!(bare, Algorithm::DEFAULT);
    assert_eq!(bare, Algorithm::default());
    assert_eq!(bare.window_length(), 5);
    assert_eq!(bare.bucket_count(), 128);
    assert_eq!(bare.checksum_length(), 1);
}

#[test]
fn full_names_parse() {
    for w in 4..=8usize {
        for &b in &[48usize, 128, 256] {
            for &c in &[1usize, 3] {
                if b == 48 && c != 1 {
                    continue;
                }
                let name = format!("TLSH-{}-{}/{}", b, c, w);
                let algorithm: Algorithm = name.parse().unwrap();
                assert_eq!(algorithm.window_length(), w);
                assert_eq!(algorithm.bucket_count(), b);
                assert_eq!(algorithm.checksum_length(), c);
                // Display renders the full form back.
                assert_eq!(algorithm.to_string(), name);
            }
        }
    }
}

#[test]
fn window_suffix_defaults_to_five() {
    let short: Algorithm = "TLSH-256-3".parse().unwrap();
    let full: Algorithm = "TLSH-256-3/5".parse().unwrap();
    assert_eq!(short, full);
    assert_eq!(short.to_string(), "TLSH-256-3/5");
}

#[test]
fn invalid_combination_rejected() {
    assert_eq!(
        "TLSH-48-3".parse::<Algorithm>(),
        Err(NameError::Parameter(
            ParameterError::ChecksumLengthUnsupported(48, 3)
        ))
    );
    assert_eq!(
        "TLSH-48-3/4".parse::<Algorithm>(),
        Err(NameError::Parameter(
            ParameterError::ChecksumLengthUnsupported(48, 3)
        ))
    );
    assert_eq!(
        Algorithm::new(5, 48, 3),
        Err(ParameterError::ChecksumLengthUnsupported(48, 3))
    );
}

#[test]
fn malformed_names_rejected() {
    for name in [
        "",
        "TLS",
        "tlsh",
        "TLSH-",
        "TLSH-128",
        "TLSH-128-",
        "TLSH-128-2",
        "TLSH-64-1",
        "TLSH-128-1/",
        "TLSH-128-1/3",
        "TLSH-128-1/9",
        "TLSH-128-1/55",
        "TLSH-128-1-5",
        "TLSH_128_1",
        "TLSH-0128-1",
        " TLSH-128-1",
    ] {
        assert_eq!(
            name.parse::<Algorithm>(),
            Err(NameError::Unrecognized),
            "{:?} must be rejected",
            name
        );
    }
}

#[test]
fn digester_inherits_parameters() {
    let algorithm: Algorithm = "TLSH-256-3/7".parse().unwrap();
    let digester = algorithm.digester();
    assert_eq!(digester.window_length(), 7);
    assert_eq!(digester.bucket_count(), 256);
    assert_eq!(digester.checksum_length(), 3);
}

#[test]
fn named_variants_digest_differently() {
    // Same input, different parameters, different digests.
    let input = b"The quick brown fox jumps over the lazy dog";
    let mut a = "TLSH-128-1/4".parse::<Algorithm>().unwrap().digester();
    let mut b = "TLSH-128-1/8".parse::<Algorithm>().unwrap().digester();
    a.update(input);
    b.update(input);
    assert_ne!(a.finalize(), b.finalize());
}

#[test]
fn error_impls() {
    test_auto_clone::<NameError>(&NameError::Unrecognized);
    assert_eq!(
        format!("{}", NameError::Unrecognized),
        "algorithm name is not recognized"
    );
    assert_eq!(
        format!(
            "{}",
            NameError::Parameter(ParameterError::ChecksumLengthUnsupported(48, 3))
        ),
        "checksum length 3 is not supported with 48 buckets"
    );
    test_auto_clone::<Algorithm>(&Algorithm::DEFAULT);
}
