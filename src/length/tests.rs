// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Tests: [`crate::length`].

#![cfg(test)]

use super::{l_capturing, l_capturing_log, TOPVAL};

#[test]
fn table_basic_shape() {
    assert_eq!(TOPVAL.len(), 256);
    assert_eq!(TOPVAL[0], 1);
    assert_eq!(TOPVAL[255], u64::MAX);
    // Strictly increasing.
    for i in 1..256 {
        assert!(TOPVAL[i - 1] < TOPVAL[i], "not increasing at {}", i);
    }
}

#[test]
fn capturing_zero_and_one() {
    // Length 0 is below the first threshold and maps to code 0,
    // same as length 1.
    assert_eq!(l_capturing(0), 0);
    assert_eq!(l_capturing(1), 0);
    assert_eq!(l_capturing(2), 1);
}

#[test]
fn capturing_borders() {
    // Each threshold is the last length of its code.
    for i in 0..255usize {
        assert_eq!(l_capturing(TOPVAL[i]), i as u8, "at TOPVAL[{}]", i);
        assert_eq!(
            l_capturing(TOPVAL[i] + 1),
            (i + 1) as u8,
            "just above TOPVAL[{}]",
            i
        );
    }
}

#[test]
fn capturing_saturates() {
    assert_eq!(l_capturing(TOPVAL[254] + 1), 255);
    assert_eq!(l_capturing(u64::MAX - 1), 255);
    assert_eq!(l_capturing(u64::MAX), 255);
}

#[test]
fn capturing_small_values_exhaustive() {
    // Walk the first thresholds linearly and compare with the
    // binary search.
    let mut expected = 0u8;
    for len in 0..=4205u64 {
        if len > TOPVAL[expected as usize] {
            expected += 1;
        }
        assert_eq!(l_capturing(len), expected, "at {}", len);
    }
}

#[test]
fn log_variant_agrees_on_borders() {
    // The float formula reproduces the table on and around every
    // threshold below the saturation sentinel.
    for i in 0..255usize {
        for delta in [-5i64, -1, 0, 1, 5] {
            let len = TOPVAL[i].wrapping_add(delta as u64);
            if (delta < 0 && TOPVAL[i] < (-delta) as u64) || len > TOPVAL[254] {
                continue;
            }
            assert_eq!(
                l_capturing_log(len),
                l_capturing(len),
                "mismatch at {} (TOPVAL[{}] {:+})",
                len,
                i,
                delta
            );
        }
    }
}

#[test]
fn log_variant_steps_at_thresholds() {
    for i in 0..254usize {
        assert_eq!(
            l_capturing_log(TOPVAL[i]) + 1,
            l_capturing_log(TOPVAL[i] + 1),
            "no step at TOPVAL[{}]",
            i
        );
    }
}

#[test]
fn log_variant_zero_and_saturation() {
    assert_eq!(l_capturing_log(0), 0);
    assert_eq!(l_capturing_log(1), 0);
    assert_eq!(l_capturing_log(u64::MAX), 255);
}
