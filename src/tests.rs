// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Tests: [`crate`].

#![cfg(test)]

#[test]
fn test_prerequisites() {
    assert!(
        cfg!(debug_assertions),
        "The tests in this crate require debug assertions to be enabled (by default)."
    );
}
