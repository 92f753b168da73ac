// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Tests: [`crate::generate_easy`].

#![cfg(test)]

use crate::generate::Digester;

use super::hash_buf;

#[test]
fn hash_buf_usage() {
    assert_eq!(
        hash_buf(b"Hello world!").to_hex(),
        "DD6000030030000C000000000C300CC00000C000030000000000F00030F0C00300CCC0"
    );
}

#[test]
fn hash_buf_matches_default_digester() {
    let buffer = b"Goodbye Cruel World";
    let mut digester = Digester::default();
    digester.update(buffer);
    assert_eq!(hash_buf(buffer), digester.finalize());
}

#[test]
fn hash_buf_empty_input() {
    let digest = hash_buf(b"");
    assert_eq!(digest.lvalue(), 0);
    assert!(digest.body().iter().all(|&b| b == 0));
}
