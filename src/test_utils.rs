// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Shared test helpers.

#![cfg(any(test, doc))]

/// Testing function for [`Eq`] + [`Clone`].
///
/// It also requires [`core::fmt::Debug`] for assertion.
pub(crate) fn test_auto_clone<T: Clone + Eq + core::fmt::Debug>(orig_value: &T) {
    let mut cloned: T = orig_value.clone();
    assert_eq!(*orig_value, cloned);
    cloned.clone_from(orig_value);
    assert_eq!(*orig_value, cloned);
}

/// Test automatically generated [`Debug`](core::fmt::Debug)
/// implementation of an enum with no variants with structs or tuples.
#[cfg(feature = "alloc")]
#[doc(alias = "test_auto_debug_for_enum")]
macro_rules! test_auto_debug_for_enum_impl {
    ($ty: ty, []) => {};
    ($ty: ty, [$var: ident]) => {{
        assert_eq!(alloc::format!("{:?}", <$ty>::$var), stringify!($var));
    }};
    ($ty: ty, [$var: ident, $($rest: ident),+]) => {
        $crate::test_utils::test_auto_debug_for_enum!($ty, [$var]);
        $crate::test_utils::test_auto_debug_for_enum!($ty, [$($rest),+]);
    };
    ($ty: ty, [$var: ident,]) => {
        $crate::test_utils::test_auto_debug_for_enum!($ty, [$var]);
    };
    ($ty: ty, [$var: ident, $($rest: ident),+,]) => {
        $crate::test_utils::test_auto_debug_for_enum!($ty, [$var, $($rest),+]);
    };
}

#[cfg(feature = "alloc")]
pub(crate) use test_auto_debug_for_enum_impl as test_auto_debug_for_enum;
