// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: Copyright (C) 2024, 2025 The tlsh crate authors.

//! Internal macros (mainly to share safe/unsafe code).

/// "Optionally" unsafe block.
///
/// When this crate is built with the `unsafe` feature, this macro is
/// expanded to an `unsafe` block.
///
/// Inside this block, you may place statements that may change the
/// behavior depending on the feature `unsafe`.  For instance, you may
/// place [`invariant!()`] inside this block.
///
/// ```ignore
/// // INTERNAL USE (INSIDE THIS CRATE) ONLY
/// // let index: usize = ... (but proven to be inside the array).
/// # let index = 3usize;
/// let array = [0, 1, 2, 3];
/// optionally_unsafe! {
///     invariant!(index < array.len());
/// }
/// // Bound checking may be optimized out.
/// let result = array[index];
/// ```
#[doc(alias = "optionally_unsafe")]
macro_rules! optionally_unsafe_impl {
    {$($tokens: tt)*} => {
        cfg_if::cfg_if! {
            if #[cfg(feature = "unsafe")] {
                unsafe { $($tokens)* }
            }
            else {
                { $($tokens)* }
            }
        }
    };
}
pub(crate) use optionally_unsafe_impl as optionally_unsafe;

/// Declare an invariant for optimization.
///
/// When the feature `unsafe` is disabled, it only places
/// [`debug_assert!()`].  When `unsafe` is enabled,
/// [`core::hint::unreachable_unchecked()`] is reached on violation,
/// letting the optimizer assume the invariant.
///
/// Optimization behaviors are disabled on tests.
///
/// Use this macro along with [`optionally_unsafe!{}`].
#[doc(alias = "invariant")]
macro_rules! invariant_impl {
    ($expr: expr) => {
        cfg_if::cfg_if! {
            if #[cfg(all(feature = "unsafe", not(test)))] {
                if !($expr) {
                    core::hint::unreachable_unchecked();
                }
            }
            else {
                debug_assert!($expr);
            }
        }
    };
}
pub(crate) use invariant_impl as invariant;

/// Implements [`Error`](std::error::Error) on an error type.
///
/// The trait is only available with the `std` feature because this
/// crate keeps compatibility with toolchains predating
/// `core::error::Error`.
macro_rules! impl_error_impl {
    ($type:ty { $($tokens:tt)* }) => {
        #[cfg(feature = "std")]
        impl std::error::Error for $type {
            $($tokens)*
        }
    }
}
pub(crate) use impl_error_impl as impl_error;
