// SPDX-License-Identifier: MPL-2.0
//! Test helpers for float comparisons.
//!
//! Layout math works in `f32`; compare with these instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;
